//! Builders producing frozen component and view models.
//!
//! Builders are plain mutable values. Content operations fill them in
//! incrementally, then a single `build` call turns them into immutable
//! models. A builder is never shared; clone it if two owners need one.

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};

use serde_json::{Map, Value};
use tracing::debug;

use crate::view_model::ensure_valid_components;
use crate::{
    ComponentContent, ComponentIdentifier, ComponentModel, Size, ViewModel, ViewModelError,
};

/// Component namespace and name a builder starts out with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDefaults {
    /// Namespace used when the content does not pick one.
    pub namespace: String,
    /// Name used when the content does not pick one.
    pub name: String,
}

impl ComponentDefaults {
    /// Creates a set of defaults.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl Default for ComponentDefaults {
    fn default() -> Self {
        Self::new("default", "row")
    }
}

// ============================================================================
// Ordered builder collection
// ============================================================================

/// Builders keyed by model identifier, remembering creation order.
#[derive(Debug, Clone, Default)]
struct BuilderCollection {
    builders: BTreeMap<String, ComponentModelBuilder>,
    order: Vec<String>,
}

impl BuilderCollection {
    fn get_or_insert(
        &mut self,
        identifier: &str,
        defaults: &ComponentDefaults,
    ) -> &mut ComponentModelBuilder {
        if !self.builders.contains_key(identifier) {
            self.order.push(identifier.to_string());
        }

        self.builders
            .entry(identifier.to_string())
            .or_insert_with(|| {
                ComponentModelBuilder::new(Some(identifier.to_string()), defaults.clone())
            })
    }

    fn get(&self, identifier: &str) -> Option<&ComponentModelBuilder> {
        self.builders.get(identifier)
    }

    fn remove(&mut self, identifier: &str) -> bool {
        self.order.retain(|existing| existing != identifier);
        self.builders.remove(identifier).is_some()
    }

    fn clear(&mut self) {
        self.builders.clear();
        self.order.clear();
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn build(&self) -> Vec<ComponentModel> {
        build_component_models(&self.builders, &self.order)
    }
}

/// Builds models from `builders`, ordered by `identifier_order`.
///
/// The order is only a default: a builder whose
/// [`preferred_index`](ComponentModelBuilder::preferred_index) lies within
/// the list is moved to that position. Builders are processed in
/// `identifier_order`, so a later builder can displace an earlier one.
/// Identifiers without a matching builder are skipped.
#[must_use]
pub fn build_component_models(
    builders: &BTreeMap<String, ComponentModelBuilder>,
    identifier_order: &[String],
) -> Vec<ComponentModel> {
    let mut sorted: Vec<&str> = Vec::with_capacity(identifier_order.len());
    for identifier in identifier_order {
        if builders.contains_key(identifier) && !sorted.contains(&identifier.as_str()) {
            sorted.push(identifier);
        }
    }

    for identifier in identifier_order {
        let Some(preferred) = builders.get(identifier).and_then(|b| b.preferred_index) else {
            continue;
        };
        if preferred >= sorted.len() {
            continue;
        }
        if let Some(current) = sorted.iter().position(|id| *id == identifier.as_str()) {
            let moved = sorted.remove(current);
            sorted.insert(preferred, moved);
        }
    }

    sorted
        .into_iter()
        .enumerate()
        .filter_map(|(index, identifier)| {
            builders
                .get(identifier)
                .map(|builder| builder.build_for_index(index))
        })
        .collect()
}

// ============================================================================
// ComponentModelBuilder
// ============================================================================

/// Mutable accumulator for a single [`ComponentModel`].
#[derive(Debug, Clone)]
pub struct ComponentModelBuilder {
    model_identifier: String,
    defaults: ComponentDefaults,
    /// Namespace of the component that should render the model.
    pub component_namespace: String,
    /// Name of the component that should render the model.
    pub component_name: String,
    /// Content payload.
    pub content: ComponentContent,
    /// Position the model should take, overriding its default order.
    pub preferred_index: Option<usize>,
    children: BuilderCollection,
}

impl ComponentModelBuilder {
    /// Creates a builder.
    ///
    /// A missing `model_identifier` is replaced with a random UUID.
    #[must_use]
    pub fn new(model_identifier: Option<String>, defaults: ComponentDefaults) -> Self {
        let model_identifier =
            model_identifier.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        Self {
            model_identifier,
            component_namespace: defaults.namespace.clone(),
            component_name: defaults.name.clone(),
            defaults,
            content: ComponentContent::default(),
            preferred_index: None,
            children: BuilderCollection::default(),
        }
    }

    /// Identifier of the model that will be built.
    #[must_use]
    pub fn model_identifier(&self) -> &str {
        &self.model_identifier
    }

    /// Sets namespace and name from a parsed identifier.
    ///
    /// A missing namespace keeps the current one.
    pub fn set_component_identifier(&mut self, identifier: &ComponentIdentifier) -> &mut Self {
        if let Some(namespace) = identifier.namespace() {
            self.component_namespace = namespace.to_string();
        }
        self.component_name = identifier.name().to_string();
        self
    }

    /// Sets the title.
    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.content.title = Some(title.into());
        self
    }

    /// Sets the subtitle.
    pub fn subtitle(&mut self, subtitle: impl Into<String>) -> &mut Self {
        self.content.subtitle = Some(subtitle.into());
        self
    }

    /// Sets the accessory title.
    pub fn accessory_title(&mut self, accessory_title: impl Into<String>) -> &mut Self {
        self.content.accessory_title = Some(accessory_title.into());
        self
    }

    /// Sets the description text.
    pub fn description_text(&mut self, description_text: impl Into<String>) -> &mut Self {
        self.content.description_text = Some(description_text.into());
        self
    }

    /// Sets the size the content asks for.
    pub const fn preferred_size(&mut self, size: Size) -> &mut Self {
        self.content.preferred_size = Some(size);
        self
    }

    /// Sets the preferred index.
    pub const fn preferred_index(&mut self, index: usize) -> &mut Self {
        self.preferred_index = Some(index);
        self
    }

    /// Inserts one entry into the custom data.
    pub fn custom_data(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.content.custom_data.insert(key.into(), value.into());
        self
    }

    /// Replaces the whole custom data map.
    pub fn set_custom_data(&mut self, data: Map<String, Value>) -> &mut Self {
        self.content.custom_data = data;
        self
    }

    /// Returns the builder for the child with `identifier`, creating it if needed.
    pub fn child_builder(&mut self, identifier: &str) -> &mut Self {
        self.children.get_or_insert(identifier, &self.defaults)
    }

    /// Returns true if a child builder exists for `identifier`.
    #[must_use]
    pub fn has_child_builder(&self, identifier: &str) -> bool {
        self.children.get(identifier).is_some()
    }

    /// Removes the child builder for `identifier`. Returns whether one existed.
    pub fn remove_child_builder(&mut self, identifier: &str) -> bool {
        self.children.remove(identifier)
    }

    /// Removes every child builder.
    pub fn remove_all_child_builders(&mut self) {
        self.children.clear();
    }

    /// Builds the model for the given position within its parent or root list.
    #[must_use]
    pub fn build_for_index(&self, index: usize) -> ComponentModel {
        ComponentModel {
            identifier: self.model_identifier.clone(),
            index,
            component_identifier: ComponentIdentifier::new(
                Some(self.component_namespace.clone()),
                self.component_name.clone(),
            ),
            content: self.content.clone(),
            children: self.children.build(),
        }
    }
}

// ============================================================================
// ViewModelBuilder
// ============================================================================

/// Mutable accumulator for a [`ViewModel`].
#[derive(Debug, Clone, Default)]
pub struct ViewModelBuilder {
    defaults: ComponentDefaults,
    /// Identifier of the view model.
    pub view_identifier: Option<String>,
    /// Title shown by the hosting navigation bar.
    pub navigation_title: Option<String>,
    /// Free-form data for the hosting view.
    pub custom_data: Map<String, Value>,
    header: Option<ComponentModelBuilder>,
    body: BuilderCollection,
    overlays: BuilderCollection,
}

impl ViewModelBuilder {
    /// Creates an empty builder using `defaults` for every component builder.
    #[must_use]
    pub fn new(defaults: ComponentDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    /// Returns the header builder, creating it if needed.
    pub fn header_builder(&mut self) -> &mut ComponentModelBuilder {
        let defaults = &self.defaults;
        self.header.get_or_insert_with(|| {
            ComponentModelBuilder::new(Some("header".to_string()), defaults.clone())
        })
    }

    /// Removes the header builder.
    pub fn remove_header_builder(&mut self) {
        self.header = None;
    }

    /// Returns the body builder for `identifier`, creating it if needed.
    pub fn body_builder(&mut self, identifier: &str) -> &mut ComponentModelBuilder {
        self.body.get_or_insert(identifier, &self.defaults)
    }

    /// Removes the body builder for `identifier`. Returns whether one existed.
    pub fn remove_body_builder(&mut self, identifier: &str) -> bool {
        self.body.remove(identifier)
    }

    /// Number of body builders.
    #[must_use]
    pub fn body_builder_count(&self) -> usize {
        self.body.len()
    }

    /// Returns the overlay builder for `identifier`, creating it if needed.
    pub fn overlay_builder(&mut self, identifier: &str) -> &mut ComponentModelBuilder {
        self.overlays.get_or_insert(identifier, &self.defaults)
    }

    /// Removes the overlay builder for `identifier`. Returns whether one existed.
    pub fn remove_overlay_builder(&mut self, identifier: &str) -> bool {
        self.overlays.remove(identifier)
    }

    /// Removes all content, keeping the defaults.
    pub fn remove_all(&mut self) {
        self.header = None;
        self.body.clear();
        self.overlays.clear();
        self.navigation_title = None;
        self.custom_data.clear();
    }

    /// Freezes the accumulated content into a [`ViewModel`].
    ///
    /// # Errors
    ///
    /// Propagates [`ViewModel::new`] errors. Body builders are keyed by
    /// identifier, so content assembled here never contains duplicates, but
    /// a builder whose component namespace or name was set to an unreadable
    /// value fails with [`ViewModelError::InvalidComponentIdentifier`]. The
    /// header and overlays are checked the same way.
    pub fn build(&self) -> Result<ViewModel, ViewModelError> {
        let header = self.header.as_ref().map(|builder| builder.build_for_index(0));
        let body = self.body.build();
        let overlays = self.overlays.build();

        ensure_valid_components(header.as_slice())?;
        ensure_valid_components(&overlays)?;

        debug!(
            body = body.len(),
            overlays = overlays.len(),
            header = header.is_some(),
            "built view model"
        );

        let mut view_model = ViewModel::new(body)?
            .with_header(header)
            .with_overlays(overlays)
            .with_custom_data(self.custom_data.clone());
        view_model.identifier.clone_from(&self.view_identifier);
        view_model.navigation_title.clone_from(&self.navigation_title);
        Ok(view_model)
    }
}
