//! The root content container.

use alloc::{
    collections::BTreeSet,
    string::{String, ToString},
    vec::Vec,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ComponentModel, ViewModelError};

/// One immutable version of the content displayed by a collection view.
///
/// A view model is rebuilt wholesale for every content update. The diff
/// engine only ever reads it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawViewModel")]
pub struct ViewModel {
    pub(crate) identifier: Option<String>,
    pub(crate) navigation_title: Option<String>,
    pub(crate) header: Option<ComponentModel>,
    pub(crate) body: Vec<ComponentModel>,
    pub(crate) overlays: Vec<ComponentModel>,
    pub(crate) custom_data: Map<String, Value>,
}

/// Unchecked wire form, validated into a [`ViewModel`].
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawViewModel {
    identifier: Option<String>,
    navigation_title: Option<String>,
    header: Option<ComponentModel>,
    body: Vec<ComponentModel>,
    overlays: Vec<ComponentModel>,
    custom_data: Map<String, Value>,
}

impl TryFrom<RawViewModel> for ViewModel {
    type Error = ViewModelError;

    fn try_from(raw: RawViewModel) -> Result<Self, Self::Error> {
        ensure_unique(&raw.body)?;
        Ok(Self {
            identifier: raw.identifier,
            navigation_title: raw.navigation_title,
            header: raw.header,
            body: raw.body,
            overlays: raw.overlays,
            custom_data: raw.custom_data,
        })
    }
}

impl ViewModel {
    /// Creates a view model around the given body models.
    ///
    /// # Errors
    ///
    /// Returns [`ViewModelError::DuplicateIdentifier`] if two body models share
    /// an identifier. Diffing relies on identifiers being unique. Returns
    /// [`ViewModelError::InvalidComponentIdentifier`] if a body model or one
    /// of its children names a component identifier that does not
    /// [`validate`](crate::ComponentIdentifier::validate).
    pub fn new(body: Vec<ComponentModel>) -> Result<Self, ViewModelError> {
        ensure_unique(&body)?;
        ensure_valid_components(&body)?;
        Ok(Self {
            body,
            ..Self::default()
        })
    }

    /// Creates a view model without any content.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replaces the header model.
    #[must_use]
    pub fn with_header(mut self, header: Option<ComponentModel>) -> Self {
        self.header = header;
        self
    }

    /// Replaces the overlay models.
    #[must_use]
    pub fn with_overlays(mut self, overlays: Vec<ComponentModel>) -> Self {
        self.overlays = overlays;
        self
    }

    /// Replaces the custom data.
    #[must_use]
    pub fn with_custom_data(mut self, custom_data: Map<String, Value>) -> Self {
        self.custom_data = custom_data;
        self
    }

    /// Sets the navigation title.
    #[must_use]
    pub fn with_navigation_title(mut self, title: impl Into<String>) -> Self {
        self.navigation_title = Some(title.into());
        self
    }

    /// Identifier of this view model, if any.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Title for the hosting navigation bar.
    #[must_use]
    pub fn navigation_title(&self) -> Option<&str> {
        self.navigation_title.as_deref()
    }

    /// Header model rendered above the body.
    #[must_use]
    pub const fn header(&self) -> Option<&ComponentModel> {
        self.header.as_ref()
    }

    /// Body models, in display order.
    #[must_use]
    pub fn body(&self) -> &[ComponentModel] {
        &self.body
    }

    /// Overlay models rendered on top of the body.
    #[must_use]
    pub fn overlays(&self) -> &[ComponentModel] {
        &self.overlays
    }

    /// Custom data attached by the content operations.
    #[must_use]
    pub const fn custom_data(&self) -> &Map<String, Value> {
        &self.custom_data
    }

    /// Returns true if the body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Body model identifiers, in display order.
    #[must_use]
    pub fn body_identifiers(&self) -> Vec<&str> {
        self.body.iter().map(ComponentModel::identifier).collect()
    }

    /// Returns the body model with `identifier`, if any.
    #[must_use]
    pub fn body_model(&self, identifier: &str) -> Option<&ComponentModel> {
        self.body.iter().find(|model| model.identifier() == identifier)
    }

    /// Returns true if the body contains a model with `identifier`.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.body_model(identifier).is_some()
    }
}

fn ensure_unique(models: &[ComponentModel]) -> Result<(), ViewModelError> {
    let mut seen = BTreeSet::new();
    for model in models {
        if !seen.insert(model.identifier()) {
            return Err(ViewModelError::DuplicateIdentifier(
                model.identifier().to_string(),
            ));
        }
    }
    Ok(())
}

/// Checks the component identifier of every model and child model.
pub(crate) fn ensure_valid_components(models: &[ComponentModel]) -> Result<(), ViewModelError> {
    for model in models {
        model
            .component_identifier()
            .validate()
            .map_err(|source| ViewModelError::InvalidComponentIdentifier {
                model: model.identifier().to_string(),
                source,
            })?;
        ensure_valid_components(model.children())?;
    }
    Ok(())
}
