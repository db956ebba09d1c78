//! Component models.
//!
//! A [`ComponentModel`] is the immutable description of one renderable unit.
//! Models are produced by [`ComponentModelBuilder`](crate::ComponentModelBuilder)
//! and never mutated afterwards; a content update rebuilds them wholesale.

use alloc::{string::String, vec::Vec};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ComponentIdentifier, Size};

/// Immutable description of a single component and its nested children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentModel {
    pub(crate) identifier: String,
    pub(crate) index: usize,
    pub(crate) component_identifier: ComponentIdentifier,
    #[serde(default)]
    pub(crate) content: ComponentContent,
    #[serde(default)]
    pub(crate) children: Vec<ComponentModel>,
}

/// Size-affecting payload of a component model.
///
/// Two models with the same identifier but different content are rendered
/// with a reload rather than kept as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentContent {
    /// Primary text.
    pub title: Option<String>,
    /// Secondary text.
    pub subtitle: Option<String>,
    /// Short text rendered next to the main content.
    pub accessory_title: Option<String>,
    /// Longer descriptive text.
    pub description_text: Option<String>,
    /// Explicit size requested by the content, honored by components that
    /// do not compute their own.
    pub preferred_size: Option<Size>,
    /// Free-form data consumed by specific components.
    pub custom_data: Map<String, Value>,
}

impl ComponentContent {
    /// Returns true if both payloads render the same thing.
    ///
    /// Preferred sizes are compared bit for bit, so content is always
    /// equivalent to itself even when a size holds NaN.
    #[must_use]
    pub fn is_equivalent_to(&self, other: &Self) -> bool {
        let same_size = match (self.preferred_size, other.preferred_size) {
            (Some(lhs), Some(rhs)) => lhs.is_identical_to(&rhs),
            (lhs, rhs) => lhs.is_none() && rhs.is_none(),
        };
        same_size
            && self.title == other.title
            && self.subtitle == other.subtitle
            && self.accessory_title == other.accessory_title
            && self.description_text == other.description_text
            && self.custom_data == other.custom_data
    }
}

impl ComponentModel {
    /// Creates a model directly from its parts.
    ///
    /// Most callers go through [`ComponentModelBuilder`](crate::ComponentModelBuilder).
    pub fn new(
        identifier: impl Into<String>,
        index: usize,
        component_identifier: ComponentIdentifier,
        content: ComponentContent,
        children: Vec<Self>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            index,
            component_identifier,
            content,
            children,
        }
    }

    /// Stable identifier tracking this model across view model versions.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Position within the parent, or within the root list for top-level models.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Identifier of the component that renders this model.
    #[must_use]
    pub const fn component_identifier(&self) -> &ComponentIdentifier {
        &self.component_identifier
    }

    /// Content payload.
    #[must_use]
    pub const fn content(&self) -> &ComponentContent {
        &self.content
    }

    /// Shortcut for the content title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.content.title.as_deref()
    }

    /// Shortcut for the preferred size requested by the content.
    #[must_use]
    pub const fn preferred_size(&self) -> Option<Size> {
        self.content.preferred_size
    }

    /// Nested child models, in display order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns the child at `index`, if any.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    /// Returns the direct child with the given identifier, if any.
    #[must_use]
    pub fn child_with_identifier(&self, identifier: &str) -> Option<&Self> {
        self.children
            .iter()
            .find(|child| child.identifier == identifier)
    }

    /// Returns true if both models render the same thing.
    ///
    /// Positions are ignored, at this level and for every child, so a model
    /// that only moved is still equivalent to its previous version.
    #[must_use]
    pub fn is_equivalent_to(&self, other: &Self) -> bool {
        self.identifier == other.identifier
            && self.component_identifier == other.component_identifier
            && self.content.is_equivalent_to(&other.content)
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(lhs, rhs)| lhs.is_equivalent_to(rhs))
    }
}
