//! Content models and view model diffing for `HubUI`.
//!
//! This crate holds the immutable data that flows from content operations to
//! the collection view:
//!
//! - [`ComponentIdentifier`] maps a model to the component rendering it,
//! - [`ComponentModel`] and [`ViewModel`] describe one version of the content,
//! - [`ComponentModelBuilder`] and [`ViewModelBuilder`] assemble them,
//! - [`diff`] computes the [`ViewModelDiff`] between two versions.
//!
//! # Example
//!
//! ```
//! use hubui_core::{ComponentDefaults, ViewModelBuilder, diff};
//!
//! let mut builder = ViewModelBuilder::new(ComponentDefaults::default());
//! builder.body_builder("a").title("A");
//! builder.body_builder("b").title("B");
//! let old = builder.build().unwrap();
//!
//! builder.body_builder("c").title("C");
//! let new = builder.build().unwrap();
//!
//! let changes = diff(&old, &new);
//! assert!(changes.is_inserted("c"));
//! assert_eq!(changes.apply(&old.body_identifiers()), new.body_identifiers());
//! ```

extern crate alloc;

mod builder;
pub mod diff;
mod error;
pub mod geometry;
mod identifier;
mod model;
mod view_model;

pub use builder::{
    ComponentDefaults, ComponentModelBuilder, ViewModelBuilder, build_component_models,
};
pub use diff::{DiffOperation, ViewModelDiff, diff};
pub use error::{IdentifierError, ViewModelError};
pub use geometry::{Point, Rect, Size};
pub use identifier::ComponentIdentifier;
pub use model::{ComponentContent, ComponentModel};
pub use view_model::ViewModel;
