//! Collection view layouts for `HubUI`.
//!
//! This crate turns a [`ViewModel`](hubui_core::ViewModel) into the frames a
//! hosting collection view applies to its items. It contains:
//!
//! - the [`Component`] capability and its [`LayoutTraits`],
//! - the [`ComponentRegistry`] resolving component identifiers,
//! - the [`ComponentLayoutManager`] deciding margins,
//! - the [`LayoutFactory`] producing [`Layout`]s, including the starting
//!   frames needed to animate from a previous layout.
//!
//! # Logical Points
//!
//! All values are logical points, matching the host collection view.
//!
//! # Example
//!
//! ```rust,ignore
//! use hubui_layout::{ComponentRegistry, LayoutFactory, MarginLayoutManager};
//!
//! let factory = LayoutFactory::new(ComponentRegistry::new("default"), MarginLayoutManager::default());
//! let layout = factory.build_layout(viewport, &view_model, Some(&diff), Some(&previous), true);
//! for item in layout.items() {
//!     println!("{} -> {:?}", item.identifier(), item.frame());
//! }
//! ```

extern crate alloc;

pub mod component;
pub use component::{Component, ComponentFactory, ContentSizedComponent, LayoutTraits};

pub mod registry;
pub use registry::{ComponentRegistry, RegistryError};

pub mod manager;
pub use manager::{ComponentLayoutManager, ContentEdge, MarginLayoutManager};

mod layout;
pub use layout::{DisappearingItem, ItemLayout, Layout};

pub mod factory;
pub use factory::{LayoutFactory, SizeOverrides};

#[cfg(test)]
mod tests;
