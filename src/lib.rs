#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod controller;
pub mod logging;

pub use config::HubConfig;
pub use controller::{CollectionView, ContentController, ContentUpdate, Submission};

pub use hubui_animation as animation;
pub use hubui_layout as layout;

#[doc(inline)]
pub use hubui_core::{
    ComponentContent, ComponentDefaults, ComponentIdentifier, ComponentModel,
    ComponentModelBuilder, DiffOperation, IdentifierError, Point, Rect, Size, ViewModel,
    ViewModelBuilder, ViewModelDiff, ViewModelError, diff, geometry,
};

pub mod prelude {
    //! Commonly used types, importable in one `use` statement.
    //!
    //! # Example
    //!
    //! ```rust
    //! use hubui::prelude::*;
    //!
    //! let identifier: ComponentIdentifier = "spotify:row".parse().unwrap();
    //! assert_eq!(identifier.namespace(), Some("spotify"));
    //! ```
    pub use super::{CollectionView, ContentController, ContentUpdate, HubConfig, Submission};

    pub use hubui_animation::{
        AnimationPerformer, CommitHandler, ComponentViewHost, ResizeAnimation,
    };
    pub use hubui_core::{
        ComponentDefaults, ComponentIdentifier, ComponentModel, ComponentModelBuilder, Point,
        Rect, Size, ViewModel, ViewModelBuilder, ViewModelDiff, diff,
    };
    pub use hubui_layout::{
        Component, ComponentFactory, ComponentRegistry, Layout, LayoutFactory, LayoutTraits,
        MarginLayoutManager,
    };
}
