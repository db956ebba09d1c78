//! Component capabilities consulted during layout.
//!
//! The layout factory never knows concrete component types. It resolves a
//! [`Component`] for each model through the
//! [`ComponentRegistry`](crate::ComponentRegistry) and asks it two things:
//! which [`LayoutTraits`] it has, and how large it wants to be.

use alloc::boxed::Box;
use core::{any::type_name, fmt::Debug};

use hubui_core::{ComponentModel, Size};

bitflags::bitflags! {
    /// Traits describing how a component wants to be laid out.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LayoutTraits: u8 {
        /// Spans the full width of the collection view, ignoring edge margins.
        const FULL_WIDTH = 0b0001;
        /// May share a row with other compact components.
        const COMPACT_WIDTH = 0b0010;
        /// Stacks directly on top of other stackable components, with no margin.
        const STACKABLE = 0b0100;
        /// Rows made only of centered components are centered horizontally.
        const CENTERED = 0b1000;
    }
}

/// A component implementation, as seen by the layout pass.
pub trait Component {
    /// Layout traits of this component.
    fn layout_traits(&self) -> LayoutTraits;

    /// Size the component wants in order to display `model`.
    ///
    /// `container_size` is the space available between the content edge
    /// margins. Returned sizes are sanitized and clamped by the caller.
    fn preferred_view_size(&self, model: &ComponentModel, container_size: Size) -> Size;
}

impl Debug for dyn Component {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(type_name::<Self>())
    }
}

/// Creates components for the names within one namespace.
pub trait ComponentFactory {
    /// Creates the component called `name`, or `None` if unknown.
    fn create_component(&self, name: &str) -> Option<Box<dyn Component>>;
}

impl Debug for dyn ComponentFactory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(type_name::<Self>())
    }
}

impl<F> ComponentFactory for F
where
    F: Fn(&str) -> Option<Box<dyn Component>>,
{
    fn create_component(&self, name: &str) -> Option<Box<dyn Component>> {
        self(name)
    }
}

/// A component sized by its model's content.
///
/// Uses [`ComponentModel::preferred_size`] when present, otherwise the
/// container width and `fallback_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentSizedComponent {
    traits: LayoutTraits,
    fallback_height: f32,
}

impl ContentSizedComponent {
    /// Creates a component with the given traits and fallback height.
    #[must_use]
    pub const fn new(traits: LayoutTraits, fallback_height: f32) -> Self {
        Self {
            traits,
            fallback_height,
        }
    }
}

impl Component for ContentSizedComponent {
    fn layout_traits(&self) -> LayoutTraits {
        self.traits
    }

    fn preferred_view_size(&self, model: &ComponentModel, container_size: Size) -> Size {
        model
            .preferred_size()
            .unwrap_or_else(|| Size::new(container_size.width, self.fallback_height))
    }
}
