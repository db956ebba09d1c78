//! Computed layouts handed to the hosting collection view.

use alloc::{string::String, vec::Vec};

use hubui_core::{ComponentIdentifier, Point, Rect, Size};

use crate::LayoutTraits;

/// Frame and transition data for one component.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemLayout {
    pub(crate) identifier: String,
    pub(crate) index: usize,
    pub(crate) component_identifier: ComponentIdentifier,
    pub(crate) traits: LayoutTraits,
    pub(crate) resolved: bool,
    pub(crate) frame: Rect,
    pub(crate) initial_frame: Option<Rect>,
    pub(crate) children: Vec<ItemLayout>,
}

impl ItemLayout {
    /// Identifier of the laid out model.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Position of the model in its list.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Identifier of the component rendering the model.
    #[must_use]
    pub const fn component_identifier(&self) -> &ComponentIdentifier {
        &self.component_identifier
    }

    /// Layout traits of the resolved component. Empty when unresolved.
    #[must_use]
    pub const fn traits(&self) -> LayoutTraits {
        self.traits
    }

    /// Returns false if no component could be resolved for the model.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Final frame. Top-level frames are in content coordinates, child
    /// frames are relative to their parent's frame.
    #[must_use]
    pub const fn frame(&self) -> Rect {
        self.frame
    }

    /// Frame to animate from, when the layout was built from a diff.
    ///
    /// Kept items start from their previous frame; inserted items start
    /// collapsed at their final origin.
    #[must_use]
    pub const fn initial_frame(&self) -> Option<Rect> {
        self.initial_frame
    }

    /// Layouts of nested child components.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }
}

/// A removed item still animating out.
#[derive(Debug, Clone, PartialEq)]
pub struct DisappearingItem {
    pub(crate) identifier: String,
    pub(crate) old_index: usize,
    pub(crate) frame: Rect,
}

impl DisappearingItem {
    /// Identifier of the removed model.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Position the model had in the previous view model.
    #[must_use]
    pub const fn old_index(&self) -> usize {
        self.old_index
    }

    /// Frame to animate towards: collapsed at the previous origin.
    #[must_use]
    pub const fn frame(&self) -> Rect {
        self.frame
    }
}

/// Frames for every component of one view model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub(crate) viewport: Size,
    pub(crate) header: Option<ItemLayout>,
    pub(crate) items: Vec<ItemLayout>,
    pub(crate) disappearing: Vec<DisappearingItem>,
    pub(crate) content_size: Size,
}

impl Layout {
    /// Viewport size the layout was computed for.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Header layout, if the view model has a header.
    #[must_use]
    pub const fn header(&self) -> Option<&ItemLayout> {
        self.header.as_ref()
    }

    /// Body item layouts, in view model order.
    #[must_use]
    pub fn items(&self) -> &[ItemLayout] {
        &self.items
    }

    /// Removed items animating out.
    #[must_use]
    pub fn disappearing(&self) -> &[DisappearingItem] {
        &self.disappearing
    }

    /// Total scrollable size.
    #[must_use]
    pub const fn content_size(&self) -> Size {
        self.content_size
    }

    /// Returns the body item with `identifier`.
    #[must_use]
    pub fn item(&self, identifier: &str) -> Option<&ItemLayout> {
        self.items.iter().find(|item| item.identifier == identifier)
    }

    /// Returns the frame of the body item with `identifier`.
    #[must_use]
    pub fn frame(&self, identifier: &str) -> Option<Rect> {
        self.item(identifier).map(ItemLayout::frame)
    }

    /// Body items whose frame intersects `rect`.
    #[must_use]
    pub fn items_in_rect(&self, rect: Rect) -> Vec<&ItemLayout> {
        self.items
            .iter()
            .filter(|item| item.frame.intersects(&rect))
            .collect()
    }

    /// Content offset that keeps the viewport steady across a relayout.
    ///
    /// `offset` is the offset used with `previous`. The first body item that
    /// was visible in `previous` and survives in `self` is kept at the same
    /// position on screen. An offset at the top stays at the top. The result
    /// is clamped to the scrollable range of `self`.
    #[must_use]
    pub fn target_content_offset(&self, previous: &Self, offset: Point, viewport: Size) -> Point {
        let max_y = (self.content_size.height - viewport.height).max(0.0);
        if offset.y <= 0.0 {
            return Point::new(offset.x, 0.0);
        }

        let anchor = previous
            .items
            .iter()
            .filter(|item| item.frame.max_y() > offset.y)
            .find_map(|item| {
                self.frame(&item.identifier)
                    .map(|frame| frame.y() - item.frame.y())
            });

        let y = offset.y + anchor.unwrap_or(0.0);
        Point::new(offset.x, y.clamp(0.0, max_y))
    }
}
