//! Margins between components and the content edges.

use crate::LayoutTraits;

/// Edge of the collection view's content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentEdge {
    /// Top edge, above the first row.
    Top,
    /// Bottom edge, below the last row.
    Bottom,
    /// Left edge.
    Left,
    /// Right edge.
    Right,
}

/// Decides the spacing the layout factory leaves around components.
///
/// Negative values are treated as zero.
pub trait ComponentLayoutManager {
    /// Margin between a component and a content edge.
    fn margin_to_content_edge(&self, traits: LayoutTraits, edge: ContentEdge) -> f32;

    /// Vertical margin between a row and the row above it.
    fn vertical_margin(&self, traits: LayoutTraits, above: LayoutTraits) -> f32;

    /// Horizontal margin between a component and the one preceding it in its row.
    fn horizontal_margin(&self, traits: LayoutTraits, preceding: LayoutTraits) -> f32;

    /// Extra margin between the header and the first row, used when the body
    /// is laid out below the header.
    fn header_margin(&self, traits: LayoutTraits) -> f32;
}

impl core::fmt::Debug for dyn ComponentLayoutManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(core::any::type_name::<Self>())
    }
}

/// Layout manager driven by fixed margins.
///
/// Full-width components ignore the left and right margins, and two
/// stackable rows touch each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginLayoutManager {
    /// Margin to every content edge.
    pub content_edge_margin: f32,
    /// Margin between rows.
    pub vertical_spacing: f32,
    /// Margin between compact components sharing a row.
    pub horizontal_spacing: f32,
    /// Margin below the header.
    pub header_margin: f32,
}

impl Default for MarginLayoutManager {
    fn default() -> Self {
        Self {
            content_edge_margin: 15.0,
            vertical_spacing: 15.0,
            horizontal_spacing: 15.0,
            header_margin: 0.0,
        }
    }
}

impl ComponentLayoutManager for MarginLayoutManager {
    fn margin_to_content_edge(&self, traits: LayoutTraits, edge: ContentEdge) -> f32 {
        match edge {
            ContentEdge::Left | ContentEdge::Right
                if traits.contains(LayoutTraits::FULL_WIDTH) =>
            {
                0.0
            }
            _ => self.content_edge_margin,
        }
    }

    fn vertical_margin(&self, traits: LayoutTraits, above: LayoutTraits) -> f32 {
        if traits.contains(LayoutTraits::STACKABLE) && above.contains(LayoutTraits::STACKABLE) {
            0.0
        } else {
            self.vertical_spacing
        }
    }

    fn horizontal_margin(&self, _traits: LayoutTraits, _preceding: LayoutTraits) -> f32 {
        self.horizontal_spacing
    }

    fn header_margin(&self, _traits: LayoutTraits) -> f32 {
        self.header_margin
    }
}
