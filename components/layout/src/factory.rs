//! Builds [`Layout`]s from view models.

use alloc::{
    boxed::Box,
    collections::{BTreeMap, BTreeSet},
    string::String,
    vec::Vec,
};
use core::ops::Range;

use hubui_core::{ComponentModel, DiffOperation, Point, Rect, Size, ViewModel, ViewModelDiff};
use tracing::{debug, warn};

use crate::{
    ComponentLayoutManager, ComponentRegistry, ContentEdge, DisappearingItem, ItemLayout, Layout,
    LayoutTraits,
};

/// Slack allowed when checking whether a compact item still fits its row.
const FIT_TOLERANCE: f32 = 0.001;

/// Per-identifier sizes replacing the preferred size of a component.
pub type SizeOverrides = BTreeMap<String, Size>;

/// A model measured against its resolved component.
struct Measured<'a> {
    model: &'a ComponentModel,
    traits: LayoutTraits,
    resolved: bool,
    size: Size,
}

/// Computes collection view layouts.
///
/// Body components flow in rows. Compact components share a row while they
/// fit between the edge margins, every other component gets a row of its
/// own. Rows stack vertically, separated by the layout manager's margins.
#[derive(Debug)]
pub struct LayoutFactory {
    registry: ComponentRegistry,
    layout_manager: Box<dyn ComponentLayoutManager>,
}

impl LayoutFactory {
    /// Creates a factory resolving components through `registry`.
    pub fn new(
        registry: ComponentRegistry,
        layout_manager: impl ComponentLayoutManager + 'static,
    ) -> Self {
        Self {
            registry,
            layout_manager: Box::new(layout_manager),
        }
    }

    /// Registry used to resolve components.
    #[must_use]
    pub const fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Mutable access to the registry, for late registrations.
    pub const fn registry_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.registry
    }

    /// Layout manager deciding margins.
    #[must_use]
    pub fn layout_manager(&self) -> &dyn ComponentLayoutManager {
        self.layout_manager.as_ref()
    }

    /// Builds the layout of `view_model` for a viewport of size `viewport`.
    ///
    /// With both `diff` and `previous_layout`, item layouts carry the frames
    /// to animate from and removed items are listed as disappearing. With
    /// `add_header_margin`, the body starts below the header instead of
    /// underneath it.
    #[must_use]
    pub fn build_layout(
        &self,
        viewport: Size,
        view_model: &ViewModel,
        diff: Option<&ViewModelDiff>,
        previous_layout: Option<&Layout>,
        add_header_margin: bool,
    ) -> Layout {
        self.build_layout_with_overrides(
            viewport,
            view_model,
            diff,
            previous_layout,
            add_header_margin,
            &SizeOverrides::new(),
        )
    }

    /// Same as [`build_layout`](Self::build_layout), with `overrides`
    /// replacing the size of the matching components. Overridden sizes are
    /// used as is, without fitting them to the available width.
    #[must_use]
    pub fn build_layout_with_overrides(
        &self,
        viewport: Size,
        view_model: &ViewModel,
        diff: Option<&ViewModelDiff>,
        previous_layout: Option<&Layout>,
        add_header_margin: bool,
        overrides: &SizeOverrides,
    ) -> Layout {
        let viewport = viewport.sanitized();

        let header = view_model
            .header()
            .map(|model| self.layout_header(model, viewport, overrides));

        let body_top = match &header {
            Some(header) if add_header_margin => {
                header.frame.max_y()
                    + non_negative(self.layout_manager.header_margin(header.traits))
            }
            _ => 0.0,
        };

        let measured: Vec<Measured<'_>> = view_model
            .body()
            .iter()
            .map(|model| self.measure(model, viewport, true, overrides))
            .collect();

        let rows = self.group_rows(&measured, viewport.width);
        let (frames, body_bottom) = self.place_rows(&measured, &rows, viewport.width, body_top);

        let mut items: Vec<ItemLayout> = measured
            .iter()
            .zip(frames)
            .map(|(item, frame)| ItemLayout {
                identifier: item.model.identifier().into(),
                index: item.model.index(),
                component_identifier: item.model.component_identifier().clone(),
                traits: item.traits,
                resolved: item.resolved,
                frame,
                initial_frame: None,
                children: self.layout_children(item.model, frame.size(), overrides),
            })
            .collect();

        let mut header = header;
        let mut disappearing = Vec::new();
        if let (Some(diff), Some(previous)) = (diff, previous_layout) {
            apply_transitions(&mut items, diff, previous);
            if let (Some(header), Some(old_header)) = (header.as_mut(), previous.header()) {
                header.initial_frame = Some(old_header.frame);
            }
            disappearing = disappearing_items(diff, previous);
        }

        let header_bottom = header.as_ref().map_or(0.0, |header| header.frame.max_y());
        let content_height = body_bottom.max(header_bottom);

        debug!(
            items = items.len(),
            rows = rows.len(),
            disappearing = disappearing.len(),
            content_height,
            "built collection view layout"
        );

        Layout {
            viewport,
            header,
            items,
            disappearing,
            content_size: Size::new(viewport.width, content_height),
        }
    }

    /// Resolves the component for `model` and asks it for a size.
    ///
    /// Unresolved components measure as zero; one malformed model must not
    /// prevent the rest of the content from rendering.
    fn measure<'a>(
        &self,
        model: &'a ComponentModel,
        container: Size,
        apply_edge_margins: bool,
        overrides: &SizeOverrides,
    ) -> Measured<'a> {
        let Some(component) = self.registry.create_component(model.component_identifier()) else {
            warn!(
                identifier = model.identifier(),
                component = %model.component_identifier(),
                "no component registered; laying out with zero size"
            );
            return Measured {
                model,
                traits: LayoutTraits::empty(),
                resolved: false,
                size: Size::zero(),
            };
        };

        let traits = component.layout_traits();
        let available = if apply_edge_margins {
            self.available_width(traits, container.width)
        } else {
            container.width
        };

        // Requested sizes are applied as is, even past the available width.
        if let Some(size) = overrides.get(model.identifier()) {
            return Measured {
                model,
                traits,
                resolved: true,
                size: size.sanitized(),
            };
        }

        let preferred = component
            .preferred_view_size(model, Size::new(available, container.height))
            .sanitized();

        let width = if traits.contains(LayoutTraits::FULL_WIDTH) {
            available
        } else {
            preferred.width.min(available)
        };

        Measured {
            model,
            traits,
            resolved: true,
            size: Size::new(width, preferred.height),
        }
    }

    fn available_width(&self, traits: LayoutTraits, width: f32) -> f32 {
        let left = self.edge_margin(traits, ContentEdge::Left);
        let right = self.edge_margin(traits, ContentEdge::Right);
        (width - left - right).max(0.0)
    }

    fn edge_margin(&self, traits: LayoutTraits, edge: ContentEdge) -> f32 {
        non_negative(self.layout_manager.margin_to_content_edge(traits, edge))
    }

    fn layout_header(&self, model: &ComponentModel, viewport: Size, overrides: &SizeOverrides) -> ItemLayout {
        let measured = self.measure(model, viewport, false, overrides);
        let width = if overrides.contains_key(model.identifier()) {
            measured.size.width
        } else {
            viewport.width
        };
        let frame = Rect::new(Point::zero(), Size::new(width, measured.size.height));

        ItemLayout {
            identifier: model.identifier().into(),
            index: model.index(),
            component_identifier: model.component_identifier().clone(),
            traits: measured.traits,
            resolved: measured.resolved,
            frame,
            initial_frame: None,
            children: self.layout_children(model, frame.size(), overrides),
        }
    }

    /// Groups consecutive items into rows.
    fn group_rows(&self, measured: &[Measured<'_>], viewport_width: f32) -> Vec<Range<usize>> {
        let mut rows = Vec::new();
        let mut start = 0;
        let mut row_max_x = 0.0;

        for (index, item) in measured.iter().enumerate() {
            if index > start {
                let previous = &measured[index - 1];
                let x = row_max_x
                    + non_negative(self.layout_manager.horizontal_margin(item.traits, previous.traits));
                let limit = viewport_width - self.edge_margin(item.traits, ContentEdge::Right);
                let shares_row = is_compact(item)
                    && is_compact(previous)
                    && x + item.size.width <= limit + FIT_TOLERANCE;

                if shares_row {
                    row_max_x = x + item.size.width;
                    continue;
                }

                rows.push(start..index);
                start = index;
            }
            row_max_x = self.edge_margin(item.traits, ContentEdge::Left) + item.size.width;
        }

        if start < measured.len() {
            rows.push(start..measured.len());
        }
        rows
    }

    /// Places rows top to bottom. Returns one frame per item and the content bottom.
    fn place_rows(
        &self,
        measured: &[Measured<'_>],
        rows: &[Range<usize>],
        viewport_width: f32,
        body_top: f32,
    ) -> (Vec<Rect>, f32) {
        let mut frames = Vec::with_capacity(measured.len());
        let mut previous_row: Option<(LayoutTraits, f32)> = None;

        for row in rows {
            let items = &measured[row.clone()];
            let traits = row_traits(items);

            let y = match previous_row {
                None => body_top + self.edge_margin(traits, ContentEdge::Top),
                Some((above, bottom)) => {
                    bottom + non_negative(self.layout_manager.vertical_margin(traits, above))
                }
            };

            let row_start = frames.len();
            let mut x = 0.0;
            let mut height: f32 = 0.0;
            for (offset, item) in items.iter().enumerate() {
                x = if offset == 0 {
                    self.edge_margin(item.traits, ContentEdge::Left)
                } else {
                    let preceding = &items[offset - 1];
                    x + preceding.size.width
                        + non_negative(self.layout_manager.horizontal_margin(item.traits, preceding.traits))
                };
                frames.push(Rect::new(Point::new(x, y), item.size));
                height = height.max(item.size.height);
            }

            if traits.contains(LayoutTraits::CENTERED) {
                center_row(&mut frames[row_start..], viewport_width);
            }

            previous_row = Some((traits, y + height));
        }

        let bottom = match previous_row {
            None => body_top,
            Some((traits, bottom)) => bottom + self.edge_margin(traits, ContentEdge::Bottom),
        };
        (frames, bottom)
    }

    /// Stacks child components vertically inside their parent.
    fn layout_children(
        &self,
        model: &ComponentModel,
        parent_size: Size,
        overrides: &SizeOverrides,
    ) -> Vec<ItemLayout> {
        let mut y = 0.0;
        model
            .children()
            .iter()
            .map(|child| {
                let measured = self.measure(child, parent_size, false, overrides);
                let frame = Rect::new(Point::new(0.0, y), measured.size);
                y += measured.size.height;

                ItemLayout {
                    identifier: child.identifier().into(),
                    index: child.index(),
                    component_identifier: child.component_identifier().clone(),
                    traits: measured.traits,
                    resolved: measured.resolved,
                    frame,
                    initial_frame: None,
                    children: self.layout_children(child, measured.size, overrides),
                }
            })
            .collect()
    }
}

fn is_compact(item: &Measured<'_>) -> bool {
    item.traits.contains(LayoutTraits::COMPACT_WIDTH)
}

/// Traits shared by every item of a row.
fn row_traits(items: &[Measured<'_>]) -> LayoutTraits {
    items
        .iter()
        .fold(LayoutTraits::all(), |traits, item| traits & item.traits)
}

fn center_row(frames: &mut [Rect], viewport_width: f32) {
    let (Some(first), Some(last)) = (frames.first(), frames.last()) else {
        return;
    };
    let row_width = last.max_x() - first.x();
    if row_width > viewport_width {
        return;
    }
    let shift = (viewport_width - row_width) / 2.0 - first.x();
    for frame in frames {
        *frame = frame.offset_by(shift, 0.0);
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

fn collapsed(frame: Rect) -> Rect {
    frame.with_size(Size::new(frame.width(), 0.0))
}

fn apply_transitions(items: &mut [ItemLayout], diff: &ViewModelDiff, previous: &Layout) {
    let inserted: BTreeSet<&str> = diff.insertions().map(DiffOperation::identifier).collect();

    for item in items {
        item.initial_frame = if inserted.contains(item.identifier.as_str()) {
            Some(collapsed(item.frame))
        } else {
            previous.frame(&item.identifier)
        };
    }
}

fn disappearing_items(diff: &ViewModelDiff, previous: &Layout) -> Vec<DisappearingItem> {
    diff.removals()
        .filter_map(|operation| {
            let old = previous.item(operation.identifier())?;
            Some(DisappearingItem {
                identifier: old.identifier.clone(),
                old_index: operation.old_index().unwrap_or(old.index),
                frame: collapsed(old.frame),
            })
        })
        .collect()
}
