//! Layout factory tests.
//!
//! These tests pin down how the factory flows components into rows, how it
//! recovers from unresolved components, and which frames it hands out for
//! animating between two layouts.

use alloc::{boxed::Box, format, string::String, vec, vec::Vec};

use hubui_core::{
    ComponentContent, ComponentIdentifier, ComponentModel, Point, Rect, Size, ViewModel, diff,
};

use crate::{
    Component, ComponentRegistry, ContentSizedComponent, Layout, LayoutFactory, LayoutTraits,
    MarginLayoutManager, SizeOverrides,
};

// ============================================================================
// Test Infrastructure
// ============================================================================

const VIEWPORT: Size = Size::new(320.0, 480.0);

/// A component that always asks for the same size.
struct FixedComponent {
    traits: LayoutTraits,
    size: Size,
}

impl Component for FixedComponent {
    fn layout_traits(&self) -> LayoutTraits {
        self.traits
    }
    fn preferred_view_size(&self, _model: &ComponentModel, _container_size: Size) -> Size {
        self.size
    }
}

/// A component whose height grows when its text has to wrap.
struct WrappingTextComponent {
    intrinsic_width: f32,
    line_height: f32,
}

impl Component for WrappingTextComponent {
    fn layout_traits(&self) -> LayoutTraits {
        LayoutTraits::empty()
    }
    fn preferred_view_size(&self, _model: &ComponentModel, container_size: Size) -> Size {
        if container_size.width < self.intrinsic_width {
            let lines = (self.intrinsic_width / container_size.width).ceil();
            Size::new(container_size.width, lines * self.line_height)
        } else {
            Size::new(self.intrinsic_width, self.line_height)
        }
    }
}

fn fixed(traits: LayoutTraits, width: f32, height: f32) -> Box<dyn Component> {
    Box::new(FixedComponent {
        traits,
        size: Size::new(width, height),
    })
}

fn components(name: &str) -> Option<Box<dyn Component>> {
    let component: Box<dyn Component> = match name {
        "row" => fixed(LayoutTraits::FULL_WIDTH, 0.0, 50.0),
        "card" => fixed(LayoutTraits::COMPACT_WIDTH, 100.0, 100.0),
        "centered" => fixed(LayoutTraits::COMPACT_WIDTH | LayoutTraits::CENTERED, 80.0, 40.0),
        "stack" => fixed(LayoutTraits::FULL_WIDTH | LayoutTraits::STACKABLE, 0.0, 30.0),
        "text" => Box::new(WrappingTextComponent {
            intrinsic_width: 600.0,
            line_height: 20.0,
        }),
        "content" => Box::new(ContentSizedComponent::new(LayoutTraits::FULL_WIDTH, 44.0)),
        _ => return None,
    };
    Some(component)
}

fn factory_with(manager: MarginLayoutManager) -> LayoutFactory {
    let mut registry = ComponentRegistry::new("test");
    registry
        .register_factory("test", components)
        .expect("namespace is free");
    LayoutFactory::new(registry, manager)
}

fn factory() -> LayoutFactory {
    factory_with(MarginLayoutManager::default())
}

fn model(id: &str, component: &str) -> ComponentModel {
    ComponentModel::new(
        id,
        0,
        ComponentIdentifier::new(None::<String>, component),
        ComponentContent::default(),
        Vec::new(),
    )
}

fn view_model(items: &[(&str, &str)]) -> ViewModel {
    ViewModel::new(
        items
            .iter()
            .map(|(id, component)| model(id, component))
            .collect(),
    )
    .expect("identifiers are unique")
}

fn frame(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect::new(Point::new(x, y), Size::new(width, height))
}

/// Checks that items never overlap, empty ones included.
///
/// Items sharing a row start at the same y and follow each other left to
/// right. Items in later rows start at or below the bottom of every earlier
/// item, which also holds for zero-size items that `Rect::intersects`
/// ignores.
fn assert_no_overlap(layout: &Layout) {
    let items = layout.items();
    for (i, lhs) in items.iter().enumerate() {
        for rhs in &items[i + 1..] {
            let (upper, lower) = (lhs.frame(), rhs.frame());
            let same_row = upper.y() == lower.y() && upper.overlaps_vertically(&lower);
            let ordered = if same_row {
                upper.max_x() <= lower.x()
            } else {
                !upper.overlaps_vertically(&lower) && upper.max_y() <= lower.y()
            };
            assert!(
                ordered,
                "{} {:?} overlaps {} {:?}",
                lhs.identifier(),
                upper,
                rhs.identifier(),
                lower
            );
        }
    }
}

// ============================================================================
// Row Flow
// ============================================================================

#[test]
fn test_full_width_rows_stack_vertically() {
    let layout = factory().build_layout(
        VIEWPORT,
        &view_model(&[("a", "row"), ("b", "row")]),
        None,
        None,
        false,
    );

    assert_eq!(layout.frame("a"), Some(frame(0.0, 15.0, 320.0, 50.0)));
    assert_eq!(layout.frame("b"), Some(frame(0.0, 80.0, 320.0, 50.0)));
    assert_eq!(layout.content_size(), Size::new(320.0, 145.0));
}

#[test]
fn test_compact_components_share_rows_while_they_fit() {
    let layout = factory().build_layout(
        VIEWPORT,
        &view_model(&[("a", "card"), ("b", "card"), ("c", "card"), ("d", "card")]),
        None,
        None,
        false,
    );

    assert_eq!(layout.frame("a"), Some(frame(15.0, 15.0, 100.0, 100.0)));
    assert_eq!(layout.frame("b"), Some(frame(130.0, 15.0, 100.0, 100.0)));
    assert_eq!(layout.frame("c"), Some(frame(15.0, 130.0, 100.0, 100.0)));
    assert_eq!(layout.frame("d"), Some(frame(130.0, 130.0, 100.0, 100.0)));
    assert_eq!(layout.content_size().height, 245.0);
}

#[test]
fn test_full_width_component_breaks_compact_row() {
    let layout = factory().build_layout(
        VIEWPORT,
        &view_model(&[("a", "card"), ("b", "row"), ("c", "card")]),
        None,
        None,
        false,
    );

    assert_eq!(layout.frame("a").unwrap().y(), 15.0);
    assert_eq!(layout.frame("b").unwrap().y(), 130.0);
    assert_eq!(layout.frame("c").unwrap().y(), 195.0);
    assert_eq!(layout.frame("c").unwrap().x(), 15.0);
}

#[test]
fn test_centered_row_is_centered() {
    let layout = factory().build_layout(
        VIEWPORT,
        &view_model(&[("a", "centered"), ("b", "centered")]),
        None,
        None,
        false,
    );

    assert_eq!(layout.frame("a"), Some(frame(72.5, 15.0, 80.0, 40.0)));
    assert_eq!(layout.frame("b"), Some(frame(167.5, 15.0, 80.0, 40.0)));
}

#[test]
fn test_stackable_rows_touch() {
    let layout = factory().build_layout(
        VIEWPORT,
        &view_model(&[("a", "stack"), ("b", "stack"), ("c", "row")]),
        None,
        None,
        false,
    );

    assert_eq!(layout.frame("a").unwrap().y(), 15.0);
    assert_eq!(layout.frame("b").unwrap().y(), 45.0);
    assert_eq!(layout.frame("c").unwrap().y(), 90.0);
}

#[test]
fn test_width_dependent_height() {
    let layout = factory().build_layout(
        VIEWPORT,
        &view_model(&[("a", "text")]),
        None,
        None,
        false,
    );

    // 290pt between the margins wraps 600pt of text onto three lines.
    assert_eq!(layout.frame("a"), Some(frame(15.0, 15.0, 290.0, 60.0)));
}

#[test]
fn test_content_sized_component_uses_model_size() {
    let content = ComponentContent {
        preferred_size: Some(Size::new(100.0, 120.0)),
        ..ComponentContent::default()
    };
    let sized = ComponentModel::new(
        "a",
        0,
        ComponentIdentifier::new(None::<String>, "content"),
        content,
        Vec::new(),
    );
    let view_model = ViewModel::new(vec![sized, model("b", "content")]).unwrap();

    let layout = factory().build_layout(VIEWPORT, &view_model, None, None, false);

    assert_eq!(layout.frame("a").unwrap().height(), 120.0);
    assert_eq!(layout.frame("b").unwrap().height(), 44.0);
}

#[test]
fn test_overrides_replace_preferred_size() {
    let mut overrides = SizeOverrides::new();
    overrides.insert("a".into(), Size::new(200.0, 120.0));

    let layout = factory().build_layout_with_overrides(
        VIEWPORT,
        &view_model(&[("a", "card"), ("b", "card")]),
        None,
        None,
        false,
        &overrides,
    );

    assert_eq!(layout.frame("a"), Some(frame(15.0, 15.0, 200.0, 120.0)));
    // The widened card no longer leaves room for its neighbour.
    assert_eq!(layout.frame("b").unwrap().y(), 150.0);
}

#[test]
fn test_overrides_bypass_row_width() {
    let mut overrides = SizeOverrides::new();
    overrides.insert("a".into(), Size::new(100.0, 40.0));
    overrides.insert("b".into(), Size::new(500.0, 40.0));

    let layout = factory().build_layout_with_overrides(
        VIEWPORT,
        &view_model(&[("a", "row"), ("b", "card")]),
        None,
        None,
        false,
        &overrides,
    );

    assert_eq!(layout.frame("a"), Some(frame(0.0, 15.0, 100.0, 40.0)));
    assert_eq!(layout.frame("b"), Some(frame(15.0, 70.0, 500.0, 40.0)));
}

// ============================================================================
// Header
// ============================================================================

#[test]
fn test_header_margin_pushes_body_below_header() {
    let manager = MarginLayoutManager {
        header_margin: 10.0,
        ..MarginLayoutManager::default()
    };
    let view_model = view_model(&[("a", "row")]).with_header(Some(model("header", "row")));
    let factory = factory_with(manager);

    let with_margin = factory.build_layout(VIEWPORT, &view_model, None, None, true);
    let header = with_margin.header().expect("header is laid out");
    assert_eq!(header.frame(), frame(0.0, 0.0, 320.0, 50.0));
    assert_eq!(with_margin.frame("a").unwrap().y(), 75.0);
    assert_eq!(with_margin.content_size().height, 140.0);

    let without_margin = factory.build_layout(VIEWPORT, &view_model, None, None, false);
    assert_eq!(without_margin.frame("a").unwrap().y(), 15.0);
}

#[test]
fn test_header_transitions_from_previous_header() {
    let factory = factory();
    let old = view_model(&[("a", "row")]).with_header(Some(model("header", "row")));
    let new = view_model(&[("a", "row"), ("b", "row")]).with_header(Some(model("header", "card")));

    let previous = factory.build_layout(VIEWPORT, &old, None, None, true);
    let changes = diff(&old, &new);
    let layout = factory.build_layout(VIEWPORT, &new, Some(&changes), Some(&previous), true);

    let header = layout.header().expect("header is laid out");
    assert_eq!(header.frame(), frame(0.0, 0.0, 320.0, 100.0));
    assert_eq!(header.initial_frame(), Some(frame(0.0, 0.0, 320.0, 50.0)));
    assert_eq!(layout.item("a").unwrap().initial_frame(), Some(frame(0.0, 65.0, 320.0, 50.0)));
    assert_eq!(layout.frame("a").unwrap().y(), 115.0);
    assert_no_overlap(&layout);

    // A header that did not exist before has nothing to animate from.
    let headless = view_model(&[("a", "row")]);
    let previous = factory.build_layout(VIEWPORT, &headless, None, None, true);
    let changes = diff(&headless, &new);
    let layout = factory.build_layout(VIEWPORT, &new, Some(&changes), Some(&previous), true);
    assert_eq!(layout.header().unwrap().initial_frame(), None);
}

#[test]
fn test_header_margin_without_header_is_ignored() {
    let layout = factory().build_layout(VIEWPORT, &view_model(&[("a", "row")]), None, None, true);
    assert!(layout.header().is_none());
    assert_eq!(layout.frame("a").unwrap().y(), 15.0);
}

// ============================================================================
// Failure Handling
// ============================================================================

#[test]
fn test_unresolved_component_falls_back_to_zero_size() {
    let layout = factory().build_layout(
        VIEWPORT,
        &view_model(&[("a", "row"), ("b", "missing"), ("c", "row")]),
        None,
        None,
        false,
    );

    assert_eq!(layout.items().len(), 3);
    let ghost = layout.item("b").unwrap();
    assert!(!ghost.is_resolved());
    assert!(ghost.frame().size().is_zero());
    assert_eq!(layout.frame("c").unwrap().y(), 95.0);
    assert_no_overlap(&layout);
}

#[test]
fn test_invalid_viewport_is_sanitized() {
    let layout = factory().build_layout(
        Size::new(f32::NAN, 100.0),
        &view_model(&[("a", "row"), ("b", "card")]),
        None,
        None,
        false,
    );

    assert_eq!(layout.viewport(), Size::new(0.0, 100.0));
    assert!(layout.items().iter().all(|item| item.frame().width() == 0.0));
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_one_frame_per_model_in_order() {
    let view_model = view_model(&[("a", "row"), ("b", "card"), ("c", "missing"), ("d", "text")]);
    let layout = factory().build_layout(VIEWPORT, &view_model, None, None, false);

    let identifiers: Vec<&str> = layout.items().iter().map(|item| item.identifier()).collect();
    assert_eq!(identifiers, view_model.body_identifiers());
}

#[test]
fn test_mixed_content_never_overlaps() {
    let names = ["row", "card", "card", "centered", "stack", "stack", "card", "missing", "text", "card"];
    for width in [120.0, 240.0, 320.0, 768.0] {
        let items: Vec<(String, &str)> = names
            .iter()
            .enumerate()
            .map(|(index, name)| (format!("item-{index}"), *name))
            .collect();
        let pairs: Vec<(&str, &str)> = items.iter().map(|(id, name)| (id.as_str(), *name)).collect();

        let layout = factory().build_layout(
            Size::new(width, 480.0),
            &view_model(&pairs),
            None,
            None,
            false,
        );
        assert_no_overlap(&layout);
    }
}

#[test]
fn test_layout_is_deterministic() {
    let view_model = view_model(&[("a", "card"), ("b", "centered"), ("c", "text")]);
    let factory = factory();

    assert_eq!(
        factory.build_layout(VIEWPORT, &view_model, None, None, true),
        factory.build_layout(VIEWPORT, &view_model, None, None, true)
    );
}

// ============================================================================
// Transitions
// ============================================================================

#[test]
fn test_transitions_start_from_previous_frames() {
    let factory = factory();
    let old = view_model(&[("a", "row"), ("b", "row"), ("c", "row")]);
    let new = view_model(&[("c", "row"), ("a", "row"), ("x", "row")]);

    let previous = factory.build_layout(VIEWPORT, &old, None, None, false);
    let changes = diff(&old, &new);
    let layout = factory.build_layout(VIEWPORT, &new, Some(&changes), Some(&previous), false);

    let a = layout.item("a").unwrap();
    assert_eq!(a.frame(), frame(0.0, 80.0, 320.0, 50.0));
    assert_eq!(a.initial_frame(), Some(frame(0.0, 15.0, 320.0, 50.0)));

    let c = layout.item("c").unwrap();
    assert_eq!(c.initial_frame(), Some(frame(0.0, 145.0, 320.0, 50.0)));

    let x = layout.item("x").unwrap();
    assert_eq!(x.initial_frame(), Some(frame(0.0, 145.0, 320.0, 0.0)));

    let disappearing = layout.disappearing();
    assert_eq!(disappearing.len(), 1);
    assert_eq!(disappearing[0].identifier(), "b");
    assert_eq!(disappearing[0].old_index(), 1);
    assert_eq!(disappearing[0].frame(), frame(0.0, 80.0, 320.0, 0.0));
}

#[test]
fn test_no_transitions_without_previous_layout() {
    let old = view_model(&[("a", "row")]);
    let new = view_model(&[("a", "row"), ("b", "row")]);
    let changes = diff(&old, &new);

    let layout = factory().build_layout(VIEWPORT, &new, Some(&changes), None, false);
    assert!(layout.items().iter().all(|item| item.initial_frame().is_none()));
    assert!(layout.disappearing().is_empty());
}

// ============================================================================
// Children
// ============================================================================

#[test]
fn test_children_stack_inside_parent() {
    let parent = ComponentModel::new(
        "parent",
        0,
        ComponentIdentifier::new(None::<String>, "row"),
        ComponentContent::default(),
        vec![model("c1", "card"), model("c2", "card"), model("c3", "missing")],
    );
    let view_model = ViewModel::new(vec![parent]).unwrap();

    let layout = factory().build_layout(VIEWPORT, &view_model, None, None, false);
    let children = layout.item("parent").unwrap().children();

    assert_eq!(children.len(), 3);
    assert_eq!(children[0].frame(), frame(0.0, 0.0, 100.0, 100.0));
    assert_eq!(children[1].frame(), frame(0.0, 100.0, 100.0, 100.0));
    assert!(!children[2].is_resolved());
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn test_target_content_offset_keeps_visible_item_anchored() {
    let factory = factory();
    let viewport = Size::new(320.0, 100.0);
    let old = view_model(&[("a", "row"), ("b", "row"), ("c", "row")]);
    let new = view_model(&[("x", "row"), ("a", "row"), ("b", "row"), ("c", "row")]);

    let previous = factory.build_layout(viewport, &old, None, None, false);
    let layout = factory.build_layout(viewport, &new, None, None, false);

    // `b` was at the top of the viewport and must stay there.
    let offset = layout.target_content_offset(&previous, Point::new(0.0, 80.0), viewport);
    assert_eq!(offset, Point::new(0.0, 145.0));

    // At the very top, stay at the top so inserted content shows up.
    let top = layout.target_content_offset(&previous, Point::zero(), viewport);
    assert_eq!(top, Point::zero());
}

#[test]
fn test_target_content_offset_is_clamped() {
    let factory = factory();
    let viewport = Size::new(320.0, 100.0);
    let old = view_model(&[("a", "row"), ("b", "row"), ("c", "row")]);
    let new = view_model(&[("c", "row")]);

    let previous = factory.build_layout(viewport, &old, None, None, false);
    let layout = factory.build_layout(viewport, &new, None, None, false);

    let offset = layout.target_content_offset(&previous, Point::new(0.0, 145.0), viewport);
    assert_eq!(offset, Point::zero());
}

#[test]
fn test_items_in_rect() {
    let layout = factory().build_layout(
        VIEWPORT,
        &view_model(&[("a", "row"), ("b", "row"), ("c", "row")]),
        None,
        None,
        false,
    );

    let visible: Vec<&str> = layout
        .items_in_rect(frame(0.0, 0.0, 320.0, 70.0))
        .into_iter()
        .map(|item| item.identifier())
        .collect();
    assert_eq!(visible, ["a"]);
}
