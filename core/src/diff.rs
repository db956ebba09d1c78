//! View model diffing.
//!
//! [`diff`] compares the body of two [`ViewModel`]s and produces the edit
//! script a collection view needs to animate from one to the other.
//!
//! Identity is carried by [`ComponentModel::identifier`]. Items present on
//! both sides are *kept*. Their relative order is preserved along the longest
//! common subsequence of both orderings; kept items off that subsequence
//! *move*. A kept item whose content changed is *reloaded*.
//!
//! Operations are emitted in a fixed order:
//!
//! 1. removals, by descending old index,
//! 2. insertions, by ascending new index,
//! 3. moves, by ascending new index,
//! 4. reloads, by ascending new index.
//!
//! An item that both moved and changed produces a move *and* a reload. The
//! reload refers to the item's new position and is meant to be applied once
//! the structural operations have landed.

use alloc::{
    collections::{BTreeMap, BTreeSet},
    string::{String, ToString},
    vec,
    vec::Vec,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ComponentModel, ViewModel};

/// A single structural change between two view models.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DiffOperation {
    /// The item only exists in the old view model.
    Remove {
        /// Identifier of the removed model.
        identifier: String,
        /// Position in the old body.
        old_index: usize,
    },
    /// The item only exists in the new view model.
    Insert {
        /// Identifier of the inserted model.
        identifier: String,
        /// Position in the new body.
        new_index: usize,
    },
    /// The item is kept but changed position relative to its siblings.
    Move {
        /// Identifier of the moved model.
        identifier: String,
        /// Position in the old body.
        old_index: usize,
        /// Position in the new body.
        new_index: usize,
    },
    /// The item is kept but its content changed.
    Reload {
        /// Identifier of the reloaded model.
        identifier: String,
        /// Position in the old body.
        old_index: usize,
        /// Position in the new body.
        new_index: usize,
    },
}

impl DiffOperation {
    /// Identifier of the model this operation applies to.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::Remove { identifier, .. }
            | Self::Insert { identifier, .. }
            | Self::Move { identifier, .. }
            | Self::Reload { identifier, .. } => identifier,
        }
    }

    /// Position in the old body, if the item existed there.
    #[must_use]
    pub const fn old_index(&self) -> Option<usize> {
        match self {
            Self::Remove { old_index, .. }
            | Self::Move { old_index, .. }
            | Self::Reload { old_index, .. } => Some(*old_index),
            Self::Insert { .. } => None,
        }
    }

    /// Position in the new body, if the item exists there.
    #[must_use]
    pub const fn new_index(&self) -> Option<usize> {
        match self {
            Self::Insert { new_index, .. }
            | Self::Move { new_index, .. }
            | Self::Reload { new_index, .. } => Some(*new_index),
            Self::Remove { .. } => None,
        }
    }
}

/// Ordered edit script between two view models.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModelDiff {
    operations: Vec<DiffOperation>,
    header_changed: bool,
    overlays_changed: bool,
}

impl ViewModelDiff {
    /// Computes the diff from `old` to `new`. Same as [`diff`].
    #[must_use]
    pub fn between(old: &ViewModel, new: &ViewModel) -> Self {
        diff(old, new)
    }

    /// All operations, in application order.
    #[must_use]
    pub fn operations(&self) -> &[DiffOperation] {
        &self.operations
    }

    /// Returns true if nothing changed, header and overlays included.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty() && !self.header_changed && !self.overlays_changed
    }

    /// Returns true if the header model was added, removed or changed.
    #[must_use]
    pub const fn header_changed(&self) -> bool {
        self.header_changed
    }

    /// Returns true if any overlay model was added, removed or changed.
    #[must_use]
    pub const fn overlays_changed(&self) -> bool {
        self.overlays_changed
    }

    /// Removal operations.
    pub fn removals(&self) -> impl Iterator<Item = &DiffOperation> {
        self.operations
            .iter()
            .filter(|op| matches!(op, DiffOperation::Remove { .. }))
    }

    /// Insert operations.
    pub fn insertions(&self) -> impl Iterator<Item = &DiffOperation> {
        self.operations
            .iter()
            .filter(|op| matches!(op, DiffOperation::Insert { .. }))
    }

    /// Move operations.
    pub fn moves(&self) -> impl Iterator<Item = &DiffOperation> {
        self.operations
            .iter()
            .filter(|op| matches!(op, DiffOperation::Move { .. }))
    }

    /// Reload operations.
    pub fn reloads(&self) -> impl Iterator<Item = &DiffOperation> {
        self.operations
            .iter()
            .filter(|op| matches!(op, DiffOperation::Reload { .. }))
    }

    /// Returns true if the model with `identifier` was inserted.
    #[must_use]
    pub fn is_inserted(&self, identifier: &str) -> bool {
        self.insertions().any(|op| op.identifier() == identifier)
    }

    /// Returns true if the model with `identifier` was removed.
    #[must_use]
    pub fn is_removed(&self, identifier: &str) -> bool {
        self.removals().any(|op| op.identifier() == identifier)
    }

    /// Returns true if the model with `identifier` moved.
    #[must_use]
    pub fn is_moved(&self, identifier: &str) -> bool {
        self.moves().any(|op| op.identifier() == identifier)
    }

    /// Returns true if the model with `identifier` was reloaded.
    #[must_use]
    pub fn is_reloaded(&self, identifier: &str) -> bool {
        self.reloads().any(|op| op.identifier() == identifier)
    }

    /// Replays the structural operations on `old`, an ordered identifier list.
    ///
    /// Removals are applied first, in emission order. Moved items are then
    /// detached, and inserted and moved items are placed at their new index,
    /// lowest first. This mirrors how a collection view consumes a batch
    /// update. Applying a diff to the identifiers it was computed from yields
    /// the new identifiers. Reloads do not affect the order.
    #[must_use]
    pub fn apply<S: AsRef<str>>(&self, old: &[S]) -> Vec<String> {
        let mut working: Vec<String> = old.iter().map(|id| id.as_ref().to_string()).collect();

        for operation in self.removals() {
            if let DiffOperation::Remove { old_index, .. } = operation
                && *old_index < working.len()
            {
                working.remove(*old_index);
            }
        }

        let moved: BTreeSet<&str> = self.moves().map(DiffOperation::identifier).collect();
        working.retain(|id| !moved.contains(id.as_str()));

        let mut placements: Vec<(usize, &str)> = self
            .operations
            .iter()
            .filter(|op| matches!(op, DiffOperation::Insert { .. } | DiffOperation::Move { .. }))
            .filter_map(|op| op.new_index().map(|index| (index, op.identifier())))
            .collect();
        placements.sort_by_key(|&(index, _)| index);

        for (index, identifier) in placements {
            let at = index.min(working.len());
            working.insert(at, identifier.to_string());
        }

        working
    }
}

/// Computes the edit script transforming `old`'s body into `new`'s body.
///
/// Pure and deterministic. `diff(v, v)` is always empty.
///
/// Body identifiers must be unique on each side; [`ViewModel::new`] enforces
/// this for view models it builds.
#[must_use]
pub fn diff(old: &ViewModel, new: &ViewModel) -> ViewModelDiff {
    let old_body = old.body();
    let new_body = new.body();

    let old_positions = positions(old_body);
    let new_positions = positions(new_body);
    debug_assert_eq!(old_positions.len(), old_body.len(), "duplicate identifier in old view model");
    debug_assert_eq!(new_positions.len(), new_body.len(), "duplicate identifier in new view model");

    // Kept items in old order, as (old_index, new_index).
    let kept: Vec<(usize, usize)> = old_body
        .iter()
        .enumerate()
        .filter_map(|(old_index, model)| {
            new_positions
                .get(model.identifier())
                .map(|&new_index| (old_index, new_index))
        })
        .collect();

    let new_order: Vec<usize> = kept.iter().map(|&(_, new_index)| new_index).collect();
    let stable = longest_increasing_subsequence(&new_order);

    let mut operations = Vec::new();

    for (old_index, model) in old_body.iter().enumerate().rev() {
        if !new_positions.contains_key(model.identifier()) {
            operations.push(DiffOperation::Remove {
                identifier: model.identifier().to_string(),
                old_index,
            });
        }
    }

    for (new_index, model) in new_body.iter().enumerate() {
        if !old_positions.contains_key(model.identifier()) {
            operations.push(DiffOperation::Insert {
                identifier: model.identifier().to_string(),
                new_index,
            });
        }
    }

    let mut moves: Vec<(usize, usize)> = kept
        .iter()
        .zip(&stable)
        .filter(|&(_, in_place)| !*in_place)
        .map(|(&pair, _)| pair)
        .collect();
    moves.sort_by_key(|&(_, new_index)| new_index);
    operations.extend(moves.into_iter().map(|(old_index, new_index)| {
        DiffOperation::Move {
            identifier: new_body[new_index].identifier().to_string(),
            old_index,
            new_index,
        }
    }));

    let mut reloads: Vec<(usize, usize)> = kept
        .iter()
        .copied()
        .filter(|&(old_index, new_index)| {
            !old_body[old_index].is_equivalent_to(&new_body[new_index])
        })
        .collect();
    reloads.sort_by_key(|&(_, new_index)| new_index);
    operations.extend(reloads.into_iter().map(|(old_index, new_index)| {
        DiffOperation::Reload {
            identifier: new_body[new_index].identifier().to_string(),
            old_index,
            new_index,
        }
    }));

    let header_changed = match (old.header(), new.header()) {
        (Some(lhs), Some(rhs)) => !lhs.is_equivalent_to(rhs),
        (None, None) => false,
        _ => true,
    };
    let overlays_changed = old.overlays().len() != new.overlays().len()
        || old
            .overlays()
            .iter()
            .zip(new.overlays())
            .any(|(lhs, rhs)| !lhs.is_equivalent_to(rhs));

    let result = ViewModelDiff {
        operations,
        header_changed,
        overlays_changed,
    };

    debug!(
        removals = result.removals().count(),
        insertions = result.insertions().count(),
        moves = result.moves().count(),
        reloads = result.reloads().count(),
        header_changed,
        overlays_changed,
        "computed view model diff"
    );

    result
}

fn positions(models: &[ComponentModel]) -> BTreeMap<&str, usize> {
    models
        .iter()
        .enumerate()
        .map(|(index, model)| (model.identifier(), index))
        .collect()
}

/// Marks the members of one longest strictly increasing subsequence.
///
/// Both orderings are permutations of the kept identifiers, so this is the
/// longest common subsequence between them. Patience sorting keeps it
/// `O(n log n)`; ties resolve to the subsequence ending on the lowest tail,
/// which makes the result deterministic.
fn longest_increasing_subsequence(values: &[usize]) -> Vec<bool> {
    let mut tails: Vec<usize> = Vec::new();
    let mut predecessors: Vec<Option<usize>> = vec![None; values.len()];

    for (index, &value) in values.iter().enumerate() {
        let position = tails.partition_point(|&tail| values[tail] < value);
        if position > 0 {
            predecessors[index] = Some(tails[position - 1]);
        }
        if position == tails.len() {
            tails.push(index);
        } else {
            tails[position] = index;
        }
    }

    let mut members = vec![false; values.len()];
    let mut cursor = tails.last().copied();
    while let Some(index) = cursor {
        members[index] = true;
        cursor = predecessors[index];
    }
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ComponentContent, ComponentIdentifier, Size};

    fn model(id: &str, title: &str) -> ComponentModel {
        ComponentModel::new(
            id,
            0,
            ComponentIdentifier::new(Some("test"), "row"),
            ComponentContent {
                title: Some(title.into()),
                ..ComponentContent::default()
            },
            Vec::new(),
        )
    }

    fn view_model(ids: &[&str]) -> ViewModel {
        ViewModel::new(ids.iter().map(|id| model(id, id)).collect()).unwrap()
    }

    fn assert_reproduces(old: &ViewModel, new: &ViewModel) {
        let result = diff(old, new);
        assert_eq!(
            result.apply(&old.body_identifiers()),
            new.body_identifiers(),
            "diff {result:?} does not reproduce the new ordering"
        );
    }

    #[test]
    fn test_identical_view_models_produce_empty_diff() {
        let v = view_model(&["a", "b", "c"]);
        assert!(diff(&v, &v).is_empty());
        assert!(diff(&ViewModel::empty(), &ViewModel::empty()).is_empty());
    }

    #[test]
    fn test_nan_preferred_size_is_equivalent_to_itself() {
        let mut odd = model("a", "A");
        odd.content.preferred_size = Some(Size::new(f32::NAN, 10.0));
        let v = ViewModel::new(vec![odd, model("b", "B")]).unwrap();

        assert!(diff(&v, &v).is_empty());
        assert!(diff(&v, &v.clone()).is_empty());
    }

    #[test]
    fn test_swap_produces_single_move() {
        let result = diff(&view_model(&["a", "b", "c"]), &view_model(&["a", "c", "b"]));

        assert_eq!(result.moves().count(), 1);
        assert_eq!(result.insertions().count(), 0);
        assert_eq!(result.removals().count(), 0);
        assert_eq!(result.reloads().count(), 0);
        assert!(result.is_moved("b") || result.is_moved("c"));
    }

    #[test]
    fn test_append_produces_single_insert() {
        let result = diff(&view_model(&["a", "b"]), &view_model(&["a", "b", "c"]));

        assert_eq!(
            result.operations(),
            [DiffOperation::Insert {
                identifier: "c".into(),
                new_index: 2
            }]
        );
    }

    #[test]
    fn test_removal_produces_single_remove() {
        let result = diff(&view_model(&["a", "b", "c"]), &view_model(&["a", "c"]));

        assert_eq!(
            result.operations(),
            [DiffOperation::Remove {
                identifier: "b".into(),
                old_index: 1
            }]
        );
    }

    #[test]
    fn test_empty_sides() {
        let full = view_model(&["a", "b"]);
        let empty = ViewModel::empty();

        let inserted = diff(&empty, &full);
        assert_eq!(inserted.insertions().count(), 2);
        assert_eq!(inserted.operations().len(), 2);

        let removed = diff(&full, &empty);
        assert_eq!(
            removed.operations(),
            [
                DiffOperation::Remove {
                    identifier: "b".into(),
                    old_index: 1
                },
                DiffOperation::Remove {
                    identifier: "a".into(),
                    old_index: 0
                },
            ]
        );
    }

    #[test]
    fn test_content_change_produces_reload() {
        let old = ViewModel::new(vec![model("a", "A")]).unwrap();
        let mut changed = model("a", "A");
        changed.content.preferred_size = Some(Size::new(20.0, 20.0));
        let new = ViewModel::new(vec![changed]).unwrap();

        let result = diff(&old, &new);
        assert_eq!(
            result.operations(),
            [DiffOperation::Reload {
                identifier: "a".into(),
                old_index: 0,
                new_index: 0
            }]
        );
    }

    #[test]
    fn test_component_identifier_change_produces_reload() {
        let old = ViewModel::new(vec![model("a", "A")]).unwrap();
        let mut changed = model("a", "A");
        changed.component_identifier = ComponentIdentifier::new(Some("test"), "card");
        let new = ViewModel::new(vec![changed]).unwrap();

        assert!(diff(&old, &new).is_reloaded("a"));
    }

    #[test]
    fn test_moved_and_changed_item_moves_and_reloads() {
        let old = ViewModel::new(vec![model("a", "A"), model("b", "B"), model("c", "C")]).unwrap();
        let new = ViewModel::new(vec![model("c", "C2"), model("a", "A"), model("b", "B")]).unwrap();

        let result = diff(&old, &new);
        assert_eq!(
            result.operations(),
            [
                DiffOperation::Move {
                    identifier: "c".into(),
                    old_index: 2,
                    new_index: 0
                },
                DiffOperation::Reload {
                    identifier: "c".into(),
                    old_index: 2,
                    new_index: 0
                },
            ]
        );
        assert_reproduces(&old, &new);
    }

    #[test]
    fn test_index_only_change_is_not_a_reload() {
        let old = view_model(&["a", "b"]);
        let new = view_model(&["b"]);
        let result = diff(&old, &new);

        assert!(!result.is_reloaded("b"));
        assert!(!result.is_moved("b"));
    }

    #[test]
    fn test_operations_follow_fixed_order() {
        let old = view_model(&["a", "b", "c", "d", "e"]);
        let new = view_model(&["e", "x", "a", "c", "y"]);
        let result = diff(&old, &new);

        let kinds: Vec<u8> = result
            .operations()
            .iter()
            .map(|op| match op {
                DiffOperation::Remove { .. } => 0,
                DiffOperation::Insert { .. } => 1,
                DiffOperation::Move { .. } => 2,
                DiffOperation::Reload { .. } => 3,
            })
            .collect();
        assert!(kinds.is_sorted());

        let removal_indices: Vec<usize> = result.removals().filter_map(DiffOperation::old_index).collect();
        assert_eq!(removal_indices, [3, 1]);
        let insert_indices: Vec<usize> = result.insertions().filter_map(DiffOperation::new_index).collect();
        assert_eq!(insert_indices, [1, 4]);

        assert_reproduces(&old, &new);
    }

    #[test]
    fn test_diff_is_deterministic() {
        let old = view_model(&["a", "b", "c", "d", "e", "f"]);
        let new = view_model(&["f", "c", "a", "g", "e", "b"]);

        assert_eq!(diff(&old, &new), diff(&old, &new));
    }

    #[test]
    fn test_apply_reproduces_new_ordering_for_permutations() {
        let base = ["a", "b", "c", "d", "e"];
        let orderings: [&[&str]; 7] = [
            &["e", "d", "c", "b", "a"],
            &["b", "c", "d", "e", "a"],
            &["e", "a", "b", "c", "d"],
            &["a", "d", "c", "b", "e"],
            &["c", "z", "a"],
            &["q", "r"],
            &["d", "a", "q", "e", "b", "c"],
        ];

        for ordering in orderings {
            assert_reproduces(&view_model(&base), &view_model(ordering));
            assert_reproduces(&view_model(ordering), &view_model(&base));
        }
    }

    #[test]
    fn test_moves_are_minimal() {
        // Moving a single item across the list should not shift the others.
        let result = diff(&view_model(&["a", "b", "c", "d"]), &view_model(&["b", "c", "d", "a"]));
        assert_eq!(result.moves().count(), 1);
        assert!(result.is_moved("a"));
    }

    #[test]
    fn test_header_and_overlay_changes_are_flagged() {
        let old = view_model(&["a"]).with_header(Some(model("header", "Old")));
        let new = view_model(&["a"])
            .with_header(Some(model("header", "New")))
            .with_overlays(vec![model("spinner", "")]);

        let result = diff(&old, &new);
        assert!(result.header_changed());
        assert!(result.overlays_changed());
        assert!(result.operations().is_empty());
        assert!(!result.is_empty());
    }

    #[test]
    fn test_longest_increasing_subsequence_marks_members() {
        assert_eq!(longest_increasing_subsequence(&[0, 2, 1]), [true, false, true]);
        assert_eq!(longest_increasing_subsequence(&[3, 2, 1, 0]), [false, false, false, true]);
        assert!(longest_increasing_subsequence(&[]).is_empty());
    }
}
