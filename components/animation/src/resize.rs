//! Resize animations.
//!
//! A [`ResizeAnimation`] accumulates target view sizes, possibly contributed
//! by several component models, and is then committed into a read-only
//! [`CommittedResizeAnimation`] that a performer applies in one transaction.

use alloc::{boxed::Box, collections::BTreeMap, string::String};
use core::{fmt, time::Duration};

use hubui_core::{ComponentModel, Size};
use tracing::trace;

use crate::AnimationPhase;

/// Custom animation behavior run inside the resize transaction.
pub type AnimationBlock = Box<dyn FnOnce()>;

/// A batch of target view sizes being accumulated.
///
/// Adding a size for an identifier that already has one replaces it.
pub struct ResizeAnimation {
    duration: Duration,
    target_view_sizes: BTreeMap<String, Size>,
    animation_block: Option<AnimationBlock>,
}

impl fmt::Debug for ResizeAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeAnimation")
            .field("duration", &self.duration)
            .field("target_view_sizes", &self.target_view_sizes)
            .field("has_animation_block", &self.animation_block.is_some())
            .finish()
    }
}

impl ResizeAnimation {
    /// Creates an empty animation. The duration is fixed from here on.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            target_view_sizes: BTreeMap::new(),
            animation_block: None,
        }
    }

    /// Creates an animation resizing the view of a single component model.
    #[must_use]
    pub fn for_component_model(
        model: &ComponentModel,
        target_view_size: Size,
        duration: Duration,
        animation_block: Option<AnimationBlock>,
    ) -> Self {
        let mut animation = Self::new(duration);
        animation.add_target_view_size(target_view_size, model);
        animation.animation_block = animation_block;
        animation
    }

    /// Adds the size the view of `model` should be resized to.
    pub fn add_target_view_size(&mut self, target_view_size: Size, model: &ComponentModel) {
        self.add_target_view_size_for(model.identifier(), target_view_size);
    }

    /// Adds a target size for the view of the model with `identifier`.
    pub fn add_target_view_size_for(&mut self, identifier: impl Into<String>, target_view_size: Size) {
        self.target_view_sizes
            .insert(identifier.into(), target_view_size.sanitized());
    }

    /// Sets the custom block run inside the transaction, replacing any
    /// previous one.
    pub fn set_animation_block(&mut self, block: impl FnOnce() + 'static) {
        self.animation_block = Some(Box::new(block));
    }

    /// Duration of the transaction.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Target sizes by model identifier.
    #[must_use]
    pub const fn target_view_sizes(&self) -> &BTreeMap<String, Size> {
        &self.target_view_sizes
    }

    /// Always [`AnimationPhase::Accumulating`].
    #[must_use]
    pub const fn phase(&self) -> AnimationPhase {
        AnimationPhase::Accumulating
    }

    /// Returns true if no target size was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.target_view_sizes.is_empty()
    }

    /// Freezes the animation so it can be performed.
    #[must_use]
    pub fn commit(self) -> CommittedResizeAnimation {
        trace!(
            phase = ?AnimationPhase::Committed,
            targets = self.target_view_sizes.len(),
            "resize animation committed"
        );
        CommittedResizeAnimation {
            duration: self.duration,
            target_view_sizes: self.target_view_sizes,
            animation_block: self.animation_block,
        }
    }
}

/// A resize animation that no longer accepts changes.
pub struct CommittedResizeAnimation {
    pub(crate) duration: Duration,
    pub(crate) target_view_sizes: BTreeMap<String, Size>,
    pub(crate) animation_block: Option<AnimationBlock>,
}

impl fmt::Debug for CommittedResizeAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommittedResizeAnimation")
            .field("duration", &self.duration)
            .field("target_view_sizes", &self.target_view_sizes)
            .field("has_animation_block", &self.animation_block.is_some())
            .finish()
    }
}

impl CommittedResizeAnimation {
    /// Duration of the transaction.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Target sizes by model identifier.
    #[must_use]
    pub const fn target_view_sizes(&self) -> &BTreeMap<String, Size> {
        &self.target_view_sizes
    }

    /// Target size for the model with `identifier`.
    #[must_use]
    pub fn target_view_size(&self, identifier: &str) -> Option<Size> {
        self.target_view_sizes.get(identifier).copied()
    }

    /// Always [`AnimationPhase::Committed`].
    #[must_use]
    pub const fn phase(&self) -> AnimationPhase {
        AnimationPhase::Committed
    }

    /// Returns true if a custom animation block is attached.
    #[must_use]
    pub const fn has_animation_block(&self) -> bool {
        self.animation_block.is_some()
    }
}
