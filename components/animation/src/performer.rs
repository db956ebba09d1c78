//! Performing resize animations against a hosting view.

use alloc::{string::String, vec::Vec};
use core::{any::type_name, fmt::Debug, time::Duration};

use hubui_core::Size;
use tracing::{debug, trace};

use crate::{CommittedResizeAnimation, ResizeAnimation};

/// Lifecycle of a resize animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationPhase {
    /// Target sizes are still being added.
    Accumulating,
    /// Read-only, waiting to be performed.
    Committed,
    /// Sizes are being applied inside the transaction.
    Performing,
    /// The transaction finished.
    Completed,
}

/// Result of performing one resize animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationOutcome {
    /// Number of views that were resized.
    pub applied: usize,
    /// Identifiers whose view no longer existed.
    pub skipped: Vec<String>,
    /// Phase reached. Always [`AnimationPhase::Completed`] once returned.
    pub phase: AnimationPhase,
}

/// Live component views that resize animations act upon.
pub trait ComponentViewHost {
    /// Resizes the view displaying the model with `identifier`.
    ///
    /// Returns false if no such view exists anymore.
    fn set_component_view_size(&mut self, identifier: &str, size: Size) -> bool;
}

impl Debug for dyn ComponentViewHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(type_name::<Self>())
    }
}

/// Opens the animated transactions resize animations run in.
pub trait CommitHandler {
    /// Runs `batch` inside one transaction lasting `duration`.
    ///
    /// Implementations must invoke `batch` exactly once, and must not make
    /// any of its changes visible before the transaction commits.
    fn commit(&mut self, duration: Duration, batch: &mut dyn FnMut());
}

impl Debug for dyn CommitHandler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(type_name::<Self>())
    }
}

/// Applies the batch immediately, without animating.
impl CommitHandler for () {
    fn commit(&mut self, _duration: Duration, batch: &mut dyn FnMut()) {
        batch();
    }
}

/// Capability handed to components so they can request resize animations.
pub trait AnimationPerformer {
    /// Commits `animation` and performs it.
    fn perform_resize_animation(&mut self, animation: ResizeAnimation);
}

impl Debug for dyn AnimationPerformer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(type_name::<Self>())
    }
}

/// Applies every target size of `animation` in one transaction.
///
/// Targets whose view no longer exists are skipped without affecting the
/// rest of the batch. The custom animation block, if any, runs inside the
/// same transaction after the sizes are applied.
pub fn perform_resize_animation<H, C>(
    animation: CommittedResizeAnimation,
    host: &mut H,
    commit_handler: &mut C,
) -> AnimationOutcome
where
    H: ComponentViewHost + ?Sized,
    C: CommitHandler + ?Sized,
{
    perform_resize_animation_with(animation, host, commit_handler, |_| {})
}

/// Like [`perform_resize_animation`], running `prepare` on the host inside
/// the transaction before any size is applied.
///
/// Hosts use this to apply a new layout in the same transaction as the
/// resize, so neither change is visible without the other.
pub fn perform_resize_animation_with<H, C, F>(
    animation: CommittedResizeAnimation,
    host: &mut H,
    commit_handler: &mut C,
    mut prepare: F,
) -> AnimationOutcome
where
    H: ComponentViewHost + ?Sized,
    C: CommitHandler + ?Sized,
    F: FnMut(&mut H),
{
    let CommittedResizeAnimation {
        duration,
        target_view_sizes,
        mut animation_block,
    } = animation;

    trace!(
        phase = ?AnimationPhase::Performing,
        targets = target_view_sizes.len(),
        ?duration,
        "performing resize animation"
    );

    let mut applied = 0;
    let mut skipped = Vec::new();
    commit_handler.commit(duration, &mut || {
        applied = 0;
        skipped.clear();
        prepare(&mut *host);
        for (identifier, size) in &target_view_sizes {
            if host.set_component_view_size(identifier, *size) {
                applied += 1;
            } else {
                debug!(%identifier, "component view no longer exists; skipping resize");
                skipped.push(identifier.clone());
            }
        }
        if let Some(block) = animation_block.take() {
            block();
        }
    });

    trace!(
        phase = ?AnimationPhase::Completed,
        applied,
        skipped = skipped.len(),
        "resize animation completed"
    );

    AnimationOutcome {
        applied,
        skipped,
        phase: AnimationPhase::Completed,
    }
}

/// [`AnimationPerformer`] acting directly on a view host.
#[derive(Debug)]
pub struct ResizePerformer<H, C> {
    host: H,
    commit_handler: C,
    last_outcome: Option<AnimationOutcome>,
}

impl<H, C> ResizePerformer<H, C>
where
    H: ComponentViewHost,
    C: CommitHandler,
{
    /// Creates a performer resizing views of `host` in transactions opened
    /// by `commit_handler`.
    pub const fn new(host: H, commit_handler: C) -> Self {
        Self {
            host,
            commit_handler,
            last_outcome: None,
        }
    }

    /// The view host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the view host.
    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The commit handler.
    pub const fn commit_handler(&self) -> &C {
        &self.commit_handler
    }

    /// Outcome of the most recent animation.
    pub const fn last_outcome(&self) -> Option<&AnimationOutcome> {
        self.last_outcome.as_ref()
    }

    /// Returns the host and the commit handler.
    pub fn into_parts(self) -> (H, C) {
        (self.host, self.commit_handler)
    }
}

impl<H, C> AnimationPerformer for ResizePerformer<H, C>
where
    H: ComponentViewHost,
    C: CommitHandler,
{
    fn perform_resize_animation(&mut self, animation: ResizeAnimation) {
        let outcome =
            perform_resize_animation(animation.commit(), &mut self.host, &mut self.commit_handler);
        self.last_outcome = Some(outcome);
    }
}
