//! Resize animations for `HubUI` components.
//!
//! Components whose content changes size do not resize their views
//! directly. They describe the new sizes in a [`ResizeAnimation`] and hand
//! it to an [`AnimationPerformer`], which applies every size of the batch
//! inside a single transaction opened by a [`CommitHandler`]:
//!
//! ```text
//! Accumulating ──commit()──▶ Committed ──perform──▶ Performing ──▶ Completed
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use core::time::Duration;
//! use hubui_animation::{AnimationPerformer, ResizeAnimation};
//!
//! let mut animation = ResizeAnimation::new(Duration::from_millis(300));
//! animation.add_target_view_size(Size::new(320.0, 120.0), &expanded_model);
//! animation.add_target_view_size(Size::new(320.0, 44.0), &collapsed_model);
//! performer.perform_resize_animation(animation);
//! ```

extern crate alloc;

mod resize;
pub use resize::{AnimationBlock, CommittedResizeAnimation, ResizeAnimation};

mod performer;
pub use performer::{
    AnimationOutcome, AnimationPerformer, AnimationPhase, CommitHandler, ComponentViewHost,
    ResizePerformer, perform_resize_animation, perform_resize_animation_with,
};
