//! Drives a collection view from successive view models.
//!
//! The [`ContentController`] owns the displayed view model and its layout.
//! Each new view model is diffed against the displayed one, laid out, and
//! applied to the [`CollectionView`] in a single transaction together with
//! the resize animation of every kept component whose size changed.
//!
//! Only one transaction is in flight at a time. Work submitted meanwhile is
//! queued and applied in submission order once the host reports completion
//! through [`ContentController::transaction_did_complete`].

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use tracing::debug;

use crate::animation::{
    AnimationOutcome, AnimationPerformer, CommitHandler, ComponentViewHost, ResizeAnimation,
    perform_resize_animation_with,
};
use crate::config::HubConfig;
use crate::layout::{ComponentRegistry, ItemLayout, Layout, LayoutFactory, SizeOverrides};
use crate::{DiffOperation, Size, ViewModel, ViewModelDiff, diff};

/// The hosting view displaying component views.
pub trait CollectionView: ComponentViewHost {
    /// Applies `layout`, inserting, removing and moving item views as
    /// described by `diff`. `diff` is `None` for relayouts of unchanged
    /// content.
    fn apply_layout(&mut self, layout: &Layout, diff: Option<&ViewModelDiff>);
}

/// Changes applied by one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentUpdate {
    /// Diff against the previously displayed view model, for content updates.
    pub diff: Option<ViewModelDiff>,
    /// Target sizes of the resize animation, by identifier.
    pub resized: BTreeMap<String, Size>,
    /// Outcome of the resize animation.
    pub outcome: AnimationOutcome,
}

/// What happened to submitted work.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Applied right away in a new transaction.
    Applied(ContentUpdate),
    /// Queued behind the transaction in flight.
    Queued,
}

impl Submission {
    /// Returns the update if the work was applied.
    #[must_use]
    pub fn applied(self) -> Option<ContentUpdate> {
        match self {
            Self::Applied(update) => Some(update),
            Self::Queued => None,
        }
    }

    /// Returns true if the work was queued.
    #[must_use]
    pub const fn is_queued(&self) -> bool {
        matches!(self, Self::Queued)
    }
}

#[derive(Debug)]
enum Pending {
    ViewModel(ViewModel),
    Resize(ResizeAnimation),
    Viewport(Size),
}

/// Keeps a [`CollectionView`] in sync with the latest view model.
#[derive(Debug)]
pub struct ContentController<V, C> {
    factory: LayoutFactory,
    view: V,
    commit_handler: C,
    view_model: ViewModel,
    layout: Layout,
    viewport: Size,
    add_header_margin: bool,
    resize_duration: Duration,
    size_overrides: SizeOverrides,
    in_flight: bool,
    pending: VecDeque<Pending>,
}

impl<V, C> ContentController<V, C>
where
    V: CollectionView,
    C: CommitHandler,
{
    /// Creates a controller displaying an empty view model.
    pub fn new(factory: LayoutFactory, view: V, commit_handler: C, viewport: Size) -> Self {
        Self {
            factory,
            view,
            commit_handler,
            view_model: ViewModel::empty(),
            layout: Layout::default(),
            viewport: viewport.sanitized(),
            add_header_margin: true,
            resize_duration: HubConfig::default().resize_duration(),
            size_overrides: SizeOverrides::new(),
            in_flight: false,
            pending: VecDeque::new(),
        }
    }

    /// Creates a controller with margins, header handling and animation
    /// duration taken from `config`.
    pub fn with_config(
        config: &HubConfig,
        registry: ComponentRegistry,
        view: V,
        commit_handler: C,
        viewport: Size,
    ) -> Self {
        let factory = LayoutFactory::new(registry, config.layout_manager());
        let mut controller = Self::new(factory, view, commit_handler, viewport);
        controller.add_header_margin = config.layout.add_header_margin;
        controller.resize_duration = config.resize_duration();
        controller
    }

    /// Sets whether the body is laid out below the header.
    pub const fn set_add_header_margin(&mut self, add_header_margin: bool) {
        self.add_header_margin = add_header_margin;
    }

    /// Sets the duration of resize animations started by content updates.
    pub const fn set_resize_duration(&mut self, duration: Duration) {
        self.resize_duration = duration;
    }

    /// Displayed view model.
    #[must_use]
    pub const fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    /// Layout of the displayed view model.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Current viewport size.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Sizes requested by resize animations, by identifier.
    #[must_use]
    pub const fn size_overrides(&self) -> &SizeOverrides {
        &self.size_overrides
    }

    /// Returns true while a transaction is in flight.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.in_flight
    }

    /// Number of submissions waiting for the transaction in flight.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// The hosting view.
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the hosting view.
    pub const fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Mutable access to the layout factory, for late component
    /// registrations.
    pub const fn layout_factory_mut(&mut self) -> &mut LayoutFactory {
        &mut self.factory
    }

    /// Displays `view_model`, animating from the displayed one.
    pub fn set_view_model(&mut self, view_model: ViewModel) -> Submission {
        self.submit(Pending::ViewModel(view_model))
    }

    /// Resizes component views and relayouts around them.
    ///
    /// Requested sizes stick to their component until it is removed or
    /// reloaded. A later request for the same identifier wins.
    pub fn submit_resize_animation(&mut self, animation: ResizeAnimation) -> Submission {
        self.submit(Pending::Resize(animation))
    }

    /// Relayouts the displayed content for a new viewport size.
    pub fn set_viewport(&mut self, viewport: Size) -> Submission {
        self.submit(Pending::Viewport(viewport))
    }

    /// Called by the host when the transaction in flight finished.
    ///
    /// Applies the oldest queued submission, if any.
    pub fn transaction_did_complete(&mut self) -> Option<ContentUpdate> {
        self.in_flight = false;
        let next = self.pending.pop_front()?;
        debug!(remaining = self.pending.len(), "applying queued content change");
        Some(self.apply(next))
    }

    fn submit(&mut self, work: Pending) -> Submission {
        if self.in_flight {
            self.pending.push_back(work);
            debug!(pending = self.pending.len(), "transaction in flight; queued content change");
            return Submission::Queued;
        }
        Submission::Applied(self.apply(work))
    }

    fn apply(&mut self, work: Pending) -> ContentUpdate {
        match work {
            Pending::ViewModel(view_model) => self.apply_view_model(view_model),
            Pending::Resize(animation) => self.apply_resize(animation),
            Pending::Viewport(viewport) => {
                self.viewport = viewport.sanitized();
                self.relayout(ResizeAnimation::new(self.resize_duration))
            }
        }
    }

    fn apply_view_model(&mut self, view_model: ViewModel) -> ContentUpdate {
        let changes = diff(&self.view_model, &view_model);

        for operation in changes.operations() {
            if matches!(
                operation,
                DiffOperation::Remove { .. } | DiffOperation::Reload { .. }
            ) {
                self.size_overrides.remove(operation.identifier());
            }
        }
        self.size_overrides
            .retain(|identifier, _| displays(&view_model, identifier));

        let layout = self.factory.build_layout_with_overrides(
            self.viewport,
            &view_model,
            Some(&changes),
            Some(&self.layout),
            self.add_header_margin,
            &self.size_overrides,
        );
        self.view_model = view_model;

        let mut animation = ResizeAnimation::new(self.resize_duration);
        add_size_changes(&mut animation, &self.layout, &layout, Some(&changes));
        self.commit(layout, Some(changes), animation)
    }

    fn apply_resize(&mut self, animation: ResizeAnimation) -> ContentUpdate {
        for (identifier, size) in animation.target_view_sizes() {
            if displays(&self.view_model, identifier) {
                self.size_overrides.insert(identifier.clone(), *size);
            } else {
                debug!(%identifier, "resize requested for a component that is not displayed");
            }
        }
        self.relayout(animation)
    }

    fn relayout(&mut self, mut animation: ResizeAnimation) -> ContentUpdate {
        let layout = self.factory.build_layout_with_overrides(
            self.viewport,
            &self.view_model,
            None,
            None,
            self.add_header_margin,
            &self.size_overrides,
        );
        add_size_changes(&mut animation, &self.layout, &layout, None);
        self.commit(layout, None, animation)
    }

    /// Applies `layout` and `animation` to the view in one transaction.
    fn commit(
        &mut self,
        layout: Layout,
        changes: Option<ViewModelDiff>,
        animation: ResizeAnimation,
    ) -> ContentUpdate {
        let resized = animation.target_view_sizes().clone();
        self.in_flight = true;

        let outcome = perform_resize_animation_with(
            animation.commit(),
            &mut self.view,
            &mut self.commit_handler,
            |view| view.apply_layout(&layout, changes.as_ref()),
        );

        debug!(
            items = layout.items().len(),
            resized = resized.len(),
            skipped = outcome.skipped.len(),
            "committed content transaction"
        );
        self.layout = layout;

        ContentUpdate {
            diff: changes,
            resized,
            outcome,
        }
    }
}

impl<V, C> AnimationPerformer for ContentController<V, C>
where
    V: CollectionView,
    C: CommitHandler,
{
    fn perform_resize_animation(&mut self, animation: ResizeAnimation) {
        let _ = self.submit_resize_animation(animation);
    }
}

/// Returns true if `identifier` names the header or a body model.
fn displays(view_model: &ViewModel, identifier: &str) -> bool {
    view_model.contains(identifier)
        || view_model
            .header()
            .is_some_and(|header| header.identifier() == identifier)
}

/// Adds a target size for every kept item whose size differs between
/// `previous` and `layout`. Inserted items appear at their final size, and
/// targets already carried by `animation` are left alone.
fn add_size_changes(
    animation: &mut ResizeAnimation,
    previous: &Layout,
    layout: &Layout,
    changes: Option<&ViewModelDiff>,
) {
    let items = layout.header().into_iter().chain(layout.items());
    for item in items {
        if animation.target_view_sizes().contains_key(item.identifier())
            || changes.is_some_and(|changes| changes.is_inserted(item.identifier()))
        {
            continue;
        }
        let old = previous.frame(item.identifier()).or_else(|| {
            previous
                .header()
                .filter(|header| header.identifier() == item.identifier())
                .map(ItemLayout::frame)
        });
        let size = item.frame().size();
        if old.is_some_and(|old| old.size() != size) {
            animation.add_target_view_size_for(item.identifier(), size);
        }
    }
}
