use alloc::vec::Vec;

use crate::{
    Align, Direction, Error, FrameDebouncer, ListOptions, OnChangeCallback, RangeResolver,
    Result, ScrollBehaviour, ScrollChangeReason, ScrollDirection, ScrollState, ScrollUpdate,
    SizeStore, VisibleRange,
};

/// A scroll the render layer must apply to the physical scroll surface.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollRequest {
    pub offset: f64,
    pub behaviour: ScrollBehaviour,
}

/// Drives a [`SizeStore`], a [`ScrollState`] and a [`RangeResolver`] from host signals.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_scroll` when the host scroll surface moved (observed scroll)
/// - `on_resize` / `record_measurement` as layout information arrives
/// - `on_frame` once per rendering frame, which flushes debounced resizes and measurements
/// - `scroll_to_index` / `scroll_to_offset` for programmatic scrolling (requested scroll)
///
/// After every recompute the `on_change` callback (if any) is invoked; read `range()` and
/// `state()` from it. While `state().change_reason()` is [`ScrollChangeReason::Requested`],
/// `pending_request()` returns the offset the render layer must apply. The host's resulting
/// scroll event re-tags the state as observed, so the request is never re-issued.
#[derive(Clone, Debug)]
pub struct ScrollCoordinator {
    options: ListOptions,
    store: SizeStore,
    state: ScrollState,
    resolver: RangeResolver,
    range: VisibleRange,
    behaviour: ScrollBehaviour,
    scroll_direction: Option<ScrollDirection>,

    resize: FrameDebouncer<(f64, f64)>,
    remeasure: FrameDebouncer<()>,

    batch_depth: usize,
    recompute_pending: bool,
    recomputes: u64,
}

impl ScrollCoordinator {
    /// Creates a coordinator, refusing invalid configurations.
    ///
    /// The initial offset is tagged as requested. If `options.scroll_to_index` is set and in
    /// range, it overrides the initial offset.
    pub fn new(options: ListOptions) -> Result<Self> {
        options.validate()?;
        vdebug!(
            count = options.count,
            overscan = options.overscan,
            sticky = options.sticky_indices.len(),
            "ScrollCoordinator::new"
        );
        let store = SizeStore::new(options.count, options.estimate_size.clone())?;
        let mut c = Self {
            store,
            state: ScrollState::new(options.initial_offset, options.width, options.height),
            resolver: RangeResolver::new(options.sticky_indices.iter().copied()),
            range: VisibleRange::default(),
            behaviour: options.scroll_to_behaviour,
            scroll_direction: None,
            resize: FrameDebouncer::new(),
            remeasure: FrameDebouncer::new(),
            batch_depth: 0,
            recompute_pending: false,
            recomputes: 0,
            options,
        };

        let clamped = c.clamp_scroll_offset(c.state.offset());
        c.state.set_scroll_offset(clamped, ScrollChangeReason::Requested);
        if let Some(index) = c.options.scroll_to_index {
            match c.scroll_to_index_offset(index, c.options.scroll_to_alignment) {
                Ok(offset) => {
                    c.state.set_scroll_offset(offset, ScrollChangeReason::Requested);
                }
                Err(_) => {
                    vwarn!(index, "ignoring out-of-range initial scroll_to_index");
                    c.options.scroll_to_index = None;
                }
            }
        }
        c.recompute_silently();
        Ok(c)
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Applies a full set of options, rebuilding only what changed.
    ///
    /// A changed `scroll_to_index`/alignment/behaviour triple issues a new requested scroll.
    pub fn set_options(&mut self, options: ListOptions) -> Result<()> {
        options.validate()?;
        if let Some(index) = options.scroll_to_index {
            if index >= options.count {
                return Err(Error::out_of_range(index, options.count));
            }
        }
        vdebug!(
            count = options.count,
            overscan = options.overscan,
            "ScrollCoordinator::set_options"
        );

        self.batch_update(|c| {
            c.store.replace_estimate(options.estimate_size.clone())?;
            c.options.estimate_size = options.estimate_size.clone();
            c.set_count(options.count);
            c.set_direction(options.direction);
            c.set_overscan(options.overscan);
            let sticky = RangeResolver::new(options.sticky_indices.iter().copied());
            if c.resolver != sticky {
                c.options.sticky_indices = sticky.sticky_indices().to_vec();
                c.resolver = sticky;
            }
            c.state.set_dims(options.width, options.height);
            c.options.width = options.width;
            c.options.height = options.height;
            c.options.initial_offset = options.initial_offset;
            c.options.on_change = options.on_change.clone();
            c.reclamp();
            c.set_scroll_to(
                options.scroll_to_index,
                options.scroll_to_alignment,
                options.scroll_to_behaviour,
            )?;
            c.invalidate();
            Ok(())
        })
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions)) -> Result<()> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&ScrollCoordinator) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| alloc::sync::Arc::new(f) as OnChangeCallback);
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn range(&self) -> &VisibleRange {
        &self.range
    }

    pub fn store(&self) -> &SizeStore {
        &self.store
    }

    pub fn resolver(&self) -> &RangeResolver {
        &self.resolver
    }

    pub fn count(&self) -> usize {
        self.store.count()
    }

    pub fn direction(&self) -> Direction {
        self.options.direction
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    /// Number of range recomputations so far.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    pub fn viewport_extent(&self) -> f64 {
        self.state.viewport_extent(self.options.direction)
    }

    pub fn total_extent(&self) -> f64 {
        self.store.total_extent(self.store.count())
    }

    pub fn max_scroll_offset(&self) -> f64 {
        (self.total_extent() - self.viewport_extent()).max(0.0)
    }

    pub fn clamp_scroll_offset(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_scroll_offset())
    }

    pub fn item_offset(&self, index: usize) -> Option<f64> {
        (index < self.count()).then(|| self.store.cumulative_offset(index))
    }

    pub fn item_size(&self, index: usize) -> Option<f64> {
        (index < self.count()).then(|| self.store.size_of(index))
    }

    /// Index of the item covering `offset`. `None` for an empty list or a non-finite offset.
    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        self.store.index_at_offset(offset)
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.store.is_measured(index)
    }

    pub fn measured_count(&self) -> usize {
        self.store.measured_count()
    }

    /// The scroll the render layer must still apply, if the last offset change was requested.
    pub fn pending_request(&self) -> Option<ScrollRequest> {
        (self.state.change_reason() == ScrollChangeReason::Requested).then_some(ScrollRequest {
            offset: self.state.offset(),
            behaviour: self.behaviour,
        })
    }

    /// Call this when the host reports that its scroll surface moved (wheel, drag, keyboard, or
    /// the side effect of applying a requested scroll).
    ///
    /// The offset is clamped to `[0, max_scroll_offset]` and tagged observed. While a resize is
    /// waiting for `on_frame`, the bound comes from the pending viewport, which is the one the
    /// host already scrolled in. Non-finite offsets are dropped.
    pub fn on_scroll(&mut self, raw_offset: f64) -> ScrollUpdate {
        if !raw_offset.is_finite() {
            vwarn!(raw_offset, "dropped non-finite scroll offset");
            return ScrollUpdate::default();
        }
        vtrace!(raw_offset, "on_scroll");
        let max = (self.total_extent() - self.host_viewport_extent()).max(0.0);
        self.apply_offset(raw_offset.clamp(0.0, max), ScrollChangeReason::Observed)
    }

    /// Viewport extent including a resize that has not been flushed yet.
    fn host_viewport_extent(&self) -> f64 {
        match self.resize.pending() {
            Some(&(width, height)) => {
                let mut next = self.state;
                next.set_dims(width, height);
                next.viewport_extent(self.options.direction)
            }
            None => self.viewport_extent(),
        }
    }

    /// Schedules a viewport resize for the next frame. Only the last size reported before
    /// `on_frame` is applied.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        vtrace!(width, height, "on_resize");
        self.resize.start((width, height));
    }

    /// Applies viewport dimensions immediately, bypassing the frame debouncer.
    pub fn apply_resize(&mut self, width: f64, height: f64) -> bool {
        if !self.state.set_dims(width, height) {
            return false;
        }
        vtrace!(width, height, "apply_resize");
        self.resize.stop();
        self.invalidate();
        true
    }

    /// Records a measured size. The size is visible to queries immediately; the visible range
    /// is recomputed on the next `on_frame`.
    ///
    /// Returns `Ok(true)` when the item's size changed.
    pub fn record_measurement(&mut self, index: usize, size: f64) -> Result<bool> {
        let changed = self.store.record_measurement(index, size)?;
        if changed {
            self.remeasure.start(());
        }
        Ok(changed)
    }

    /// Records many measurements at once.
    ///
    /// If any index is out of range nothing is applied. Returns how many sizes changed.
    pub fn record_measurements(
        &mut self,
        measurements: impl IntoIterator<Item = (usize, f64)>,
    ) -> Result<usize> {
        let count = self.count();
        let measurements: Vec<(usize, f64)> = measurements.into_iter().collect();
        if let Some(&(index, _)) = measurements.iter().find(|(i, _)| *i >= count) {
            return Err(Error::out_of_range(index, count));
        }
        let mut changed = 0usize;
        for (index, size) in measurements {
            if self.store.record_measurement(index, size)? {
                changed += 1;
            }
        }
        if changed > 0 {
            self.remeasure.start(());
        }
        Ok(changed)
    }

    /// Frame boundary: applies the last pending resize and any pending re-measurement in one
    /// recompute.
    ///
    /// Returns `true` if the visible range was recomputed.
    pub fn on_frame(&mut self) -> bool {
        let before = self.recomputes;
        if self.has_pending_frame() {
            vtrace!(
                resize = self.resize.is_pending(),
                remeasure = self.remeasure.is_pending(),
                "on_frame"
            );
        }
        self.batch_update(|c| {
            if let Some((width, height)) = c.resize.take() {
                c.apply_resize(width, height);
            }
            if c.remeasure.take().is_some() {
                c.invalidate();
            }
        });
        self.recomputes != before
    }

    /// Cancels pending resize/measurement work without applying it.
    ///
    /// An offset observed against the cancelled viewport is pulled back inside the content.
    pub fn cancel_pending_frame(&mut self) {
        if self.resize.stop() {
            let offset = self.state.offset();
            self.reclamp();
            if self.state.offset() != offset {
                self.invalidate();
            }
        }
        self.remeasure.stop();
    }

    pub fn has_pending_frame(&self) -> bool {
        self.resize.is_pending() || self.remeasure.is_pending()
    }

    /// Computes the clamped offset that brings `index` into view with `align`.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> Result<f64> {
        let count = self.count();
        if index >= count {
            return Err(Error::out_of_range(index, count));
        }
        let start = self.store.cumulative_offset(index);
        let size = self.store.size_of(index);
        let end = start + size;
        let view = self.viewport_extent();
        let cur = self.state.offset();

        let target = match align {
            Align::Start => start,
            Align::End => end - view,
            Align::Center => start + size / 2.0 - view / 2.0,
            Align::Auto => {
                if start >= cur && end <= cur + view {
                    cur
                } else if start < cur {
                    start
                } else {
                    end - view
                }
            }
        };
        Ok(self.clamp_scroll_offset(target))
    }

    /// Programmatically scrolls to `index`, tagging the change as requested.
    ///
    /// `behaviour` is forwarded to the render layer through [`Self::pending_request`]. The change
    /// is tagged requested even when the target equals the current offset. Out-of-range indexes
    /// are rejected without touching any state.
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_index(
        &mut self,
        index: usize,
        align: Align,
        behaviour: ScrollBehaviour,
    ) -> Result<f64> {
        let offset = self.scroll_to_index_offset(index, align)?;
        vtrace!(index, ?align, offset, "scroll_to_index");
        self.request_offset(offset, behaviour);
        Ok(offset)
    }

    /// Programmatically scrolls to a raw offset (clamped), tagging the change as requested.
    pub fn scroll_to_offset(&mut self, offset: f64, behaviour: ScrollBehaviour) -> f64 {
        if !offset.is_finite() {
            vwarn!(offset, "dropped non-finite requested offset");
            return self.state.offset();
        }
        let offset = self.clamp_scroll_offset(offset);
        self.request_offset(offset, behaviour);
        offset
    }

    /// Updates the scroll-to target. A new requested scroll is issued only when the
    /// `(index, align, behaviour)` triple differs from the current one, so repeated renders
    /// with the same target never re-request.
    ///
    /// Returns the requested offset, or `None` if nothing was requested.
    pub fn set_scroll_to(
        &mut self,
        index: Option<usize>,
        align: Align,
        behaviour: ScrollBehaviour,
    ) -> Result<Option<f64>> {
        let unchanged = self.options.scroll_to_index == index
            && self.options.scroll_to_alignment == align
            && self.options.scroll_to_behaviour == behaviour;
        if unchanged {
            return Ok(None);
        }
        let offset = match index {
            Some(index) => Some(self.scroll_to_index(index, align, behaviour)?),
            None => None,
        };
        self.options.scroll_to_index = index;
        self.options.scroll_to_alignment = align;
        self.options.scroll_to_behaviour = behaviour;
        Ok(offset)
    }

    /// Marks a requested scroll as physically applied by the host without moving the offset.
    pub fn confirm_requested_scroll(&mut self) -> bool {
        if !self.state.set_change_reason(ScrollChangeReason::Observed) {
            return false;
        }
        self.invalidate();
        true
    }

    pub fn set_count(&mut self, count: usize) {
        if self.store.count() == count {
            return;
        }
        self.options.count = count;
        self.store.set_count(count);
        self.reclamp();
        self.invalidate();
    }

    pub fn set_estimate(&mut self, size: f64) -> Result<()> {
        self.store.set_estimate(size)?;
        self.options.estimate_size = self.store.estimate().clone();
        self.reclamp();
        self.invalidate();
        Ok(())
    }

    pub fn set_estimate_fn(&mut self, f: impl Fn(usize) -> f64 + Send + Sync + 'static) {
        self.store.set_estimate_fn(f);
        self.options.estimate_size = self.store.estimate().clone();
        self.reclamp();
        self.invalidate();
    }

    pub fn reset_measurements(&mut self) {
        self.store.reset_measurements();
        self.reclamp();
        self.invalidate();
    }

    pub fn set_sticky_indices(&mut self, sticky_indices: impl IntoIterator<Item = usize>) {
        self.resolver.set_sticky_indices(sticky_indices);
        self.options.sticky_indices = self.resolver.sticky_indices().to_vec();
        self.invalidate();
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.invalidate();
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if self.options.direction == direction {
            return;
        }
        self.options.direction = direction;
        self.invalidate();
    }

    /// Batches multiple updates into a single recompute and `on_change` notification.
    ///
    /// Nested batches flush once, when the outermost batch returns.
    pub fn batch_update<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.batch_depth = self.batch_depth.saturating_add(1);
        let out = f(self);
        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 && core::mem::take(&mut self.recompute_pending) {
            self.recompute();
        }
        out
    }

    fn request_offset(&mut self, offset: f64, behaviour: ScrollBehaviour) {
        self.behaviour = behaviour;
        self.apply_offset(offset, ScrollChangeReason::Requested);
    }

    fn apply_offset(&mut self, offset: f64, reason: ScrollChangeReason) -> ScrollUpdate {
        let prev = self.state.offset();
        let update = self.state.set_scroll_offset(offset, reason);
        if update.offset_changed {
            self.scroll_direction = Some(if offset > prev {
                ScrollDirection::Forward
            } else {
                ScrollDirection::Backward
            });
        }
        if update.any() {
            self.invalidate();
        }
        update
    }

    /// Keeps the offset inside the content after the extent shrank, without re-tagging it.
    fn reclamp(&mut self) {
        let offset = self.state.offset();
        let clamped = self.clamp_scroll_offset(offset);
        if clamped != offset {
            let reason = self.state.change_reason();
            self.state.set_scroll_offset(clamped, reason);
        }
    }

    fn invalidate(&mut self) {
        if self.batch_depth > 0 {
            self.recompute_pending = true;
            return;
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.recompute_silently();
        if let Some(cb) = self.options.on_change.clone() {
            cb(self);
        }
    }

    fn recompute_silently(&mut self) {
        let mut range = core::mem::take(&mut self.range);
        self.resolver.resolve_into(
            &self.store,
            self.store.count(),
            self.state.offset(),
            self.viewport_extent(),
            self.options.overscan,
            &mut range,
        );
        self.range = range;
        self.recomputes = self.recomputes.wrapping_add(1);
    }
}
