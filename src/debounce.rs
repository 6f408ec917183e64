/// Coalesces a burst of signals into one trailing invocation per frame.
///
/// The debouncer is adapter-driven: it holds at most one pending payload, and the adapter
/// calls [`FrameDebouncer::take`] (or [`FrameDebouncer::run_frame`] for closures) once per
/// rendering frame, typically from a `requestAnimationFrame`/vsync/timer tick.
///
/// - `start(x)` replaces any pending payload, so the latest one wins.
/// - `stop()` drops the pending payload without running it. It is a no-op when nothing is
///   pending.
#[derive(Clone, Debug)]
pub struct FrameDebouncer<T> {
    pending: Option<T>,
    scheduled: u64,
    flushed: u64,
}

impl<T> Default for FrameDebouncer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameDebouncer<T> {
    pub const fn new() -> Self {
        Self {
            pending: None,
            scheduled: 0,
            flushed: 0,
        }
    }

    /// Schedules `payload` for the next frame, cancelling any earlier pending payload.
    pub fn start(&mut self, payload: T) {
        if self.pending.replace(payload).is_some() {
            vtrace!(scheduled = self.scheduled, "FrameDebouncer: coalesced");
        }
        self.scheduled = self.scheduled.wrapping_add(1);
    }

    /// Cancels the pending payload. Returns `true` if something was pending.
    pub fn stop(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Frame boundary: hands out the pending payload, if any.
    pub fn take(&mut self) -> Option<T> {
        let payload = self.pending.take()?;
        self.flushed = self.flushed.wrapping_add(1);
        Some(payload)
    }

    /// Number of `start` calls so far.
    pub fn scheduled_count(&self) -> u64 {
        self.scheduled
    }

    /// Number of payloads handed out by `take`.
    pub fn flushed_count(&self) -> u64 {
        self.flushed
    }
}

impl<F: FnOnce()> FrameDebouncer<F> {
    /// Frame boundary for closure payloads: runs the latest scheduled closure.
    ///
    /// Returns `true` if a closure ran.
    pub fn run_frame(&mut self) -> bool {
        match self.take() {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }
}

/// A type-erased closure payload, for debouncers that schedule arbitrary work.
pub type FrameCallback = alloc::boxed::Box<dyn FnOnce() + Send>;
