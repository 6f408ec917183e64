use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{Align, Direction, Error, Result, ScrollBehaviour, ScrollCoordinator};

pub const DEFAULT_OVERSCAN: usize = 3;
pub const DEFAULT_WIDTH: f64 = 400.0;
pub const DEFAULT_HEIGHT: f64 = 400.0;

/// A callback fired after the coordinator recomputes its visible range.
///
/// Read `coordinator.range()` and `coordinator.state()` from inside the callback.
pub type OnChangeCallback = Arc<dyn Fn(&ScrollCoordinator) + Send + Sync>;

/// Fallback size for items that have not been measured yet.
#[derive(Clone)]
pub enum EstimateSize {
    /// Every unmeasured item has the same size.
    Fixed(f64),
    /// Per-index estimate (e.g. known sizes backed by a slice).
    PerIndex(Arc<dyn Fn(usize) -> f64 + Send + Sync>),
}

impl EstimateSize {
    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Self::Fixed(size) if !(size.is_finite() && *size > 0.0) => {
                Err(Error::InvalidEstimatedSize(*size))
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::PerIndex(a), Self::PerIndex(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Returns the estimate for `index`.
    ///
    /// Per-index closures returning a non-finite or negative value yield `0.0`.
    pub fn get(&self, index: usize) -> f64 {
        match self {
            Self::Fixed(size) => *size,
            Self::PerIndex(f) => {
                let size = f(index);
                if size.is_finite() && size >= 0.0 {
                    size
                } else {
                    vwarn!(index, size, "per-index estimate is not a valid size");
                    0.0
                }
            }
        }
    }
}

impl core::fmt::Debug for EstimateSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Self::PerIndex(_) => f.write_str("PerIndex(..)"),
        }
    }
}

/// Configuration for [`crate::ScrollCoordinator`].
///
/// Closures are stored in `Arc`s so cloning is cheap.
pub struct ListOptions {
    pub count: usize,
    pub estimate_size: EstimateSize,
    pub direction: Direction,
    /// Indexes that are always rendered (pinned headers/footers). Out-of-range entries are
    /// ignored.
    pub sticky_indices: Vec<usize>,
    pub overscan: usize,
    pub initial_offset: f64,

    /// Initial programmatic target. `None` means no scroll is requested.
    pub scroll_to_index: Option<usize>,
    pub scroll_to_alignment: Align,
    pub scroll_to_behaviour: ScrollBehaviour,

    /// Viewport width in pixels.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,

    pub on_change: Option<OnChangeCallback>,
}

impl Clone for ListOptions {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            estimate_size: self.estimate_size.clone(),
            direction: self.direction,
            sticky_indices: self.sticky_indices.clone(),
            overscan: self.overscan,
            initial_offset: self.initial_offset,
            scroll_to_index: self.scroll_to_index,
            scroll_to_alignment: self.scroll_to_alignment,
            scroll_to_behaviour: self.scroll_to_behaviour,
            width: self.width,
            height: self.height,
            on_change: self.on_change.clone(),
        }
    }
}

impl ListOptions {
    /// Creates options for `count` items that all start at `estimated_item_size`.
    pub fn new(count: usize, estimated_item_size: f64) -> Self {
        Self::with_estimate(count, EstimateSize::Fixed(estimated_item_size))
    }

    /// Creates options with a per-index size estimate.
    pub fn new_with_estimate_fn(
        count: usize,
        estimate_size: impl Fn(usize) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self::with_estimate(count, EstimateSize::PerIndex(Arc::new(estimate_size)))
    }

    fn with_estimate(count: usize, estimate_size: EstimateSize) -> Self {
        Self {
            count,
            estimate_size,
            direction: Direction::Vertical,
            sticky_indices: Vec::new(),
            overscan: DEFAULT_OVERSCAN,
            initial_offset: 0.0,
            scroll_to_index: None,
            scroll_to_alignment: Align::Start,
            scroll_to_behaviour: ScrollBehaviour::Instant,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            on_change: None,
        }
    }

    /// Rejects configurations the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.estimate_size.validate()?;
        let dims_ok = |v: f64| v.is_finite() && v >= 0.0;
        if !dims_ok(self.width) || !dims_ok(self.height) {
            return Err(Error::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.initial_offset.is_finite() && self.initial_offset >= 0.0) {
            return Err(Error::InvalidScrollOffset(self.initial_offset));
        }
        Ok(())
    }

    pub fn viewport_extent(&self) -> f64 {
        self.direction.viewport_extent(self.width, self.height)
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_sticky_indices(mut self, sticky_indices: impl IntoIterator<Item = usize>) -> Self {
        self.sticky_indices = sticky_indices.into_iter().collect();
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_offset(mut self, offset: f64) -> Self {
        self.initial_offset = offset;
        self
    }

    pub fn with_scroll_to_index(mut self, index: Option<usize>) -> Self {
        self.scroll_to_index = index;
        self
    }

    pub fn with_scroll_to_alignment(mut self, alignment: Align) -> Self {
        self.scroll_to_alignment = alignment;
        self
    }

    pub fn with_scroll_to_behaviour(mut self, behaviour: ScrollBehaviour) -> Self {
        self.scroll_to_behaviour = behaviour;
        self
    }

    /// Sets the viewport size in pixels.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&ScrollCoordinator) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for ListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("count", &self.count)
            .field("estimate_size", &self.estimate_size)
            .field("direction", &self.direction)
            .field("sticky_indices", &self.sticky_indices)
            .field("overscan", &self.overscan)
            .field("initial_offset", &self.initial_offset)
            .field("scroll_to_index", &self.scroll_to_index)
            .field("scroll_to_alignment", &self.scroll_to_alignment)
            .field("scroll_to_behaviour", &self.scroll_to_behaviour)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
