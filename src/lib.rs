//! A headless windowing and scroll-coordination engine for virtualized lists.
//!
//! Given an item count, per-item sizes (estimated or measured), a viewport and a scroll
//! offset, this crate computes which items must be rendered and where. It also keeps scroll
//! state consistent between scrolls the host reports (observed) and scrolls the engine asks
//! for (requested), so a render layer applying a programmatic scroll never feeds its own
//! scroll event back into another request.
//!
//! Building blocks, leaf first:
//! - [`SizeStore`]: measured/estimated sizes and lazily cached cumulative offsets
//! - [`RangeResolver`]: binary-searched visible window, overscan and sticky indexes
//! - [`ScrollState`]: offset + viewport dimensions + [`ScrollChangeReason`]
//! - [`FrameDebouncer`]: one trailing payload per rendering frame
//! - [`ScrollCoordinator`]: wires the above to host scroll/resize/measurement signals
//!
//! It is UI-agnostic. A render layer is expected to provide:
//! - viewport size (width/height, in pixels)
//! - observed scroll offsets
//! - item measurements once items are laid out
//! - a frame tick (`ScrollCoordinator::on_frame`)
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod coordinator;
mod debounce;
mod emitter;
mod error;
mod fenwick;
mod options;
mod resolver;
mod size_store;
mod state;
mod types;


pub use coordinator::{ScrollCoordinator, ScrollRequest};
pub use debounce::{FrameCallback, FrameDebouncer};
pub use error::{Error, Result};
pub use options::{
    DEFAULT_HEIGHT, DEFAULT_OVERSCAN, DEFAULT_WIDTH, EstimateSize, ListOptions, OnChangeCallback,
};
pub use resolver::RangeResolver;
pub use size_store::SizeStore;
pub use state::{ScrollState, ScrollUpdate};
pub use types::{
    Align, Dimension, Direction, ScrollBehaviour, ScrollChangeReason, ScrollDirection,
    VirtualRange, VisibleItem, VisibleRange,
};
