use alloc::vec::Vec;

use crate::emitter::IndexEmitter;
use crate::{SizeStore, VirtualRange, VisibleItem, VisibleRange};

/// Maps a scroll offset and viewport extent to the items that must be rendered.
///
/// The resolver only holds the sticky index set (kept sorted and deduplicated); everything else
/// is passed per call, so resolving twice with the same inputs yields the same range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeResolver {
    sticky: Vec<usize>,
}

impl RangeResolver {
    pub fn new(sticky_indices: impl IntoIterator<Item = usize>) -> Self {
        let mut resolver = Self::default();
        resolver.set_sticky_indices(sticky_indices);
        resolver
    }

    pub fn sticky_indices(&self) -> &[usize] {
        &self.sticky
    }

    pub fn set_sticky_indices(&mut self, sticky_indices: impl IntoIterator<Item = usize>) {
        self.sticky.clear();
        self.sticky.extend(sticky_indices);
        self.sticky.sort_unstable();
        self.sticky.dedup();
    }

    pub fn resolve(
        &self,
        store: &SizeStore,
        item_count: usize,
        scroll_offset: f64,
        viewport_extent: f64,
        overscan: usize,
    ) -> VisibleRange {
        let mut out = VisibleRange::default();
        self.resolve_into(
            store,
            item_count,
            scroll_offset,
            viewport_extent,
            overscan,
            &mut out,
        );
        out
    }

    /// Same as [`Self::resolve`], but reuses `out`'s allocation.
    pub fn resolve_into(
        &self,
        store: &SizeStore,
        item_count: usize,
        scroll_offset: f64,
        viewport_extent: f64,
        overscan: usize,
        out: &mut VisibleRange,
    ) {
        out.items.clear();
        let count = item_count.min(store.count());
        if count == 0 {
            out.visible = VirtualRange::EMPTY;
            out.window = VirtualRange::EMPTY;
            return;
        }

        let visible = Self::visible_range(store, count, scroll_offset, viewport_extent);
        let window = if visible.is_empty() {
            VirtualRange::EMPTY
        } else {
            VirtualRange {
                start_index: visible.start_index.saturating_sub(overscan),
                end_index: visible.end_index.saturating_add(overscan).min(count),
            }
        };
        vtrace!(
            scroll_offset,
            viewport_extent,
            visible_start = visible.start_index,
            visible_end = visible.end_index,
            window_start = window.start_index,
            window_end = window.end_index,
            "RangeResolver::resolve"
        );

        let items = &mut out.items;
        let mut push = |index: usize, sticky: bool| {
            items.push(VisibleItem {
                index,
                offset: store.cumulative_offset(index),
                size: store.size_of(index),
                sticky,
            });
        };
        IndexEmitter::new(count, window, &mut push).emit_with_sticky(&self.sticky);

        out.visible = visible;
        out.window = window;
    }

    /// Geometrically visible items (no overscan, no sticky indexes).
    ///
    /// Offsets past the end of the content are clamped to the last full viewport.
    pub fn visible_range(
        store: &SizeStore,
        item_count: usize,
        scroll_offset: f64,
        viewport_extent: f64,
    ) -> VirtualRange {
        let count = item_count.min(store.count());
        if count == 0 || !(viewport_extent.is_finite() && viewport_extent > 0.0) {
            return VirtualRange::EMPTY;
        }

        let total = store.total_extent(count);
        if total <= 0.0 {
            return VirtualRange::EMPTY;
        }
        let max_scroll = (total - viewport_extent).max(0.0);
        let offset = if scroll_offset.is_finite() {
            scroll_offset.clamp(0.0, max_scroll)
        } else {
            0.0
        };
        let end_edge = offset + viewport_extent;

        let Some(start) = store.index_at_offset(offset) else {
            return VirtualRange::EMPTY;
        };
        let last = store.index_at_offset(end_edge).unwrap_or(count - 1).max(start);
        let end = if store.cumulative_offset(last) < end_edge {
            last + 1
        } else {
            last
        };

        VirtualRange {
            start_index: start,
            end_index: end.max(start + 1).min(count),
        }
    }
}
