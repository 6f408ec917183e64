use crate::VirtualRange;

/// Merges an overscanned window with sticky indexes into one ascending, duplicate-free stream.
///
/// Contract:
/// - Out-of-bounds indexes are ignored.
/// - Duplicates are ignored.
/// - Out-of-order indexes are ignored (and debug-asserted).
pub(crate) struct IndexEmitter<'a> {
    count: usize,
    window: VirtualRange,
    last: Option<usize>,
    emit: &'a mut dyn FnMut(usize, bool),
}

impl<'a> IndexEmitter<'a> {
    pub(crate) fn new(
        count: usize,
        window: VirtualRange,
        emit: &'a mut dyn FnMut(usize, bool),
    ) -> Self {
        Self {
            count,
            window,
            last: None,
            emit,
        }
    }

    fn emit(&mut self, index: usize, sticky: bool) {
        if index >= self.count {
            vwarn!(index, count = self.count, "IndexEmitter: out-of-bounds index");
            return;
        }

        if let Some(prev) = self.last {
            if index == prev {
                return;
            }
            if index < prev {
                vwarn!(
                    prev,
                    next = index,
                    "IndexEmitter: indexes must be emitted in ascending order"
                );
                debug_assert!(
                    index > prev,
                    "IndexEmitter: indexes must be emitted in ascending order (prev={prev}, next={index})"
                );
                return;
            }
        }

        self.last = Some(index);
        (self.emit)(index, sticky);
    }

    fn emit_window(&mut self) {
        let end = self.window.end_index.min(self.count);
        for i in self.window.start_index..end {
            self.emit(i, false);
        }
    }

    /// Emits sticky indexes before the window, the window itself, then sticky indexes after it.
    ///
    /// `sticky` must be sorted ascending.
    pub(crate) fn emit_with_sticky(&mut self, sticky: &[usize]) {
        let split = sticky.partition_point(|&i| i < self.window.start_index);
        for &i in &sticky[..split] {
            self.emit(i, true);
        }
        self.emit_window();
        for &i in &sticky[split..] {
            if !self.window.contains(i) {
                self.emit(i, true);
            }
        }
    }
}
