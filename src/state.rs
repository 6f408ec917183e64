use crate::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Direction, ScrollChangeReason};

/// Which parts of a [`ScrollState`] an update actually touched.
///
/// Offset and reason changes are tracked separately: the reason can flip while the offset stays
/// put (e.g. the host confirms a requested scroll).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollUpdate {
    pub offset_changed: bool,
    pub reason_changed: bool,
}

impl ScrollUpdate {
    pub fn any(&self) -> bool {
        self.offset_changed || self.reason_changed
    }
}

/// Current scroll offset, viewport dimensions and the origin of the last offset change.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    offset: f64,
    change_reason: ScrollChangeReason,
    width: f64,
    height: f64,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0.0,
            change_reason: ScrollChangeReason::Requested,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl ScrollState {
    /// Creates a state tagged [`ScrollChangeReason::Requested`], so the initial offset is
    /// applied to the host.
    pub fn new(offset: f64, width: f64, height: f64) -> Self {
        let mut state = Self::default();
        state.set_scroll_offset(offset, ScrollChangeReason::Requested);
        state.set_dims(width, height);
        state
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn change_reason(&self) -> ScrollChangeReason {
        self.change_reason
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn viewport_extent(&self, direction: Direction) -> f64 {
        direction.viewport_extent(self.width, self.height)
    }

    /// Applies an offset tagged with `reason`.
    ///
    /// The offset is only written when it is finite and differs from the current one; the
    /// reason is written whenever it differs, independently of the offset.
    pub fn set_scroll_offset(&mut self, offset: f64, reason: ScrollChangeReason) -> ScrollUpdate {
        let mut update = ScrollUpdate::default();
        if offset.is_finite() && offset != self.offset {
            self.offset = offset;
            update.offset_changed = true;
        } else if !offset.is_finite() {
            vwarn!(offset, "dropped non-finite scroll offset");
        }
        if reason != self.change_reason {
            self.change_reason = reason;
            update.reason_changed = true;
        }
        update
    }

    /// Re-tags the current offset without moving it.
    pub fn set_change_reason(&mut self, reason: ScrollChangeReason) -> bool {
        if reason == self.change_reason {
            return false;
        }
        self.change_reason = reason;
        true
    }

    /// Applies viewport dimensions. Each axis is guarded on its own: non-finite or negative
    /// values are dropped. Returns `true` if either changed.
    pub fn set_dims(&mut self, width: f64, height: f64) -> bool {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        let mut changed = false;
        if valid(width) && width != self.width {
            self.width = width;
            changed = true;
        }
        if valid(height) && height != self.height {
            self.height = height;
            changed = true;
        }
        if !(valid(width) && valid(height)) {
            vwarn!(width, height, "dropped invalid viewport dimension");
        }
        changed
    }
}
