use alloc::string::ToString;
use alloc::vec::Vec;
use core::str::FromStr;

use crate::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    Auto,
}

/// The scroll axis of a list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

impl Direction {
    /// Returns the viewport extent along the scroll axis.
    pub fn viewport_extent(self, width: f64, height: f64) -> f64 {
        match self {
            Self::Vertical => height,
            Self::Horizontal => width,
        }
    }

    /// The positional property a render layer offsets items with.
    pub fn scroll_property(self) -> &'static str {
        match self {
            Self::Vertical => "top",
            Self::Horizontal => "left",
        }
    }
}

/// A hint forwarded to the render layer when it applies a requested scroll.
///
/// The engine never interprets it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollBehaviour {
    #[default]
    Instant,
    Smooth,
}

/// Origin of the most recent scroll offset mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollChangeReason {
    /// The host reported a scroll that already happened.
    Observed,
    /// The engine asks the host to move to the stored offset.
    #[default]
    Requested,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VirtualRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleItem {
    pub index: usize,
    /// Offset of the item's leading edge along the scroll axis.
    pub offset: f64,
    pub size: f64,
    /// `true` when the item is only present because it is sticky.
    pub sticky: bool,
}

impl VisibleItem {
    pub fn end(&self) -> f64 {
        self.offset + self.size
    }
}

/// The set of items a render layer must draw for one scroll/viewport state.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    /// Geometrically visible items (no overscan).
    pub visible: VirtualRange,
    /// `visible` expanded by overscan and clamped to the item count.
    pub window: VirtualRange,
    /// Ascending by index. Sticky items outside `window` are included.
    pub items: Vec<VisibleItem>,
}

impl VisibleRange {
    pub fn start_index(&self) -> usize {
        self.window.start_index
    }

    /// Inclusive last index of the overscanned window, `None` when the window is empty.
    pub fn stop_index(&self) -> Option<usize> {
        if self.window.is_empty() {
            None
        } else {
            Some(self.window.end_index - 1)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().map(|it| it.index)
    }
}

/// A display-facing size hint, resolved to pixels before it reaches the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
    Pixels(f64),
    Percent(f64),
}

impl Dimension {
    pub fn resolve(self, container_extent: f64) -> f64 {
        match self {
            Self::Pixels(px) => px,
            Self::Percent(pct) => container_extent * pct / 100.0,
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::Percent(100.0)
    }
}

impl FromStr for Dimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || Error::InvalidDimension(s.to_string());
        let (number, percent) = if let Some(n) = s.strip_suffix('%') {
            (n, true)
        } else if let Some(n) = s.strip_suffix("px") {
            (n, false)
        } else {
            (s, false)
        };
        let value: f64 = number.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        Ok(if percent {
            Self::Percent(value)
        } else {
            Self::Pixels(value)
        })
    }
}
