use core::cmp;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl ScrollDirection {
    /// Direction of physical movement from `prev` to `next`, or `None` when the offset did not
    /// change.
    pub fn between(prev: f32, next: f32) -> Option<Self> {
        match next.partial_cmp(&prev) {
            Some(cmp::Ordering::Greater) => Some(Self::Forward),
            Some(cmp::Ordering::Less) => Some(Self::Backward),
            _ => None,
        }
    }
}

/// Upper bound on the number of render slots.
///
/// `Unbounded` gives every backing item a slot. This is useful for short lists (e.g. a chat
/// channel with a handful of messages) where virtualization is not worth the bookkeeping, while
/// still going through the same add/remove protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolSize {
    Bounded(usize),
    Unbounded,
}

impl PoolSize {
    /// Effective pool capacity for a backing sequence of `count` items.
    pub fn capacity_for(self, count: usize) -> usize {
        match self {
            Self::Bounded(n) => cmp::min(n, count),
            Self::Unbounded => count,
        }
    }
}

impl Default for PoolSize {
    fn default() -> Self {
        Self::Bounded(32)
    }
}

/// When a slot leaving the window may be rebound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShiftPolicy {
    /// Rebind a slot only once it is fully outside the viewport.
    #[default]
    Lazy,
    /// Rebind as soon as the window lags behind the viewport, visible or not.
    Eager,
}

/// The visible interval along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub offset: f32,
    pub extent: f32,
}

impl Viewport {
    pub fn new(offset: f32, extent: f32) -> Self {
        Self {
            offset,
            extent: extent.max(0.0),
        }
    }

    pub fn end(&self) -> f32 {
        self.offset + self.extent
    }

    pub fn centre(&self) -> f32 {
        self.offset + self.extent / 2.0
    }

    /// Whether any part of `span` is inside the viewport. Touching edges do not count.
    pub fn intersects(&self, span: SlotSpan) -> bool {
        span.start < self.end() && span.end() > self.offset
    }
}

/// Position and size of a slot along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotSpan {
    pub start: f32,
    pub size: f32,
}

impl SlotSpan {
    pub fn end(&self) -> f32 {
        self.start + self.size
    }
}

/// A contiguous range of backing indexes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl WindowRange {
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
