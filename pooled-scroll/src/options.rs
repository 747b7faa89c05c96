use core::cmp;

use crate::{PoolSize, ShiftPolicy, SlotSpan};

/// Configuration for [`crate::Window`].
///
/// All lengths are in the same unit as the scroll offset (pixels, terminal rows, ...). Items are
/// uniformly sized: every slot is `slot_extent` long, and consecutive slots are separated by
/// `spacing`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolOptions {
    pub pool_size: PoolSize,
    /// Backing index represented by the first slot after construction (clamped).
    pub starting_index: usize,
    pub slot_extent: f32,
    /// Space between items.
    pub spacing: f32,
    /// Padding before the first item.
    pub padding_start: f32,
    /// Padding after the last item.
    pub padding_end: f32,
    pub shift_policy: ShiftPolicy,
    /// Backing index rendered as selected, if any.
    pub selected_index: Option<usize>,
}

impl PoolOptions {
    /// Creates options for a pool of at most `pool_size` slots of `slot_extent` each.
    pub fn new(pool_size: usize, slot_extent: f32) -> Self {
        Self {
            pool_size: PoolSize::Bounded(pool_size),
            starting_index: 0,
            slot_extent: slot_extent.max(0.0),
            spacing: 0.0,
            padding_start: 0.0,
            padding_end: 0.0,
            shift_policy: ShiftPolicy::default(),
            selected_index: None,
        }
    }

    /// Creates options where every backing item gets its own slot.
    pub fn unbounded(slot_extent: f32) -> Self {
        Self::new(0, slot_extent).with_pool_size(PoolSize::Unbounded)
    }

    pub fn with_pool_size(mut self, pool_size: PoolSize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_starting_index(mut self, starting_index: usize) -> Self {
        self.starting_index = starting_index;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    pub fn with_padding(mut self, padding_start: f32, padding_end: f32) -> Self {
        self.padding_start = padding_start.max(0.0);
        self.padding_end = padding_end.max(0.0);
        self
    }

    pub fn with_shift_policy(mut self, shift_policy: ShiftPolicy) -> Self {
        self.shift_policy = shift_policy;
        self
    }

    pub fn with_selected_index(mut self, selected_index: Option<usize>) -> Self {
        self.selected_index = selected_index;
        self
    }

    /// Distance between the starts of two consecutive slots.
    pub fn stride(&self) -> f32 {
        self.slot_extent + self.spacing
    }

    pub fn item_span(&self, index: usize) -> SlotSpan {
        SlotSpan {
            start: self.padding_start + index as f32 * self.stride(),
            size: self.slot_extent,
        }
    }

    /// Total scrollable length of `count` items, including padding. Spacing is only counted
    /// between items.
    pub fn total_extent(&self, count: usize) -> f32 {
        let padding = self.padding_start + self.padding_end;
        if count == 0 {
            return padding;
        }
        padding + count as f32 * self.slot_extent + (count - 1) as f32 * self.spacing
    }

    /// Index of the item covering `offset`. Offsets inside the spacing after an item map to that
    /// item; offsets before the first item map to `0`, offsets past the end to the last index.
    pub fn index_at_offset(&self, offset: f32, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        let stride = self.stride();
        let in_items = offset - self.padding_start;
        if stride <= 0.0 || in_items <= 0.0 {
            return Some(0);
        }
        let index = (in_items / stride) as usize;
        Some(cmp::min(index, count - 1))
    }
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self::new(32, 1.0)
    }
}
