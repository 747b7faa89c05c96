use alloc::collections::VecDeque;

use crate::PooledSlot;

/// The ordered set of live render slots.
///
/// Slot `i` represents backing index `window.start() + i`. Moving a slot between the two ends is
/// O(1); removing from the middle is O(pool size), which is the price of keeping indexes
/// contiguous.
#[derive(Clone, Debug)]
pub struct SlotPool<S> {
    slots: VecDeque<PooledSlot<S>>,
}

impl<S> SlotPool<S> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: VecDeque::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&PooledSlot<S>> {
        self.slots.get(position)
    }

    pub fn first(&self) -> Option<&PooledSlot<S>> {
        self.slots.front()
    }

    pub fn last(&self) -> Option<&PooledSlot<S>> {
        self.slots.back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PooledSlot<S>> + ExactSizeIterator {
        self.slots.iter()
    }

    /// Backing indexes of the slots, in pool order.
    pub fn bound_indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().map(PooledSlot::index)
    }

    /// Position of the slot bound to `index`.
    pub fn position_of(&self, index: usize) -> Option<usize> {
        let first = self.slots.front()?.index();
        let position = index.checked_sub(first)?;
        (position < self.slots.len()).then_some(position)
    }

    pub(crate) fn get_mut(&mut self, position: usize) -> Option<&mut PooledSlot<S>> {
        self.slots.get_mut(position)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut PooledSlot<S>> {
        self.slots.iter_mut()
    }

    pub(crate) fn push_back(&mut self, slot: PooledSlot<S>) {
        self.slots.push_back(slot);
    }

    pub(crate) fn push_front(&mut self, slot: PooledSlot<S>) {
        self.slots.push_front(slot);
    }

    pub(crate) fn pop_front(&mut self) -> Option<PooledSlot<S>> {
        self.slots.pop_front()
    }

    pub(crate) fn pop_back(&mut self) -> Option<PooledSlot<S>> {
        self.slots.pop_back()
    }

    pub(crate) fn insert(&mut self, position: usize, slot: PooledSlot<S>) {
        self.slots.insert(position, slot);
    }

    pub(crate) fn remove(&mut self, position: usize) -> Option<PooledSlot<S>> {
        self.slots.remove(position)
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = PooledSlot<S>> + '_ {
        self.slots.drain(..)
    }
}
