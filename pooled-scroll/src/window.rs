use alloc::vec::Vec;
use core::{cmp, mem};

use crate::{
    Align, PoolOptions, PoolSize, PooledSlot, ScrollDirection, ShiftPolicy, SlotFactory, SlotPool,
    SlotSpan, Viewport, WindowRange, WindowSnapshot,
};

/// The backing sequence and the slot pool that renders a window over it.
///
/// Both collections live in this one value, so every structural change (add, remove, shift,
/// reflow) sees them consistent. For cross-thread access wrap it in [`crate::SharedWindow`]
/// instead of locking the parts separately.
///
/// Invariants, after every public call:
/// - `start() + pool().len() <= len()`
/// - `pool().len() <= capacity()`
/// - slot `i` is bound to backing index `start() + i`
///
/// Out-of-range requests (shifting past either end, removing a missing index) are no-ops.
pub struct Window<T, F: SlotFactory<T>> {
    options: PoolOptions,
    items: Vec<T>,
    pool: SlotPool<F::Slot>,
    factory: F,
    start: usize,
    selected: Option<usize>,
    reflows: u64,
    shifts: u64,
}

impl<T, F: SlotFactory<T>> Window<T, F> {
    /// Creates a window over `items` and fills the pool starting at `options.starting_index`
    /// (clamped so the pool fits).
    pub fn new(items: Vec<T>, factory: F, options: PoolOptions) -> Self {
        let capacity = options.pool_size.capacity_for(items.len());
        let start = cmp::min(options.starting_index, items.len() - capacity);
        if start != options.starting_index {
            pwarn!(
                requested = options.starting_index,
                start,
                "Window::new: starting index clamped"
            );
        }
        pdebug!(count = items.len(), capacity, start, "Window::new");
        let selected = options.selected_index.filter(|&i| i < items.len());
        let mut w = Self {
            options,
            items,
            pool: SlotPool::with_capacity(capacity),
            factory,
            start,
            selected,
            reflows: 0,
            shifts: 0,
        };
        w.fill();
        w
    }

    pub fn options(&self) -> &PoolOptions {
        &self.options
    }

    /// Replaces the options and reflows every slot (geometry or pool size may have changed).
    pub fn set_options(&mut self, options: PoolOptions) {
        self.options = options;
        self.reflow();
    }

    pub fn set_pool_size(&mut self, pool_size: PoolSize) {
        if self.options.pool_size == pool_size {
            return;
        }
        pdebug!(?pool_size, "set_pool_size");
        self.options.pool_size = pool_size;
        self.reflow();
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn pool(&self) -> &SlotPool<F::Slot> {
        &self.pool
    }

    /// First backing index represented in the pool.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn window_range(&self) -> WindowRange {
        WindowRange {
            start_index: self.start,
            end_index: self.start + self.pool.len(),
        }
    }

    /// Number of slots the pool holds once settled: `min(pool_size, len())`.
    pub fn capacity(&self) -> usize {
        self.options.pool_size.capacity_for(self.items.len())
    }

    pub fn total_extent(&self) -> f32 {
        self.options.total_extent(self.items.len())
    }

    pub fn item_span(&self, index: usize) -> Option<SlotSpan> {
        (index < self.items.len()).then(|| self.options.item_span(index))
    }

    pub fn index_at_offset(&self, offset: f32) -> Option<usize> {
        self.options.index_at_offset(offset, self.items.len())
    }

    pub fn max_scroll_offset(&self, viewport_extent: f32) -> f32 {
        (self.total_extent() - viewport_extent).max(0.0)
    }

    pub fn clamp_scroll_offset(&self, offset: f32, viewport_extent: f32) -> f32 {
        offset.clamp(0.0, self.max_scroll_offset(viewport_extent))
    }

    /// Scroll offset that brings `index` into view with the given alignment (clamped).
    pub fn scroll_to_index_offset(&self, index: usize, align: Align, viewport: Viewport) -> f32 {
        let count = self.items.len();
        if count == 0 {
            return 0.0;
        }
        let span = self.options.item_span(cmp::min(index, count - 1));
        let view = viewport.extent;

        let target = match align {
            Align::Start => span.start,
            Align::End => span.end() - view,
            Align::Center => span.start + span.size / 2.0 - view / 2.0,
            Align::Auto => {
                if span.start >= viewport.offset && span.end() <= viewport.end() {
                    viewport.offset
                } else if span.start < viewport.offset {
                    span.start
                } else {
                    span.end() - view
                }
            }
        };

        self.clamp_scroll_offset(target, view)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Changes the selected item and refreshes the selected state of every bound slot.
    pub fn set_selected_index(&mut self, selected: Option<usize>) {
        let selected = selected.filter(|&i| i < self.items.len());
        if self.selected == selected {
            return;
        }
        self.selected = selected;
        let Self { pool, factory, .. } = self;
        for slot in pool.iter_mut() {
            let is_selected = selected == Some(slot.index());
            if slot.is_selected() != is_selected {
                factory.set_selected(slot.slot_mut(), is_selected);
                slot.set_selected(is_selected);
            }
        }
    }

    /// Number of reflow passes (structural changes) since construction.
    pub fn reflow_count(&self) -> u64 {
        self.reflows
    }

    /// Number of single-slot shifts since construction.
    pub fn shift_count(&self) -> u64 {
        self.shifts
    }

    /// Calls `f` for every bound slot that intersects `viewport`, in index order.
    pub fn for_each_visible_slot(&self, viewport: Viewport, mut f: impl FnMut(&PooledSlot<F::Slot>)) {
        for slot in self.pool.iter() {
            if viewport.intersects(slot.span()) {
                f(slot);
            }
        }
    }

    /// Collects the backing indexes of the visible slots into `out` (clears `out` first).
    pub fn collect_visible_indexes(&self, viewport: Viewport, out: &mut Vec<usize>) {
        out.clear();
        self.for_each_visible_slot(viewport, |s| out.push(s.index()));
    }

    /// Checks the window invariants. Intended for tests and debug assertions.
    pub fn is_consistent(&self) -> bool {
        self.start + self.pool.len() <= self.items.len()
            && self.pool.len() <= self.capacity()
            && self.pool.iter().enumerate().all(|(i, s)| {
                s.index() == self.start + i && s.span() == self.options.item_span(s.index())
            })
    }

    pub fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot {
            start: self.start,
            pool_len: self.pool.len(),
            count: self.items.len(),
            selected: self.selected,
            total_extent: self.total_extent(),
        }
    }

    /// Restores the window start and selection from a snapshot taken earlier (clamped to the
    /// current sequence).
    pub fn restore(&mut self, snapshot: WindowSnapshot) {
        self.start = snapshot.start;
        self.selected = snapshot.selected.filter(|&i| i < self.items.len());
        self.reflow();
    }

    /// The window start that centres the pool on the item under the viewport centre.
    pub fn desired_start(&self, viewport: Viewport) -> usize {
        let len = self.pool.len();
        let count = self.items.len();
        let Some(centre) = self.options.index_at_offset(viewport.centre(), count) else {
            return 0;
        };
        cmp::min(centre.saturating_sub(len / 2), count - len)
    }

    /// Moves the window one item forward by recycling the first slot onto the item after the
    /// window.
    ///
    /// Returns `false` (and does nothing) when there is no item after the window, or, with
    /// [`ShiftPolicy::Lazy`], while the first slot is still visible.
    pub fn shift_forward(&mut self, viewport: Viewport) -> bool {
        let end = self.start + self.pool.len();
        if self.pool.is_empty() || end >= self.items.len() {
            return false;
        }
        if self.options.shift_policy == ShiftPolicy::Lazy
            && self
                .pool
                .first()
                .is_some_and(|s| viewport.intersects(s.span()))
        {
            return false;
        }
        let Some(mut slot) = self.pool.pop_front() else {
            return false;
        };
        bind_slot(
            &mut self.factory,
            &self.items,
            &self.options,
            self.selected,
            &mut slot,
            end,
        );
        self.pool.push_back(slot);
        self.start += 1;
        self.shifts += 1;
        ptrace!(start = self.start, "shift_forward");
        true
    }

    /// Mirror of [`Self::shift_forward`]: recycles the last slot onto the item before the
    /// window.
    pub fn shift_backward(&mut self, viewport: Viewport) -> bool {
        if self.pool.is_empty() || self.start == 0 {
            return false;
        }
        if self.options.shift_policy == ShiftPolicy::Lazy
            && self
                .pool
                .last()
                .is_some_and(|s| viewport.intersects(s.span()))
        {
            return false;
        }
        let Some(mut slot) = self.pool.pop_back() else {
            return false;
        };
        let index = self.start - 1;
        bind_slot(
            &mut self.factory,
            &self.items,
            &self.options,
            self.selected,
            &mut slot,
            index,
        );
        self.pool.push_front(slot);
        self.start = index;
        self.shifts += 1;
        ptrace!(start = self.start, "shift_backward");
        true
    }

    /// Shifts the window towards [`Self::desired_start`] one slot at a time.
    ///
    /// `direction` is the physical scroll movement since the last frame; only shifts in that
    /// direction are attempted. `None` allows both (used after structural changes).
    ///
    /// When the whole window is out of view and more than a pool length away from where it
    /// should be, every slot is rebound in a single pass instead.
    ///
    /// Returns the number of slots rebound.
    pub fn settle(&mut self, viewport: Viewport, direction: Option<ScrollDirection>) -> usize {
        self.fill();

        let desired = self.desired_start(viewport);
        let len = self.pool.len();
        let moving_towards = match direction {
            Some(ScrollDirection::Forward) => desired > self.start,
            Some(ScrollDirection::Backward) => desired < self.start,
            None => desired != self.start,
        };
        if !moving_towards {
            return 0;
        }

        if len > 0 && desired.abs_diff(self.start) >= len && self.window_hidden(viewport) {
            ptrace!(from = self.start, to = desired, "settle: jump");
            self.start = desired;
            self.renumber_from(0);
            self.reflows += 1;
            return len;
        }

        let mut shifted = 0;
        while self.start < desired && self.shift_forward(viewport) {
            shifted += 1;
        }
        while self.start > desired && self.shift_backward(viewport) {
            shifted += 1;
        }
        shifted
    }

    /// Appends (`to_bottom`) or prepends an item. Returns its backing index.
    pub fn add_item(&mut self, item: T, to_bottom: bool) -> usize {
        let index = if to_bottom { self.items.len() } else { 0 };
        self.insert_item(index, item)
    }

    /// Inserts `item` at `index` (clamped to `len()`), keeping the window contiguous.
    ///
    /// - Before the window (or at its head while the pool is full): the window start moves down
    ///   by one so the same items stay bound.
    /// - Inside a full window: the last slot is recycled for the new item.
    /// - With spare capacity: a new slot is created.
    /// - After a full window: nothing is bound until a shift reaches it.
    ///
    /// Returns the index the item landed at.
    pub fn insert_item(&mut self, index: usize, item: T) -> usize {
        let index = cmp::min(index, self.items.len());
        self.items.insert(index, item);
        self.selected = self.selected.map(|s| if s >= index { s + 1 } else { s });

        let len = self.pool.len();
        let end = self.start + len;
        if len < self.capacity() {
            if index < self.start {
                self.start += 1;
                self.renumber_from(0);
            } else if index <= end {
                let position = index - self.start;
                if let Some(slot) = create_slot(
                    &mut self.factory,
                    &self.items,
                    &self.options,
                    self.selected,
                    index,
                ) {
                    self.pool.insert(position, slot);
                }
                self.renumber_from(position + 1);
            }
            self.fill();
        } else if len > 0 && index <= self.start {
            self.start += 1;
            self.renumber_from(0);
        } else if index < end {
            let position = index - self.start;
            if let Some(slot) = self.pool.pop_back() {
                self.pool.insert(position, slot);
                self.renumber_from(position);
            }
        }

        self.reflows += 1;
        ptrace!(index, start = self.start, pool = self.pool.len(), "insert_item");
        index
    }

    /// Appends every item and reflows once. Returns the number of items added.
    pub fn append_batch(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let before = self.items.len();
        self.items.extend(items);
        let added = self.items.len() - before;
        if added == 0 {
            return 0;
        }
        self.fill();
        self.reflows += 1;
        ptrace!(added, pool = self.pool.len(), "append_batch");
        added
    }

    /// Inserts every item at the front, in iteration order, and reflows once. The window keeps
    /// showing the items it showed before. Returns the number of items added.
    pub fn prepend_batch(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let mut front: Vec<T> = items.into_iter().collect();
        let added = front.len();
        if added == 0 {
            return 0;
        }
        front.append(&mut self.items);
        self.items = front;
        self.selected = self.selected.map(|s| s + added);
        self.start += added;
        self.reflow();
        ptrace!(added, start = self.start, "prepend_batch");
        added
    }

    /// Removes the item at `index` and compacts the pool. Returns `None` when out of range.
    ///
    /// A slot freed from the middle of the window is rebound to the item after the window if
    /// there is one, and destroyed otherwise (the pool regrows at its head on the next
    /// [`Self::settle`]).
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            ptrace!(index, count = self.items.len(), "remove_at: out of range");
            return None;
        }
        let item = self.items.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };

        let end = self.start + self.pool.len();
        if index < self.start {
            self.start -= 1;
            self.renumber_from(0);
        } else if index < end {
            let position = index - self.start;
            if let Some(mut freed) = self.pool.remove(position) {
                self.renumber_from(position);
                let tail = self.start + self.pool.len();
                if self.pool.len() < self.capacity() && tail < self.items.len() {
                    bind_slot(
                        &mut self.factory,
                        &self.items,
                        &self.options,
                        self.selected,
                        &mut freed,
                        tail,
                    );
                    self.pool.push_back(freed);
                } else {
                    self.factory.destroy_slot(freed.into_slot());
                }
            }
        }

        self.reflows += 1;
        ptrace!(index, start = self.start, pool = self.pool.len(), "remove_at");
        Some(item)
    }

    /// Removes the first item equal to `item`.
    pub fn remove_item(&mut self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.remove_where(|x| x == item)
    }

    /// Removes the first item matching `pred`.
    pub fn remove_where(&mut self, pred: impl FnMut(&T) -> bool) -> Option<T> {
        let index = self.items.iter().position(pred)?;
        self.remove_at(index)
    }

    /// Replaces the whole backing sequence and rebinds the pool. Returns the old sequence.
    pub fn set_items(&mut self, items: Vec<T>) -> Vec<T> {
        let old = mem::replace(&mut self.items, items);
        self.selected = self.selected.filter(|&i| i < self.items.len());
        self.reflow();
        old
    }

    /// Mutates the item at `index` in place and refreshes its slot if bound.
    pub fn update_item(&mut self, index: usize, f: impl FnOnce(&mut T)) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        f(item);
        self.update_slot_content(index);
        true
    }

    /// Re-runs [`SlotFactory::update_slot`] for the slot bound to `index`. Returns `false` when
    /// `index` is not in the window.
    pub fn update_slot_content(&mut self, index: usize) -> bool {
        let Some(position) = self.pool.position_of(index) else {
            return false;
        };
        let Self {
            options,
            items,
            pool,
            factory,
            selected,
            ..
        } = self;
        let Some(slot) = pool.get_mut(position) else {
            return false;
        };
        bind_slot(factory, items, options, *selected, slot, index);
        true
    }

    /// Consumes the window, destroying every slot, and returns the backing sequence.
    pub fn into_items(mut self) -> Vec<T> {
        mem::take(&mut self.items)
    }

    fn window_hidden(&self, viewport: Viewport) -> bool {
        self.options.shift_policy == ShiftPolicy::Eager
            || !self.pool.iter().any(|s| viewport.intersects(s.span()))
    }

    /// Full pass: trim to capacity, clamp the start, rebind every slot and regrow.
    fn reflow(&mut self) {
        self.trim();
        let max_start = self.items.len() - self.capacity();
        self.start = cmp::min(self.start, max_start);
        self.renumber_from(0);
        self.fill();
        self.reflows += 1;
        ptrace!(start = self.start, pool = self.pool.len(), "reflow");
    }

    /// Rebinds slots from `position` onwards to `start + i`.
    fn renumber_from(&mut self, position: usize) {
        let Self {
            options,
            items,
            pool,
            factory,
            start,
            selected,
            ..
        } = self;
        for (i, slot) in pool.iter_mut().enumerate().skip(position) {
            bind_slot(factory, items, options, *selected, slot, *start + i);
        }
    }

    /// Grows the pool up to capacity, at the tail first and then at the head.
    fn fill(&mut self) -> usize {
        let capacity = self.capacity();
        if self.pool.is_empty() {
            self.start = cmp::min(self.start, self.items.len() - capacity);
        }
        let mut created = 0;
        while self.pool.len() < capacity {
            let end = self.start + self.pool.len();
            let index = if end < self.items.len() {
                end
            } else if self.start > 0 {
                self.start - 1
            } else {
                break;
            };
            let Some(slot) = create_slot(
                &mut self.factory,
                &self.items,
                &self.options,
                self.selected,
                index,
            ) else {
                break;
            };
            if index == end {
                self.pool.push_back(slot);
            } else {
                self.start = index;
                self.pool.push_front(slot);
            }
            created += 1;
        }
        created
    }

    /// Destroys slots from the back until the pool fits its capacity.
    fn trim(&mut self) {
        let capacity = self.capacity();
        while self.pool.len() > capacity {
            let Some(slot) = self.pool.pop_back() else {
                break;
            };
            self.factory.destroy_slot(slot.into_slot());
        }
    }
}

impl<T, F: SlotFactory<T>> Drop for Window<T, F> {
    fn drop(&mut self) {
        let Self { pool, factory, .. } = self;
        for slot in pool.drain() {
            factory.destroy_slot(slot.into_slot());
        }
    }
}

impl<T, F: SlotFactory<T>> core::fmt::Debug for Window<T, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Window")
            .field("options", &self.options)
            .field("count", &self.items.len())
            .field("start", &self.start)
            .field("pool_len", &self.pool.len())
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

fn create_slot<T, F: SlotFactory<T>>(
    factory: &mut F,
    items: &[T],
    options: &PoolOptions,
    selected: Option<usize>,
    index: usize,
) -> Option<PooledSlot<F::Slot>> {
    let item = items.get(index)?;
    let mut slot = factory.create_slot(item, index);
    let is_selected = selected == Some(index);
    if is_selected {
        factory.set_selected(&mut slot, true);
    }
    Some(PooledSlot::new(
        slot,
        index,
        options.item_span(index),
        is_selected,
    ))
}

fn bind_slot<T, F: SlotFactory<T>>(
    factory: &mut F,
    items: &[T],
    options: &PoolOptions,
    selected: Option<usize>,
    slot: &mut PooledSlot<F::Slot>,
    index: usize,
) {
    let Some(item) = items.get(index) else {
        debug_assert!(
            index < items.len(),
            "bind_slot: index out of range (i={index}, count={})",
            items.len()
        );
        return;
    };
    factory.update_slot(slot.slot_mut(), item, index);
    slot.bind(index, options.item_span(index));
    let is_selected = selected == Some(index);
    factory.set_selected(slot.slot_mut(), is_selected);
    slot.set_selected(is_selected);
}
