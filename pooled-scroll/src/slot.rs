use crate::SlotSpan;

/// Creates and updates the render slots of a concrete list.
///
/// This is the only capability a list has to provide. Anything a slot needs beyond the item
/// itself (session state, user directories, textures) should be held by the factory value and
/// handed to slots from here.
///
/// `create_slot` has no failure mode: a panic inside it is not caught by the window.
pub trait SlotFactory<T> {
    type Slot;

    fn create_slot(&mut self, item: &T, index: usize) -> Self::Slot;

    /// Rebinds an existing slot to `item` at `index`.
    ///
    /// Called when a slot is recycled by a shift and whenever the backing index of its item
    /// changes during a reflow.
    fn update_slot(&mut self, slot: &mut Self::Slot, item: &T, index: usize);

    fn set_selected(&mut self, _slot: &mut Self::Slot, _selected: bool) {}

    /// Called when the pool shrinks or the window is dropped.
    fn destroy_slot(&mut self, _slot: Self::Slot) {}
}

/// A [`SlotFactory`] built from a pair of closures. See [`slot_factory_fn`].
pub struct FnSlotFactory<C, U> {
    create: C,
    update: U,
}

/// Builds a [`SlotFactory`] from `create(item, index)` and `update(slot, item, index)` closures.
pub fn slot_factory_fn<T, S, C, U>(create: C, update: U) -> FnSlotFactory<C, U>
where
    C: FnMut(&T, usize) -> S,
    U: FnMut(&mut S, &T, usize),
{
    FnSlotFactory { create, update }
}

impl<T, S, C, U> SlotFactory<T> for FnSlotFactory<C, U>
where
    C: FnMut(&T, usize) -> S,
    U: FnMut(&mut S, &T, usize),
{
    type Slot = S;

    fn create_slot(&mut self, item: &T, index: usize) -> S {
        (self.create)(item, index)
    }

    fn update_slot(&mut self, slot: &mut S, item: &T, index: usize) {
        (self.update)(slot, item, index)
    }
}

impl<C, U> core::fmt::Debug for FnSlotFactory<C, U> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("FnSlotFactory(..)")
    }
}

/// A render slot together with the backing index it currently represents.
#[derive(Clone, Debug, PartialEq)]
pub struct PooledSlot<S> {
    slot: S,
    index: usize,
    span: SlotSpan,
    selected: bool,
}

impl<S> PooledSlot<S> {
    pub(crate) fn new(slot: S, index: usize, span: SlotSpan, selected: bool) -> Self {
        Self {
            slot,
            index,
            span,
            selected,
        }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn slot_mut(&mut self) -> &mut S {
        &mut self.slot
    }

    /// The backing index this slot is bound to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Position along the scroll axis, in content coordinates.
    pub fn span(&self) -> SlotSpan {
        self.span
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn bind(&mut self, index: usize, span: SlotSpan) {
        self.index = index;
        self.span = span;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn into_slot(self) -> S {
        self.slot
    }
}
