use std::sync::{Arc, Mutex, MutexGuard};

use crate::{ScrollDirection, SlotFactory, Viewport, Window, WindowSnapshot};

/// A cloneable handle to a [`Window`] behind a single mutex.
///
/// The backing sequence and the pool share this one lock, so the combined operations below are
/// atomic and there is no lock order for callers to get wrong. Poisoning is recovered: a panic
/// on another thread leaves the window in whatever state the last completed operation left it,
/// and the render loop keeps going.
pub struct SharedWindow<T, F: SlotFactory<T>> {
    inner: Arc<Mutex<Window<T, F>>>,
}

impl<T, F: SlotFactory<T>> Clone for SharedWindow<T, F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, F: SlotFactory<T>> SharedWindow<T, F> {
    pub fn new(window: Window<T, F>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(window)),
        }
    }

    /// Locks the window. Never times out.
    pub fn lock(&self) -> MutexGuard<'_, Window<T, F>> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            pwarn!("SharedWindow: recovering from a poisoned lock");
            poisoned.into_inner()
        })
    }

    /// Runs `f` with the window locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut Window<T, F>) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }

    /// Adds an item and binds a slot for it if the pool has room, under one lock.
    pub fn add_and_maybe_bind(&self, item: T, to_bottom: bool) -> usize {
        self.lock().add_item(item, to_bottom)
    }

    /// Removes the first item equal to `item` and compacts the pool, under one lock.
    pub fn remove_and_compact(&self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.lock().remove_item(item)
    }

    pub fn append_batch(&self, items: impl IntoIterator<Item = T>) -> usize {
        self.lock().append_batch(items)
    }

    pub fn prepend_batch(&self, items: impl IntoIterator<Item = T>) -> usize {
        self.lock().prepend_batch(items)
    }

    pub fn settle(&self, viewport: Viewport, direction: Option<ScrollDirection>) -> usize {
        self.lock().settle(viewport, direction)
    }

    pub fn start(&self) -> usize {
        self.lock().start()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn snapshot(&self) -> WindowSnapshot {
        self.lock().snapshot()
    }
}

impl<T, F: SlotFactory<T>> core::fmt::Debug for SharedWindow<T, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut d = f.debug_struct("SharedWindow");
        match self.inner.try_lock() {
            Ok(window) => d.field("window", &*window),
            Err(_) => d.field("window", &format_args!("<locked>")),
        };
        d.finish()
    }
}
