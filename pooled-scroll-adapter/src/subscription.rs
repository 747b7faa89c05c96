use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::IngestError;

/// Notifications emitted by [`crate::PoolingScrollContainer`].
///
/// Events are emitted after the window lock is released, so listeners may query the container's
/// shared window.
#[derive(Clone, Debug, PartialEq)]
pub enum ContainerEvent {
    /// Live items were appended (or a single item was added).
    ItemsAdded { index: usize, count: usize },
    /// A history batch was prepended.
    HistoryPrepended { count: usize },
    ItemRemoved { index: usize },
    /// An ingested item failed validation and was not applied.
    ItemSkipped { error: IngestError },
    /// The window moved during a tick.
    WindowShifted { start: usize, rebound: usize },
    /// A scroll animation reached its target.
    ScrollSettled { offset: f32 },
}

type Listener = Box<dyn FnMut(&ContainerEvent) + Send>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    emitting: bool,
    removed_while_emitting: Vec<u64>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A list of event listeners.
///
/// Listeners are called without the registry lock held, so a listener may subscribe or drop a
/// [`Subscription`] from inside its callback.
#[derive(Clone, Default)]
pub struct EventHub {
    registry: Arc<Mutex<Registry>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` until the returned [`Subscription`] is dropped.
    pub fn subscribe(&self, listener: impl FnMut(&ContainerEvent) + Send + 'static) -> Subscription {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.registry).listeners.len()
    }

    pub(crate) fn emit(&self, event: &ContainerEvent) {
        let mut listeners = {
            let mut registry = lock(&self.registry);
            if registry.listeners.is_empty() {
                return;
            }
            registry.emitting = true;
            mem::take(&mut registry.listeners)
        };

        for (_, listener) in &mut listeners {
            listener(event);
        }

        let mut registry = lock(&self.registry);
        let removed = mem::take(&mut registry.removed_while_emitting);
        listeners.retain(|(id, _)| !removed.contains(id));
        // Listeners added during the callbacks go after the existing ones.
        listeners.append(&mut registry.listeners);
        registry.listeners = listeners;
        registry.emitting = false;
    }
}

impl core::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Whether the hub this subscription belongs to still exists.
    pub fn is_active(&self) -> bool {
        self.registry.strong_count() > 0
    }

    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(shared) = self.registry.upgrade() else {
            return;
        };
        let mut registry = lock(&shared);
        let before = registry.listeners.len();
        registry.listeners.retain(|(id, _)| *id != self.id);
        if registry.listeners.len() == before && registry.emitting {
            registry.removed_while_emitting.push(self.id);
        }
    }
}
