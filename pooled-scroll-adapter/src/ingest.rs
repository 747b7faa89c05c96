use std::collections::VecDeque;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A multi-producer queue of live items, drained by the render thread once per frame.
///
/// Cloning yields another handle to the same queue. Producers only hold the lock long enough to
/// push; the consumer swaps the whole buffer out.
pub struct IngestQueue<T> {
    inner: Arc<Mutex<VecDeque<T>>>,
}

impl<T> Clone for IngestQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for IngestQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IngestQueue<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn enqueue(&self, item: T) {
        lock(&self.inner).push_back(item);
    }

    /// Enqueues every item so they become visible to the consumer together.
    pub fn enqueue_batch(&self, items: impl IntoIterator<Item = T>) {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return;
        }
        lock(&self.inner).extend(items);
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.inner).is_empty()
    }

    /// Takes everything queued so far, in enqueue order.
    pub fn drain(&self) -> Vec<T> {
        let taken = mem::take(&mut *lock(&self.inner));
        Vec::from(taken)
    }

    pub fn clear(&self) {
        lock(&self.inner).clear();
    }
}

impl<T> core::fmt::Debug for IngestQueue<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IngestQueue")
            .field("len", &self.len())
            .finish()
    }
}

/// Shared flag a background worker polls to find out it should stop.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

struct HistoryState<T> {
    in_flight: Option<CancellationToken>,
    ready: VecDeque<Vec<T>>,
}

/// Batches of older items fetched in the background and prepended as a unit.
///
/// At most one fetch is in flight; starting another cancels the previous one. Completed batches
/// wait in arrival order until the render thread takes them.
pub struct HistoryQueue<T> {
    inner: Arc<Mutex<HistoryState<T>>>,
}

impl<T> Clone for HistoryQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for HistoryQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HistoryQueue<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HistoryState {
                in_flight: None,
                ready: VecDeque::new(),
            })),
        }
    }

    /// Starts a fetch. The returned handle is moved to the worker, which stages items on it and
    /// calls [`HistoryFetch::complete`].
    pub fn begin_fetch(&self) -> HistoryFetch<T> {
        let token = CancellationToken::new();
        let mut state = lock(&self.inner);
        if let Some(previous) = state.in_flight.replace(token.clone()) {
            adebug!("history: superseding an in-flight fetch");
            previous.cancel();
        }
        drop(state);
        HistoryFetch {
            queue: Arc::clone(&self.inner),
            token,
            staged: Some(Vec::new()),
        }
    }

    pub fn is_fetching(&self) -> bool {
        lock(&self.inner).in_flight.is_some()
    }

    pub fn has_ready(&self) -> bool {
        !lock(&self.inner).ready.is_empty()
    }

    /// Cancels the in-flight fetch, if any. Its batch will be discarded.
    pub fn cancel(&self) {
        if let Some(token) = lock(&self.inner).in_flight.take() {
            token.cancel();
        }
    }

    /// Takes every completed batch, oldest completion first.
    pub fn take_ready(&self) -> Vec<Vec<T>> {
        lock(&self.inner).ready.drain(..).collect()
    }
}

impl<T> core::fmt::Debug for HistoryQueue<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = lock(&self.inner);
        f.debug_struct("HistoryQueue")
            .field("fetching", &state.in_flight.is_some())
            .field("ready", &state.ready.len())
            .finish()
    }
}

/// Worker-side handle for one history fetch.
///
/// Dropping it without completing counts as a cancellation, so the live queue is never held back
/// by a worker that gave up.
pub struct HistoryFetch<T> {
    queue: Arc<Mutex<HistoryState<T>>>,
    token: CancellationToken,
    staged: Option<Vec<T>>,
}

impl<T> HistoryFetch<T> {
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn push(&mut self, item: T) {
        if let Some(staged) = &mut self.staged {
            staged.push(item);
        }
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        if let Some(staged) = &mut self.staged {
            staged.extend(items);
        }
    }

    /// Publishes the staged batch. Returns `false` if the fetch was cancelled, in which case the
    /// batch is discarded.
    pub fn complete(mut self) -> bool {
        let batch = self.staged.take().unwrap_or_default();
        let mut state = lock(&self.queue);
        let current = state
            .in_flight
            .as_ref()
            .is_some_and(|token| token.same(&self.token));
        if !current || self.token.is_cancelled() {
            awarn!(len = batch.len(), "history: discarding a cancelled batch");
            if current {
                state.in_flight = None;
            }
            return false;
        }
        state.in_flight = None;
        state.ready.push_back(batch);
        true
    }
}

impl<T> Drop for HistoryFetch<T> {
    fn drop(&mut self) {
        if self.staged.is_none() {
            return;
        }
        let mut state = lock(&self.queue);
        if state
            .in_flight
            .as_ref()
            .is_some_and(|token| token.same(&self.token))
        {
            awarn!("history: fetch dropped without completing");
            state.in_flight = None;
        }
    }
}

impl<T> core::fmt::Debug for HistoryFetch<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HistoryFetch")
            .field("cancelled", &self.is_cancelled())
            .field("staged", &self.staged.as_ref().map_or(0, Vec::len))
            .finish()
    }
}
