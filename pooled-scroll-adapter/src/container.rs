use std::sync::{Arc, MutexGuard};

use pooled_scroll::{
    Align, PooledSlot, ScrollDirection, SharedWindow, SlotFactory, Viewport, Window, WindowSnapshot,
};

use crate::{
    ContainerEvent, ContainerOptions, EventHub, HistoryQueue, IngestError, IngestQueue,
    ScrollAnimator, ScrollState, Subscription,
};

/// Checks an ingested item before it is applied. Rejected items are skipped.
pub type ItemValidator<T> = Arc<dyn Fn(&T) -> Result<(), IngestError> + Send + Sync>;

/// What one [`PoolingScrollContainer::drain_and_apply`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Items prepended from completed history batches.
    pub history: usize,
    /// Live items appended.
    pub live: usize,
    /// Items rejected by the validator.
    pub skipped: usize,
    /// Live items left queued because a history fetch is in flight.
    pub held: bool,
}

impl DrainReport {
    pub fn applied(&self) -> usize {
        self.history + self.live
    }

    pub fn is_empty(&self) -> bool {
        self.applied() == 0 && self.skipped == 0
    }
}

/// What one [`PoolingScrollContainer::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    pub drain: DrainReport,
    pub offset: f32,
    pub direction: Option<ScrollDirection>,
    /// Slots rebound while settling the window.
    pub rebound: usize,
}

/// A scroll container that renders a long list through a fixed pool of slots.
///
/// This type does not hold any UI objects. The host drives it by calling:
/// - `tick(elapsed_ms)` once per frame, then positioning content at `content_position()` and
///   walking `for_each_visible_slot`
/// - `set_viewport_extent` / `on_scroll` when UI events occur
///
/// Background threads feed it through [`Self::ingest`] and [`Self::history`] handles. Their items
/// are applied on the render thread, at the start of the next tick.
pub struct PoolingScrollContainer<T, F: SlotFactory<T>> {
    window: SharedWindow<T, F>,
    animator: ScrollAnimator,
    ingest: IngestQueue<T>,
    history: HistoryQueue<T>,
    events: EventHub,
    options: ContainerOptions,
    validator: Option<ItemValidator<T>>,
    needs_settle: bool,
}

impl<T, F: SlotFactory<T>> PoolingScrollContainer<T, F> {
    /// Builds the window over `items` and places the viewport on the starting index.
    pub fn new(items: Vec<T>, factory: F, options: ContainerOptions) -> Self {
        let window = Window::new(items, factory, options.pool);
        let mut animator =
            ScrollAnimator::new(options.easing).with_clamp_duration_ms(options.clamp_duration_ms);
        animator.set_max_offset(window.max_scroll_offset(options.viewport_extent));
        let start_offset = window.item_span(window.start()).map_or(0.0, |span| span.start);
        animator.jump_to(start_offset);
        animator.tick(0);
        adebug!(
            count = window.len(),
            pool = window.pool().len(),
            start = window.start(),
            "PoolingScrollContainer::new"
        );

        Self {
            window: SharedWindow::new(window),
            animator,
            ingest: IngestQueue::new(),
            history: HistoryQueue::new(),
            events: EventHub::new(),
            options,
            validator: None,
            needs_settle: false,
        }
    }

    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    /// The shared window. Clone it to inspect the list from another thread.
    pub fn window(&self) -> &SharedWindow<T, F> {
        &self.window
    }

    pub fn lock_window(&self) -> MutexGuard<'_, Window<T, F>> {
        self.window.lock()
    }

    pub fn animator(&self) -> &ScrollAnimator {
        &self.animator
    }

    /// A producer handle for live items.
    pub fn ingest(&self) -> IngestQueue<T> {
        self.ingest.clone()
    }

    /// A handle for starting background history fetches.
    pub fn history(&self) -> HistoryQueue<T> {
        self.history.clone()
    }

    pub fn events(&self) -> &EventHub {
        &self.events
    }

    pub fn subscribe(
        &self,
        listener: impl FnMut(&ContainerEvent) + Send + 'static,
    ) -> Subscription {
        self.events.subscribe(listener)
    }

    pub fn set_item_validator(
        &mut self,
        validator: impl Fn(&T) -> Result<(), IngestError> + Send + Sync + 'static,
    ) {
        self.validator = Some(Arc::new(validator));
    }

    pub fn clear_item_validator(&mut self) {
        self.validator = None;
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.animator.current_offset(), self.options.viewport_extent)
    }

    pub fn set_viewport_extent(&mut self, extent: f32) {
        self.options.viewport_extent = extent.max(0.0);
        let max = self.window.lock().max_scroll_offset(self.options.viewport_extent);
        self.animator.set_max_offset(max);
        self.needs_settle = true;
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.animator.state()
    }

    pub fn current_offset(&self) -> f32 {
        self.animator.current_offset()
    }

    pub fn target_offset(&self) -> f32 {
        self.animator.target_offset()
    }

    /// Where the host should place its content node.
    pub fn content_position(&self) -> f32 {
        self.animator.content_position()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    // Scrolling

    /// Animates to `target` from wherever the viewport is right now.
    pub fn scroll_to(&mut self, target: f32, duration_ms: u64) {
        self.animator.scroll_to(target, duration_ms);
    }

    pub fn scroll_by(&mut self, delta: f32, duration_ms: u64) {
        self.animator.scroll_by(delta, duration_ms);
    }

    /// Animates so `index` is aligned in the viewport. Returns the target offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align, duration_ms: u64) -> f32 {
        let target = self
            .window
            .lock()
            .scroll_to_index_offset(index, align, self.viewport());
        self.animator.scroll_to(target, duration_ms);
        target
    }

    pub fn jump_to(&mut self, offset: f32) {
        self.animator.jump_to(offset);
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    ///
    /// This cancels any running animation.
    pub fn on_scroll(&mut self, offset: f32) {
        self.animator.jump_to(offset);
    }

    pub fn clear_scroll_animation(&mut self) {
        self.animator.clear_animation();
    }

    // Structural edits

    /// Appends (`to_bottom`) or prepends an item on the render thread. Returns its index.
    pub fn add_item(&mut self, item: T, to_bottom: bool) -> usize {
        let at_end = self.is_at_end();
        let (index, grown) = {
            let mut window = self.window.lock();
            let before = window.total_extent();
            let index = window.add_item(item, to_bottom);
            (index, window.total_extent() - before)
        };
        let grown_above = if to_bottom { 0.0 } else { grown };
        self.after_insert(grown_above, to_bottom && at_end);
        self.events
            .emit(&ContainerEvent::ItemsAdded { index, count: 1 });
        index
    }

    pub fn insert_item(&mut self, index: usize, item: T) -> usize {
        let offset = self.animator.current_offset();
        let (index, grown_above) = {
            let mut window = self.window.lock();
            let first_visible = window.index_at_offset(offset).unwrap_or(0);
            let before = window.total_extent();
            let index = window.insert_item(index, item);
            let grown = window.total_extent() - before;
            (index, if index <= first_visible { grown } else { 0.0 })
        };
        self.after_insert(grown_above, false);
        self.events
            .emit(&ContainerEvent::ItemsAdded { index, count: 1 });
        index
    }

    /// Removes the first item equal to `item`.
    pub fn remove_item(&mut self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.remove_with(|window| window.items().iter().position(|it| it == item))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        self.remove_with(|_| Some(index))
    }

    /// Edits an item in place and rebinds its slot if one is bound.
    pub fn update_item(&mut self, index: usize, f: impl FnOnce(&mut T)) -> bool {
        self.window.lock().update_item(index, f)
    }

    /// Rebinds the slot for `index` after its item changed elsewhere.
    pub fn update_slot_content(&mut self, index: usize) -> bool {
        self.window.lock().update_slot_content(index)
    }

    pub fn set_selected_index(&mut self, selected: Option<usize>) {
        self.window.lock().set_selected_index(selected);
    }

    /// Replaces the list. Returns the old items.
    pub fn set_items(&mut self, items: Vec<T>) -> Vec<T> {
        let (old, max) = {
            let mut window = self.window.lock();
            let old = window.set_items(items);
            (old, window.max_scroll_offset(self.options.viewport_extent))
        };
        self.animator.set_max_offset(max);
        self.needs_settle = true;
        old
    }

    // Frame loop

    /// Applies completed history batches, then queued live items.
    ///
    /// Each non-empty source is applied as one batch with a single reflow. Nothing queued means
    /// nothing happens.
    pub fn drain_and_apply(&mut self) -> DrainReport {
        let mut report = DrainReport::default();
        let mut skipped = Vec::new();

        let history: Vec<Vec<T>> = self
            .history
            .take_ready()
            .into_iter()
            .map(|batch| self.validate(batch, &mut skipped))
            .filter(|batch| !batch.is_empty())
            .collect();
        let live = if self.options.hold_live_during_history && self.history.is_fetching() {
            report.held = !self.ingest.is_empty();
            Vec::new()
        } else {
            let live = self.ingest.drain();
            self.validate(live, &mut skipped)
        };
        report.skipped = skipped.len();

        if history.is_empty() && live.is_empty() {
            self.emit_skipped(skipped);
            return report;
        }

        let at_end = self.is_at_end();
        let (grown_above, appended_at, max) = {
            let mut window = self.window.lock();
            let mut grown_above = 0.0;
            for batch in history {
                let before = window.total_extent();
                report.history += window.prepend_batch(batch);
                grown_above += window.total_extent() - before;
            }
            let appended_at = window.len();
            report.live = window.append_batch(live);
            (
                grown_above,
                appended_at,
                window.max_scroll_offset(self.options.viewport_extent),
            )
        };

        self.animator.set_max_offset(max);
        if self.options.anchor_on_prepend && grown_above > 0.0 {
            self.animator.offset_by(grown_above);
        }
        if self.options.follow_tail && at_end && report.live > 0 {
            self.animator.scroll_to(max, self.options.default_duration_ms);
        }
        self.needs_settle = true;
        atrace!(
            history = report.history,
            live = report.live,
            skipped = report.skipped,
            "drain_and_apply"
        );

        if report.history > 0 {
            self.events.emit(&ContainerEvent::HistoryPrepended {
                count: report.history,
            });
        }
        if report.live > 0 {
            self.events.emit(&ContainerEvent::ItemsAdded {
                index: appended_at,
                count: report.live,
            });
        }
        self.emit_skipped(skipped);
        report
    }

    /// Advances one frame: applies queued items, advances the animation, and settles the window
    /// in the direction the viewport moved.
    pub fn tick(&mut self, elapsed_ms: u64) -> TickReport {
        let drain = self.drain_and_apply();
        let was_animating = self.animator.is_animating();
        let direction = self.animator.tick(elapsed_ms);
        let viewport = self.viewport();

        let rebound = if self.needs_settle {
            self.needs_settle = false;
            self.window.settle(viewport, None)
        } else if direction.is_some() {
            self.window.settle(viewport, direction)
        } else {
            0
        };

        if rebound > 0 {
            let start = self.window.start();
            self.events
                .emit(&ContainerEvent::WindowShifted { start, rebound });
        }
        if was_animating && !self.animator.is_animating() {
            self.events.emit(&ContainerEvent::ScrollSettled {
                offset: viewport.offset,
            });
        }

        TickReport {
            drain,
            offset: viewport.offset,
            direction,
            rebound,
        }
    }

    // Queries

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn current_window_start(&self) -> usize {
        self.window.start()
    }

    pub fn total_content_length(&self) -> f32 {
        self.window.lock().total_extent()
    }

    pub fn window_snapshot(&self) -> WindowSnapshot {
        self.window.snapshot()
    }

    pub fn reflow_count(&self) -> u64 {
        self.window.lock().reflow_count()
    }

    /// Visits the slots that intersect the viewport, in order.
    pub fn for_each_visible_slot(&self, f: impl FnMut(&PooledSlot<F::Slot>)) {
        let viewport = self.viewport();
        self.window.lock().for_each_visible_slot(viewport, f);
    }

    pub fn visible_slot_indexes(&self) -> Vec<usize> {
        let viewport = self.viewport();
        let mut out = Vec::new();
        self.window.lock().collect_visible_indexes(viewport, &mut out);
        out
    }

    fn is_at_end(&self) -> bool {
        self.animator.target_offset() >= self.animator.max_offset() - 0.5
    }

    fn after_insert(&mut self, grown_above: f32, follow: bool) {
        let max = self
            .window
            .lock()
            .max_scroll_offset(self.options.viewport_extent);
        self.animator.set_max_offset(max);
        if self.options.anchor_on_prepend && grown_above > 0.0 {
            self.animator.offset_by(grown_above);
        }
        if self.options.follow_tail && follow {
            self.animator.scroll_to(max, self.options.default_duration_ms);
        }
        self.needs_settle = true;
    }

    /// Removes the item `find` picks. Content removed above the first visible item moves the
    /// viewport up by the same extent when anchoring is on.
    fn remove_with(&mut self, find: impl FnOnce(&Window<T, F>) -> Option<usize>) -> Option<T> {
        let offset = self.animator.current_offset();
        let (index, removed, shrunk_above, max) = {
            let mut window = self.window.lock();
            let index = find(&*window)?;
            let first_visible = window.index_at_offset(offset).unwrap_or(0);
            let before = window.total_extent();
            let removed = window.remove_at(index)?;
            let shrunk = before - window.total_extent();
            (
                index,
                removed,
                if index < first_visible { shrunk } else { 0.0 },
                window.max_scroll_offset(self.options.viewport_extent),
            )
        };
        if self.options.anchor_on_prepend && shrunk_above > 0.0 {
            self.animator.offset_by(-shrunk_above);
        }
        self.animator.set_max_offset(max);
        self.needs_settle = true;
        self.events.emit(&ContainerEvent::ItemRemoved { index });
        Some(removed)
    }

    fn validate(&self, batch: Vec<T>, skipped: &mut Vec<IngestError>) -> Vec<T> {
        let Some(validator) = &self.validator else {
            return batch;
        };
        batch
            .into_iter()
            .filter(|item| match validator(item) {
                Ok(()) => true,
                Err(error) => {
                    awarn!(%error, "skipping ingested item");
                    skipped.push(error);
                    false
                }
            })
            .collect()
    }

    fn emit_skipped(&self, skipped: Vec<IngestError>) {
        for error in skipped {
            self.events.emit(&ContainerEvent::ItemSkipped { error });
        }
    }
}

impl<T, F: SlotFactory<T>> core::fmt::Debug for PoolingScrollContainer<T, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PoolingScrollContainer")
            .field("window", &self.window)
            .field("animator", &self.animator)
            .field("ingest", &self.ingest)
            .field("history", &self.history)
            .field("options", &self.options)
            .finish()
    }
}
