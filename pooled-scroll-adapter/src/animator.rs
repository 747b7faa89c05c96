use pooled_scroll::ScrollDirection;

use crate::{Easing, Tween};

/// A snapshot of the animator, suitable for persisting or debugging.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub current: f32,
    pub previous: f32,
    pub target: f32,
    pub clock_ms: u64,
    pub animation_start_ms: u64,
    pub duration_ms: u64,
}

/// Drives the scroll offset over time.
///
/// The animator owns a millisecond clock advanced by [`Self::tick`]. A new [`Self::scroll_to`]
/// always starts from the live offset, so retargeting mid-flight never jumps.
#[derive(Clone, Debug)]
pub struct ScrollAnimator {
    clock_ms: u64,
    current: f32,
    last_tick: f32,
    tween: Option<Tween>,
    max_offset: f32,
    easing: Easing,
    clamp_duration_ms: u64,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(Easing::default())
    }
}

impl ScrollAnimator {
    pub fn new(easing: Easing) -> Self {
        Self {
            clock_ms: 0,
            current: 0.0,
            last_tick: 0.0,
            tween: None,
            max_offset: f32::MAX,
            easing,
            clamp_duration_ms: 0,
        }
    }

    /// Duration of the animation started when a shrinking max offset leaves the viewport past
    /// the end. `0` snaps on the next tick.
    pub fn with_clamp_duration_ms(mut self, clamp_duration_ms: u64) -> Self {
        self.clamp_duration_ms = clamp_duration_ms;
        self
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn current_offset(&self) -> f32 {
        self.current
    }

    /// Where the running animation started, or the current offset when idle.
    pub fn previous_offset(&self) -> f32 {
        self.tween.map_or(self.current, |t| t.from)
    }

    pub fn target_offset(&self) -> f32 {
        self.tween.map_or(self.current, |t| t.to)
    }

    /// Offset to apply to the content, which moves opposite to the viewport.
    pub fn content_position(&self) -> f32 {
        -self.current
    }

    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Updates the scrollable range. A target past the new end is pulled back; if the viewport
    /// itself is past the end it animates back rather than jumping.
    pub fn set_max_offset(&mut self, max_offset: f32) {
        self.max_offset = max_offset.max(0.0);
        let now = self.clock_ms;
        let max = self.max_offset;
        if let Some(tween) = &mut self.tween {
            if tween.to > max {
                let remaining = tween.duration_ms.saturating_sub(now.saturating_sub(tween.start_ms));
                tween.retarget(now, max, remaining);
            }
        } else if self.current > max {
            self.tween = Some(Tween::new(
                self.current,
                max,
                now,
                self.clamp_duration_ms,
                self.easing,
            ));
        }
    }

    /// Starts an animation from the live offset towards `target` (clamped to the range).
    pub fn scroll_to(&mut self, target: f32, duration_ms: u64) {
        let to = target.clamp(0.0, self.max_offset);
        atrace!(from = self.current, to, duration_ms, "scroll_to");
        self.tween = Some(Tween::new(
            self.current,
            to,
            self.clock_ms,
            duration_ms,
            self.easing,
        ));
    }

    /// Scrolls relative to the current target, so repeated wheel steps accumulate.
    pub fn scroll_by(&mut self, delta: f32, duration_ms: u64) {
        self.scroll_to(self.target_offset() + delta, duration_ms);
    }

    /// Moves to `offset` immediately, dropping any running animation.
    pub fn jump_to(&mut self, offset: f32) {
        self.tween = None;
        self.current = offset.clamp(0.0, self.max_offset);
    }

    /// Stops at the current offset.
    pub fn clear_animation(&mut self) {
        self.tween = None;
    }

    /// Shifts everything by `delta` without it counting as movement, for content inserted above
    /// the viewport.
    pub fn offset_by(&mut self, delta: f32) {
        self.current += delta;
        self.last_tick += delta;
        if let Some(tween) = &mut self.tween {
            tween.translate(delta);
        }
    }

    /// Advances the clock and returns the direction the offset moved since the previous tick.
    pub fn tick(&mut self, elapsed_ms: u64) -> Option<ScrollDirection> {
        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms);
        if let Some(tween) = self.tween {
            self.current = tween.sample(self.clock_ms);
            if tween.is_done(self.clock_ms) {
                self.tween = None;
            }
        }
        let direction = ScrollDirection::between(self.last_tick, self.current);
        self.last_tick = self.current;
        direction
    }

    pub fn state(&self) -> ScrollState {
        ScrollState {
            current: self.current,
            previous: self.previous_offset(),
            target: self.target_offset(),
            clock_ms: self.clock_ms,
            animation_start_ms: self.tween.map_or(self.clock_ms, |t| t.start_ms),
            duration_ms: self.tween.map_or(0, |t| t.duration_ms),
        }
    }
}
