use pooled_scroll::PoolOptions;

use crate::Easing;

/// Configuration for [`crate::PoolingScrollContainer`].
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerOptions {
    pub pool: PoolOptions,
    pub viewport_extent: f32,
    pub easing: Easing,
    /// Duration used by operations that animate on their own (follow-tail, index scrolling).
    pub default_duration_ms: u64,
    /// Duration of the pull-back when content shrinks under the viewport.
    pub clamp_duration_ms: u64,
    /// Keep the visible items still when content is inserted above them.
    pub anchor_on_prepend: bool,
    /// Scroll to the new end when live items arrive while the viewport is at the end.
    pub follow_tail: bool,
    /// Hold live items back while a history fetch is in flight.
    pub hold_live_during_history: bool,
}

impl ContainerOptions {
    pub fn new(pool: PoolOptions, viewport_extent: f32) -> Self {
        Self {
            pool,
            viewport_extent: viewport_extent.max(0.0),
            easing: Easing::default(),
            default_duration_ms: 250,
            clamp_duration_ms: 150,
            anchor_on_prepend: true,
            follow_tail: false,
            hold_live_during_history: true,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_default_duration_ms(mut self, default_duration_ms: u64) -> Self {
        self.default_duration_ms = default_duration_ms;
        self
    }

    pub fn with_clamp_duration_ms(mut self, clamp_duration_ms: u64) -> Self {
        self.clamp_duration_ms = clamp_duration_ms;
        self
    }

    pub fn with_anchor_on_prepend(mut self, anchor_on_prepend: bool) -> Self {
        self.anchor_on_prepend = anchor_on_prepend;
        self
    }

    pub fn with_follow_tail(mut self, follow_tail: bool) -> Self {
        self.follow_tail = follow_tail;
        self
    }

    pub fn with_hold_live_during_history(mut self, hold: bool) -> Self {
        self.hold_live_during_history = hold;
        self
    }
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self::new(PoolOptions::default(), 0.0)
    }
}
