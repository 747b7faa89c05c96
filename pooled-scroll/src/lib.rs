//! A headless slot-pool virtualization engine for scrolling lists.
//!
//! For frame-driven utilities (scroll animation, cross-thread ingest, the container
//! controller), see the `pooled-scroll-adapter` crate.
//!
//! This crate keeps a small, fixed-capacity pool of render slots bound to a sliding window over a
//! much larger backing sequence. While the viewport moves, slots that fall out of view are
//! rebound to the next item instead of being destroyed, so slot construction cost is paid once
//! per pool position.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - a [`SlotFactory`] that creates and updates its own slot type
//! - the viewport (scroll offset and extent) on each frame
//! - item insertions and removals
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod options;
mod pool;
#[cfg(feature = "std")]
mod shared;
mod slot;
mod state;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use options::PoolOptions;
pub use pool::SlotPool;
#[cfg(feature = "std")]
pub use shared::SharedWindow;
pub use slot::{FnSlotFactory, PooledSlot, SlotFactory, slot_factory_fn};
pub use state::WindowSnapshot;
pub use types::{Align, PoolSize, ScrollDirection, ShiftPolicy, SlotSpan, Viewport, WindowRange};
pub use window::Window;
