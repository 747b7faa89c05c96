//! Frame-driven utilities for the `pooled-scroll` crate.
//!
//! The `pooled-scroll` crate is UI-agnostic and focuses on the window and pool bookkeeping. This
//! crate adds what a list needs to run inside a render loop:
//!
//! - Tween-based scroll animation that can be retargeted mid-flight without jumps
//! - Cross-thread ingest queues (live items and batched history) drained once per frame
//! - Cooperative cancellation for background history fetches
//! - A [`PoolingScrollContainer`] that ties them together behind a single `tick`
//! - Scoped event subscriptions released on drop
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings). Without the default
//! `std` feature only the tween, animator and option types are available.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
#[cfg_attr(not(feature = "std"), allow(unused_macros))]
mod macros;

mod animator;
#[cfg(feature = "std")]
mod container;
mod error;
#[cfg(feature = "std")]
mod ingest;
mod options;
#[cfg(feature = "std")]
mod subscription;
mod tween;


pub use animator::{ScrollAnimator, ScrollState};
#[cfg(feature = "std")]
pub use container::{DrainReport, ItemValidator, PoolingScrollContainer, TickReport};
pub use error::IngestError;
#[cfg(feature = "std")]
pub use ingest::{CancellationToken, HistoryFetch, HistoryQueue, IngestQueue};
pub use options::ContainerOptions;
#[cfg(feature = "std")]
pub use subscription::{ContainerEvent, EventHub, Subscription};
pub use tween::{Easing, Tween};
