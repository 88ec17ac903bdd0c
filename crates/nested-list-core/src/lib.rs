//! Core plumbing for the nested list engine.
//!
//! - **Signal/Slot System**: [`Signal`] notifications used by the list facade
//!   to announce layout changes, expand/collapse transitions and activations
//! - **Logging**: `tracing` targets, span names and [`PerfSpan`]
//!
//! # Example
//!
//! ```
//! use nested_list_core::Signal;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let expanded = Signal::<u32>::new();
//! let count = Arc::new(AtomicUsize::new(0));
//!
//! let count_clone = count.clone();
//! expanded.connect(move |_group| {
//!     count_clone.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! expanded.emit(7);
//! assert_eq!(count.load(Ordering::SeqCst), 1);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
