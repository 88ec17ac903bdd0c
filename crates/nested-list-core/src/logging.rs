//! Logging facilities for the nested list engine.
//!
//! The engine is instrumented with the `tracing` crate. To see logs, install
//! a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // build and drive a NestedList...
//! }
//! ```
//!
//! Every event carries one of the [`targets`], so output can be filtered per
//! subsystem, e.g. `RUST_LOG=nested_list::visibility=trace`.

/// Span names used throughout the engine for tracing.
pub mod span_names {
    /// Full structural rebuild (flatten + visibility).
    pub const STRUCTURAL_REBUILD: &str = "nested_list::structural_rebuild";
    /// Visible-sequence rebuild only.
    pub const VISIBILITY_REBUILD: &str = "nested_list::visibility_rebuild";
}

/// Target names for log filtering.
pub mod targets {
    /// Core plumbing target.
    pub const CORE: &str = "nested_list_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "nested_list_core::signal";
    /// Tree flattening target.
    pub const FLATTEN: &str = "nested_list::flatten";
    /// Visibility filter target.
    pub const VISIBILITY: &str = "nested_list::visibility";
    /// Expansion store target.
    pub const EXPANSION: &str = "nested_list::expansion";
    /// Facade target.
    pub const LIST: &str = "nested_list::list";
    /// Configuration loading target.
    pub const CONFIG: &str = "nested_list::config";
    /// Performance spans target.
    pub const PERF: &str = "nested_list::perf";
}

/// A guard that keeps a tracing span entered until it is dropped.
///
/// Used to time rebuilds.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[macro_export]
macro_rules! nested_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "nested_list_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! nested_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "nested_list_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! nested_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "nested_list_core", $($arg)*)
    };
}
