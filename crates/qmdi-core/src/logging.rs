//! Logging facilities for qmdi.
//!
//! qmdi uses the `tracing` crate for instrumentation and never installs a
//! subscriber itself. Applications pick one:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("qmdi=debug,qmdi_core=info")
//!         .init();
//! }
//! ```
//!
//! Diagnostics for contract violations (an unknown client handed to a server,
//! a client deleted twice, a realization pass without a window) are emitted
//! as `warn` events under the targets in [`targets`].

/// Span names used throughout qmdi for tracing.
pub mod span_names {
    /// Host realization pass (`update_gui`).
    pub const UPDATE_GUI: &str = "qmdi::update_gui";
    /// Client activation.
    pub const ACTIVATE: &str = "qmdi::activate";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "qmdi_core::signal";
    /// Action group merge/unmerge target.
    pub const MERGE: &str = "qmdi::merge";
    /// Host realization target.
    pub const HOST: &str = "qmdi::host";
    /// Server lifecycle target.
    pub const SERVER: &str = "qmdi::server";
    /// Configuration loading target.
    pub const CONFIG: &str = "qmdi::config";
    /// Performance spans.
    pub const PERF: &str = "qmdi::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time realization passes.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
