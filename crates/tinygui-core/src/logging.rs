//! Logging facilities for tinyGUI.
//!
//! tinyGUI is instrumented with the `tracing` crate. Install a subscriber in
//! the application to see the output:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("tinygui=debug,tinygui_core=info")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "tinygui_core";
    /// Object identity and lock target.
    pub const OBJECT: &str = "tinygui_core::object";
    /// Event table target.
    pub const EVENT: &str = "tinygui_core::event";
    /// Async execution target.
    pub const EXECUTOR: &str = "tinygui_core::executor";
    /// Message dispatch and default handling target.
    pub const DISPATCH: &str = "tinygui::dispatch";
    /// Anchor relayout target.
    pub const LAYOUT: &str = "tinygui::layout";
    /// Native backend target.
    pub const BACKEND: &str = "tinygui::backend";
    /// Widget construction and teardown target.
    pub const LIFECYCLE: &str = "tinygui::lifecycle";
}

/// Span names used for performance traces.
pub mod span_names {
    /// One relayout pass over a container.
    pub const RELAYOUT: &str = "relayout";
    /// Draining the message queue.
    pub const PUMP: &str = "pump";
    /// Creating the native resources of a window tree.
    pub const SHOW: &str = "show";
}

/// A guard that records a performance span for its lifetime.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span, active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "tinygui::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
