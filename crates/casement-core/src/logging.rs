//! Logging facilities for Casement.
//!
//! Casement instruments itself with the `tracing` crate. To see logs,
//! install a subscriber in the application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! All log lines carry one of the targets below, so a filter like
//! `casement::router=trace` narrows the output to one subsystem.

/// Target names for log filtering.
pub mod targets {
    /// Core services (scheduler, queue).
    pub const CORE: &str = "casement_core";
    /// Tick scheduler.
    pub const SCHEDULER: &str = "casement_core::scheduler";
    /// Input event queue.
    pub const QUEUE: &str = "casement_core::queue";
    /// Control tree mutations.
    pub const TREE: &str = "casement::tree";
    /// Layout and anchor resolution.
    pub const LAYOUT: &str = "casement::layout";
    /// Surface compositing.
    pub const COMPOSE: &str = "casement::compose";
    /// Pointer/keyboard routing.
    pub const ROUTER: &str = "casement::router";
    /// Focus transitions.
    pub const FOCUS: &str = "casement::focus";
    /// Shortcut matching.
    pub const SHORTCUT: &str = "casement::shortcut";
}

/// Span names used for per-tick tracing.
pub mod span_names {
    /// One full application tick (layout, render, present).
    pub const TICK: &str = "casement::tick";
    /// One input-event routing pass.
    pub const ROUTE: &str = "casement::route";
    /// One composite pass over a dirty subtree.
    pub const COMPOSE: &str = "casement::compose";
}
