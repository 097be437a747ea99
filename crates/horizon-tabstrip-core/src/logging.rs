//! Logging facilities for Horizon Tabstrip.
//!
//! Horizon Tabstrip uses the `tracing` crate for instrumentation. Library code
//! never installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_tabstrip=debug")
//!     .init();
//! ```
//!
//! Per-tick activity (scroll steps, arrow refreshes, timer fires) is logged at
//! `trace`; state transitions (scrollable flips, selection changes, route
//! winners, watcher attach/detach) at `debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Timer system target.
    pub const TIMER: &str = "horizon_tabstrip_core::timer";
    /// Coalesced tick queue target.
    pub const TICK: &str = "horizon_tabstrip_core::tick";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_tabstrip_core::signal";
    /// Overflow and justify measurement.
    pub const GEOMETRY: &str = "horizon_tabstrip::geometry";
    /// Scroll offset, arrows and stepped scroll animation.
    pub const SCROLL: &str = "horizon_tabstrip::scroll";
    /// Active selection and indicator animation.
    pub const INDICATOR: &str = "horizon_tabstrip::indicator";
    /// Route match resolution and location watching.
    pub const ROUTE: &str = "horizon_tabstrip::route";
    /// Keyboard navigation.
    pub const KEYBOARD: &str = "horizon_tabstrip::keyboard";
    /// Configuration loading and repair.
    pub const CONFIG: &str = "horizon_tabstrip::config";
    /// Item registration.
    pub const LEDGER: &str = "horizon_tabstrip::ledger";
    /// Focus tracking.
    pub const FOCUS: &str = "horizon_tabstrip::focus";
}
