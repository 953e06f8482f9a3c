//! Logging facilities for Lume.
//!
//! Lume uses the `tracing` crate for instrumentation. Nothing is printed unless
//! the embedding application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("lume=debug,lume_core=trace")
//!         .init();
//! }
//! ```
//!
//! Every subsystem logs under one of the [`targets`], so a filter such as
//! `lume::form=debug` isolates form submission traffic.

/// Span names used throughout Lume for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// A single render pass of a component.
    pub const RENDER: &str = "lume::render";
    /// Timer processing span.
    pub const TIMER: &str = "lume::timer";
    /// Signal emission span.
    pub const SIGNAL: &str = "lume::signal";
    /// Form submission span.
    pub const SUBMIT: &str = "lume::form::submit";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal system target.
    pub const SIGNAL: &str = "lume_core::signal";
    /// Event dispatch target.
    pub const EVENT: &str = "lume_core::event";
    /// Listener binding target.
    pub const LISTENER: &str = "lume_core::listener";
    /// Timer system target.
    pub const TIMER: &str = "lume_core::timer";
    /// Attribute reads and fallbacks.
    pub const ATTRIBUTE: &str = "lume::attribute";
    /// Component lifecycle target.
    pub const LIFECYCLE: &str = "lume::lifecycle";
    /// Render engine target.
    pub const RENDER: &str = "lume::render";
    /// Form validation and submission target.
    pub const FORM: &str = "lume::form";
    /// Element registry target.
    pub const REGISTRY: &str = "lume::registry";
    /// Page-level services (navigation, toasts, handlers).
    pub const DOCUMENT: &str = "lume::document";
    /// HTTP transport target.
    pub const NET: &str = "lume_net";
}
