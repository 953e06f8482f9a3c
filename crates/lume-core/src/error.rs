//! Error types for the core systems.

use std::fmt;

/// Errors from the core systems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A timer operation failed.
    Timer(TimerError),
    /// A listener could not be detached.
    Listener(ListenerError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timer(err) => write!(f, "timer: {err}"),
            Self::Listener(err) => write!(f, "listener: {err}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Timer(err) => Some(err),
            Self::Listener(err) => Some(err),
        }
    }
}

/// Timer failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The timer already fired, was cancelled, or never existed.
    UnknownTimer,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTimer => f.write_str("no pending timer with this id"),
        }
    }
}

impl std::error::Error for TimerError {}

/// Listener failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// The event target was dropped before the listener was removed.
    TargetDropped,
}

impl fmt::Display for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetDropped => f.write_str("event target no longer exists"),
        }
    }
}

impl std::error::Error for ListenerError {}

impl From<TimerError> for CoreError {
    fn from(err: TimerError) -> Self {
        Self::Timer(err)
    }
}

impl From<ListenerError> for CoreError {
    fn from(err: ListenerError) -> Self {
        Self::Listener(err)
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
