//! Core systems for Lume.
//!
//! This crate holds the pieces every Lume component is built on:
//!
//! - [`Signal`]: slot-based notifications used for component events
//! - [`EventTarget`] and [`DomEvent`]: the in-memory event surface that
//!   rendered nodes, the window and the document expose
//! - [`ListenerBinder`] and [`Disposer`]: idempotent attach/detach of listener
//!   sets around renders
//! - [`TimerManager`] and [`ScopedTimers`]: one-shot timers on a virtual clock
//! - [`logging`]: tracing targets used across the workspace

pub mod error;
pub mod event;
pub mod listener;
pub mod logging;
pub mod signal;
pub mod timer;

pub use error::{CoreError, ListenerError, Result, TimerError};
pub use event::{DomEvent, EventKind, EventTarget, ListenerHandle};
pub use listener::{Disposer, Listener, ListenerBinder};
pub use signal::{ConnectionId, Signal};
pub use timer::{ScopedTimers, TimerId, TimerManager};
