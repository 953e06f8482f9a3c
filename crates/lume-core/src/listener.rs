//! Idempotent listener binding.
//!
//! Components describe the listeners they need as a list of [`Listener`]
//! values. [`ListenerBinder::bind`] attaches them all and returns a
//! [`Disposer`] that detaches exactly those listeners again. Disposing twice
//! is a no-op, and dropping a disposer disposes it, so a component can never
//! accumulate listeners across re-renders as long as it replaces its disposer.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lume_core::{DomEvent, EventKind, EventTarget, Listener, ListenerBinder};
//!
//! let button = Arc::new(EventTarget::new("button"));
//! let mut disposer = ListenerBinder::bind(vec![
//!     Listener::new(&button, EventKind::Click, |_| println!("clicked")),
//! ]);
//! assert_eq!(button.listener_count(EventKind::Click), 1);
//!
//! disposer.dispose();
//! disposer.dispose();
//! assert_eq!(button.listener_count(EventKind::Click), 0);
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use crate::error::ListenerError;
use crate::event::{DomEvent, EventKind, EventTarget, ListenerHandle};
use crate::logging::targets;

type Handler = Arc<dyn Fn(&DomEvent) + Send + Sync>;

/// A listener waiting to be bound.
pub struct Listener {
    target: Arc<EventTarget>,
    kind: EventKind,
    handler: Handler,
}

impl Listener {
    /// Describe a listener for `kind` events on `target`.
    pub fn new<F>(target: &Arc<EventTarget>, kind: EventKind, handler: F) -> Self
    where
        F: Fn(&DomEvent) + Send + Sync + 'static,
    {
        Self {
            target: Arc::clone(target),
            kind,
            handler: Arc::new(handler),
        }
    }

    /// The event kind.
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("target", &self.target.name())
            .field("kind", &self.kind)
            .finish()
    }
}

/// Attaches listener sets.
pub struct ListenerBinder;

impl ListenerBinder {
    /// Attach every listener and return the disposer for the whole set.
    pub fn bind<I>(listeners: I) -> Disposer
    where
        I: IntoIterator<Item = Listener>,
    {
        let bound: Vec<BoundListener> = listeners
            .into_iter()
            .map(|listener| {
                let handler = listener.handler;
                let handle = listener
                    .target
                    .add_listener(listener.kind, move |event| handler(event));
                BoundListener {
                    target: Arc::downgrade(&listener.target),
                    handle,
                }
            })
            .collect();
        tracing::trace!(target: targets::LISTENER, count = bound.len(), "listeners bound");
        Disposer {
            bound,
            disposed: false,
        }
    }
}

struct BoundListener {
    target: Weak<EventTarget>,
    handle: ListenerHandle,
}

impl BoundListener {
    fn remove(&self) -> Result<bool, ListenerError> {
        let target = self.target.upgrade().ok_or(ListenerError::TargetDropped)?;
        Ok(target.remove_listener(self.handle))
    }
}

/// Detaches a bound listener set.
#[must_use = "dropping a Disposer immediately detaches its listeners"]
pub struct Disposer {
    bound: Vec<BoundListener>,
    disposed: bool,
}

impl Disposer {
    /// A disposer that owns nothing.
    pub fn empty() -> Self {
        Self {
            bound: Vec::new(),
            disposed: true,
        }
    }

    /// Number of listeners this disposer will detach.
    pub fn len(&self) -> usize {
        if self.disposed { 0 } else { self.bound.len() }
    }

    /// Whether there is nothing left to detach.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether [`dispose`](Self::dispose) already ran.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Detach all listeners. Calling this again does nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        let mut removed = 0usize;
        for listener in self.bound.drain(..) {
            match listener.remove() {
                Ok(true) => removed += 1,
                Ok(false) => {}
                // Target already gone, so the listener went with it.
                Err(ListenerError::TargetDropped) => {}
            }
        }
        tracing::trace!(target: targets::LISTENER, removed, "listeners disposed");
    }
}

impl Default for Disposer {
    fn default() -> Self {
        Self::empty()
    }
}

impl Drop for Disposer {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Disposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposer")
            .field("bound", &self.len())
            .field("disposed", &self.disposed)
            .finish()
    }
}
