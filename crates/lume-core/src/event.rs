//! In-memory event surface.
//!
//! An [`EventTarget`] is anything listeners can be attached to: a rendered
//! interactive node, the window scope, or the document scope. Dispatching a
//! [`DomEvent`] invokes every listener registered for its [`EventKind`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::logging::targets;
use crate::signal::{ConnectionId, Signal};

/// The kinds of events the runtime dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer activation.
    Click,
    /// Key press; see [`DomEvent::key`].
    KeyDown,
    /// A field's value changed; see [`DomEvent::value`].
    Input,
    /// A field lost focus.
    Blur,
    /// A form was submitted.
    Submit,
    /// The viewport was resized; see [`DomEvent::width`].
    Resize,
    /// Pointer entered the node.
    MouseEnter,
    /// Pointer left the node.
    MouseLeave,
}

impl EventKind {
    /// DOM-style event name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Input => "input",
            Self::Blur => "blur",
            Self::Submit => "submit",
            Self::Resize => "resize",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An event travelling through the runtime.
///
/// Clones share the default-prevented and propagation flags.
#[derive(Debug, Clone)]
pub struct DomEvent {
    kind: EventKind,
    key: Option<String>,
    value: Option<String>,
    width: Option<u32>,
    path: Vec<String>,
    default_prevented: Arc<AtomicBool>,
    propagation_stopped: Arc<AtomicBool>,
}

impl DomEvent {
    /// Create an event of the given kind with no payload.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            key: None,
            value: None,
            width: None,
            path: Vec::new(),
            default_prevented: Arc::new(AtomicBool::new(false)),
            propagation_stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A click event.
    pub fn click() -> Self {
        Self::new(EventKind::Click)
    }

    /// A keydown event for `key` (`"Enter"`, `" "`, `"Escape"`, ...).
    pub fn key_down(key: impl Into<String>) -> Self {
        Self::new(EventKind::KeyDown).with_key(key)
    }

    /// An input event carrying the field's new value.
    pub fn input(value: impl Into<String>) -> Self {
        Self::new(EventKind::Input).with_value(value)
    }

    /// A submit event.
    pub fn submit() -> Self {
        Self::new(EventKind::Submit)
    }

    /// A resize event for a viewport of `width` pixels.
    pub fn resize(width: u32) -> Self {
        let mut event = Self::new(EventKind::Resize);
        event.width = Some(width);
        event
    }

    /// Set the key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the composed path: the ids of the elements the event passed through,
    /// innermost first.
    pub fn with_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    /// The event kind.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The key for keyboard events.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The field value for input events.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The viewport width for resize events.
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Whether the composed path passes through the element with `id`.
    pub fn path_contains(&self, id: &str) -> bool {
        self.path.iter().any(|entry| entry == id)
    }

    /// Suppress the default action (navigation, native submission).
    pub fn prevent_default(&self) {
        self.default_prevented.store(true, Ordering::SeqCst);
    }

    /// Whether [`prevent_default`](Self::prevent_default) was called.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::SeqCst)
    }

    /// Stop the event from reaching outer scopes.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.store(true, Ordering::SeqCst);
    }

    /// Whether [`stop_propagation`](Self::stop_propagation) was called.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.load(Ordering::SeqCst)
    }
}

/// Handle to one listener registered on an [`EventTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerHandle {
    pub(crate) kind: EventKind,
    pub(crate) id: ConnectionId,
}

impl ListenerHandle {
    /// The event kind the listener is registered for.
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

/// A node (or scope) listeners can be attached to.
pub struct EventTarget {
    name: String,
    listeners: Mutex<HashMap<EventKind, Arc<Signal<DomEvent>>>>,
}

impl EventTarget {
    /// Create a target. `name` is only used in diagnostics.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// The diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn signal(&self, kind: EventKind) -> Arc<Signal<DomEvent>> {
        self.listeners
            .lock()
            .entry(kind)
            .or_insert_with(|| Arc::new(Signal::new()))
            .clone()
    }

    /// Register a listener for `kind`.
    pub fn add_listener<F>(&self, kind: EventKind, listener: F) -> ListenerHandle
    where
        F: Fn(&DomEvent) + Send + Sync + 'static,
    {
        let id = self.signal(kind).connect(listener);
        tracing::trace!(target: targets::EVENT, target_name = %self.name, %kind, "listener added");
        ListenerHandle { kind, id }
    }

    /// Remove a listener. Returns `false` if it was already removed.
    pub fn remove_listener(&self, handle: ListenerHandle) -> bool {
        let signal = self.listeners.lock().get(&handle.kind).cloned();
        let removed = signal.is_some_and(|signal| signal.disconnect(handle.id));
        if removed {
            tracing::trace!(target: targets::EVENT, target_name = %self.name, kind = %handle.kind, "listener removed");
        }
        removed
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .lock()
            .get(&kind)
            .map_or(0, |signal| signal.connection_count())
    }

    /// Number of listeners across all kinds.
    pub fn total_listener_count(&self) -> usize {
        self.listeners
            .lock()
            .values()
            .map(|signal| signal.connection_count())
            .sum()
    }

    /// Dispatch `event` to the listeners for its kind.
    ///
    /// Returns `false` if a listener called [`DomEvent::prevent_default`],
    /// mirroring `EventTarget.dispatchEvent`.
    pub fn dispatch(&self, event: &DomEvent) -> bool {
        let signal = self.listeners.lock().get(&event.kind()).cloned();
        let invoked = signal.map_or(0, |signal| signal.emit(event));
        tracing::trace!(
            target: targets::EVENT,
            target_name = %self.name,
            kind = %event.kind(),
            invoked,
            "event dispatched"
        );
        !event.default_prevented()
    }
}

impl fmt::Debug for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTarget")
            .field("name", &self.name)
            .field("listeners", &self.total_listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_reaches_matching_kind_only() {
        let target = EventTarget::new("node");
        let clicks = Arc::new(Mutex::new(0));

        let clicks_clone = clicks.clone();
        target.add_listener(EventKind::Click, move |_| *clicks_clone.lock() += 1);

        target.dispatch(&DomEvent::click());
        target.dispatch(&DomEvent::key_down("Enter"));

        assert_eq!(*clicks.lock(), 1);
        assert_eq!(target.listener_count(EventKind::Click), 1);
        assert_eq!(target.listener_count(EventKind::KeyDown), 0);
    }

    #[test]
    fn test_prevent_default_reported_by_dispatch() {
        let target = EventTarget::new("link");
        target.add_listener(EventKind::Click, |event| event.prevent_default());

        let event = DomEvent::click();
        assert!(!target.dispatch(&event));
        assert!(event.default_prevented());
    }

    #[test]
    fn test_remove_listener_is_idempotent() {
        let target = EventTarget::new("node");
        let handle = target.add_listener(EventKind::Input, |_| {});

        assert!(target.remove_listener(handle));
        assert!(!target.remove_listener(handle));
        assert_eq!(target.total_listener_count(), 0);
    }

    #[test]
    fn test_path_contains() {
        let event = DomEvent::click().with_path(["lume-nav-abc", "body"]);
        assert!(event.path_contains("lume-nav-abc"));
        assert!(!event.path_contains("lume-nav-xyz"));
    }
}
