//! Slot-based notifications.
//!
//! A [`Signal`] fans one value out to every connected slot. Components use
//! one for their own notifications, the document uses one for the page-level
//! stream, and every [`EventTarget`](crate::EventTarget) keeps one per
//! [`EventKind`](crate::EventKind).
//!
//! `emit` snapshots the slots and releases its lock before calling them, so a
//! slot may connect or disconnect slots on the same signal (itself included).
//! Such changes apply from the next emission.
//!
//! ```
//! use lume_core::Signal;
//!
//! let toggled = Signal::<bool>::new();
//! let id = toggled.connect(|open| println!("open: {open}"));
//! assert_eq!(toggled.emit(&true), 1);
//! toggled.disconnect(id);
//! assert_eq!(toggled.emit(&false), 0);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::{span_names, targets};

new_key_type! {
    /// Identifies one connected slot.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A set of slots invoked in connection order.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// A signal with no slots.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Connect `slot`.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Disconnect a slot. Returns `false` if it was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Call every slot with `args`. Returns how many were called.
    pub fn emit(&self, args: &Args) -> usize {
        let slots: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        if slots.is_empty() {
            return 0;
        }
        let _span = tracing::trace_span!(target: targets::SIGNAL, span_names::SIGNAL, slots = slots.len()).entered();
        for slot in &slots {
            slot(args);
        }
        slots.len()
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.slots.lock().len())
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_run_in_connection_order() {
        let signal = Signal::<&'static str>::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        for tag in ["a", "b"] {
            let log = log.clone();
            signal.connect(move |value| log.lock().push(format!("{tag}:{value}")));
        }

        assert_eq!(signal.emit(&"x"), 2);
        assert_eq!(*log.lock(), ["a:x", "b:x"]);
    }

    #[test]
    fn test_disconnect_is_idempotent() {
        let signal = Signal::<u8>::new();
        let id = signal.connect(|_| {});
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        assert_eq!(signal.connection_count(), 0);
        assert_eq!(signal.emit(&1), 0);
    }

    #[test]
    fn test_slot_can_disconnect_itself_during_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let calls = Arc::new(Mutex::new(0));
        let own_id = Arc::new(Mutex::new(None::<ConnectionId>));

        let weak = Arc::downgrade(&signal);
        let calls_clone = calls.clone();
        let own_id_clone = own_id.clone();
        let id = signal.connect(move |_| {
            *calls_clone.lock() += 1;
            if let (Some(signal), Some(id)) = (weak.upgrade(), *own_id_clone.lock()) {
                signal.disconnect(id);
            }
        });
        *own_id.lock() = Some(id);

        signal.emit(&());
        signal.emit(&());

        assert_eq!(*calls.lock(), 1);
        assert_eq!(signal.connection_count(), 0);
    }
}
