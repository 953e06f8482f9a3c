//! Integration tests for listeners bound on shared window/document scopes.

use std::sync::Arc;
use std::time::Duration;

use lume_core::{DomEvent, EventKind, EventTarget, Listener, ListenerBinder, ScopedTimers, TimerManager};
use parking_lot::Mutex;

#[test]
fn test_independent_subscribers_filter_by_path() {
    let document = Arc::new(EventTarget::new("document"));
    let closed = Arc::new(Mutex::new(Vec::new()));

    let mut disposers = Vec::new();
    for id in ["nav-a", "nav-b"] {
        let closed = closed.clone();
        disposers.push(ListenerBinder::bind(vec![Listener::new(
            &document,
            EventKind::Click,
            move |event| {
                if !event.path_contains(id) {
                    closed.lock().push(id);
                }
            },
        )]));
    }

    document.dispatch(&DomEvent::click().with_path(["nav-a", "body"]));
    assert_eq!(*closed.lock(), vec!["nav-b"]);

    disposers.clear();
    assert_eq!(document.listener_count(EventKind::Click), 0);
}

#[test]
fn test_handler_rebinding_from_inside_dispatch() {
    let node = Arc::new(EventTarget::new("node"));
    let slot: Arc<Mutex<Option<lume_core::Disposer>>> = Arc::new(Mutex::new(None));
    let hits = Arc::new(Mutex::new(0));

    fn bind(node: &Arc<EventTarget>, slot: &Arc<Mutex<Option<lume_core::Disposer>>>, hits: &Arc<Mutex<usize>>) {
        let node_clone = node.clone();
        let slot_clone = slot.clone();
        let hits_clone = hits.clone();
        let disposer = ListenerBinder::bind(vec![Listener::new(node, EventKind::Click, move |_| {
            *hits_clone.lock() += 1;
            // Replace our own registration, the way a re-render does.
            let old = slot_clone.lock().take();
            drop(old);
            bind(&node_clone, &slot_clone, &hits_clone);
        })]);
        *slot.lock() = Some(disposer);
    }

    bind(&node, &slot, &hits);
    for _ in 0..3 {
        node.dispatch(&DomEvent::click());
    }

    assert_eq!(*hits.lock(), 3);
    assert_eq!(node.listener_count(EventKind::Click), 1);
}

#[test]
fn test_scoped_timers_release_on_cancel() {
    let manager = Arc::new(TimerManager::new());
    let scope = ScopedTimers::new(manager.clone());
    let fired = Arc::new(Mutex::new(false));

    let fired_clone = fired.clone();
    scope.start(Duration::from_secs(5), move || *fired_clone.lock() = true);
    assert_eq!(manager.active_count(), 1);

    scope.cancel_all();
    manager.advance(Duration::from_secs(6));

    assert!(!*fired.lock());
    assert_eq!(manager.active_count(), 0);
}
