//! Integration tests for widget interaction through the document.

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use lume::prelude::*;
use lume::{ChildNode, HandlerError};
use parking_lot::Mutex;

fn label(text: &str) -> Vec<ChildNode> {
    vec![ChildNode::element("span").text(text)]
}

fn activations(button: &Component<Button>) -> Arc<Mutex<Vec<Notification>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    button
        .notifications()
        .connect(move |n| seen_clone.lock().push(n.clone()));
    seen
}

#[test]
fn test_failing_handler_does_not_block_activation() {
    let doc = Document::new();
    doc.register_handler("broken", |_| Err(HandlerError::from("backend unavailable")));
    doc.register_handler("exploding", |_| panic!("handler bug"));

    for handler in ["broken", "exploding", "missing"] {
        let button = Component::<Button>::create(&doc)
            .with_attribute("href", "/pricing")
            .with_attribute("onclick-handler", handler)
            .with_children(label("Pricing"));
        button.mount().unwrap();
        let seen = activations(&button);

        assert!(!button.click());
        assert_eq!(seen.lock().len(), 1, "{handler} must still notify");
    }

    let hrefs: Vec<_> = doc.take_navigations().into_iter().map(|n| n.href).collect();
    assert_eq!(hrefs, ["/pricing", "/pricing", "/pricing"]);
}

#[test]
fn test_handler_can_cancel_navigation() {
    let doc = Document::new();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let calls_clone = calls.clone();
    doc.register_handler("track", move |call| {
        calls_clone.lock().push(call.source.to_string());
        call.event.prevent_default();
        Ok(())
    });

    let button = Component::<Button>::create(&doc)
        .with_attribute("href", "/docs")
        .with_attribute("onclick-handler", "track")
        .with_children(label("Docs"));
    button.mount().unwrap();
    button.click();

    assert_eq!(*calls.lock(), [button.id().to_string()]);
    assert!(doc.navigations().is_empty());
}

#[test]
fn test_keyboard_activation() {
    let doc = Document::new();
    let button = Component::<Button>::create(&doc)
        .with_attribute("href", "/start")
        .with_attribute("target", "_blank")
        .with_children(label("Start"));
    button.mount().unwrap();
    let seen = activations(&button);

    button.dispatch("button", &DomEvent::key_down("Tab"));
    assert!(seen.lock().is_empty());

    button.dispatch("button", &DomEvent::key_down("Enter"));
    button.dispatch("button", &DomEvent::key_down(" "));
    assert_eq!(seen.lock().len(), 2);
    assert_eq!(
        doc.navigations()[0],
        Navigation {
            href: "/start".into(),
            target: LinkTarget::Blank
        }
    );
}

#[test]
fn test_disabled_button_is_inert() {
    let doc = Document::new();
    let button = Component::<Button>::create(&doc)
        .with_attribute("disabled", "")
        .with_children(label("Nope"));
    button.mount().unwrap();
    let seen = activations(&button);

    assert!(!button.dispatch("button", &DomEvent::click()));
    button.dispatch("button", &DomEvent::key_down("Enter"));
    assert!(seen.lock().is_empty());
    assert_eq!(button.ripple_count(), 0);

    button.set_attribute("disabled", "false");
    assert!(!button.click(), "disabled=\"false\" is still present");
    assert!(seen.lock().is_empty());

    button.remove_attribute("disabled");
    assert!(button.click());
    assert_eq!(seen.lock().len(), 1);
}

#[test]
fn test_disabled_false_does_not_navigate() {
    let doc = Document::new();
    let button = Component::<Button>::create(&doc)
        .with_attribute("disabled", "false")
        .with_attribute("href", "/x")
        .with_children(label("Go"));
    button.mount().unwrap();

    assert!(!button.click());
    assert!(doc.navigations().is_empty());
}

#[test]
fn test_navbar_closes_on_outside_click() {
    let doc = Document::new();
    let navbar = Component::<Navbar>::create(&doc);
    navbar.mount().unwrap();

    navbar.dispatch("toggle", &DomEvent::click());
    assert!(navbar.is_open());

    doc.click_at([navbar.id()]);
    assert!(navbar.is_open(), "clicks inside the navbar keep it open");

    doc.click_at(["lume-hero-elsewhere"]);
    assert!(!navbar.is_open());
}

#[test]
fn test_navbar_closes_on_wide_resize() {
    let doc = Document::new();
    let navbar = Component::<Navbar>::create(&doc).with_attribute("mobile-breakpoint", "900px");
    navbar.mount().unwrap();

    navbar.open_menu();
    doc.resize(850);
    assert!(navbar.is_open());
    doc.resize(1200);
    assert!(!navbar.is_open());
    assert_eq!(doc.viewport_width(), 1200);
}

#[test]
fn test_navbar_link_navigates_and_closes() {
    let doc = Document::new();
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    doc.notifications()
        .connect(move |event| events_clone.lock().push(event.notification.clone()));

    let navbar = Component::<Navbar>::create(&doc);
    navbar.mount().unwrap();
    navbar.open_menu();

    navbar.dispatch_nth("link", 1, &DomEvent::click());
    assert!(!navbar.is_open());
    assert_eq!(
        events.lock()[0],
        Notification::NavActivate {
            kind: NavItemKind::Link,
            href: Some("#".into()),
            text: "About".into(),
        }
    );
    assert_eq!(doc.navigations().len(), 1);
}

#[test]
fn test_modal_scroll_lock_across_instances() {
    let doc = Document::new();
    let first = Component::<Modal>::create(&doc);
    let second = Component::<Modal>::create(&doc);
    first.mount().unwrap();
    second.mount().unwrap();

    first.open();
    second.open();
    first.close();
    doc.advance(Duration::from_millis(300));
    assert!(doc.is_scroll_locked(), "the second modal still holds a lock");

    second.dispatch("backdrop", &DomEvent::click());
    assert!(second.is_closing());
    doc.advance(Duration::from_millis(300));
    assert!(!doc.is_scroll_locked());
    assert!(!second.has_attribute("open"));
}

#[test]
fn test_toast_container_is_lazy() {
    let doc = Document::new();
    let button = Component::<Button>::create(&doc).with_children(label("Save"));
    button.mount().unwrap();
    button.click();
    assert!(!doc.has_toast_container());

    doc.show_toast("Saved", ToastKind::Success);
    assert!(doc.has_toast_container());
    assert_eq!(doc.toasts().len(), 1);

    doc.advance(Duration::from_millis(4000));
    assert!(doc.toasts().toasts()[0].leaving);
    doc.advance(Duration::from_millis(300));
    assert!(doc.toasts().is_empty());
}

#[test]
fn test_registry_builds_working_elements() {
    let registry = ElementRegistry::new();
    assert_eq!(register_builtin_elements(&registry).unwrap(), 10);
    assert_eq!(register_builtin_elements(&registry).unwrap(), 0);

    let doc = Document::new();
    let element = registry.create("lume-footer", &doc).unwrap();
    element.set_attribute("brand-text", "Acme");
    element.mount().unwrap();
    assert!(element.html().contains("Acme"));

    element.dispatch("link", &DomEvent::click());
    element.unmount().unwrap();
    let footer = element.downcast_ref::<Footer>().unwrap();
    assert_eq!(footer.listener_count(), 0);
}

#[test]
fn test_config_file_drives_timings() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "message_dismiss_ms = 1000\nmodal_close_ms = 50\n\n[http]\ntimeout_ms = 5000").unwrap();

    let config = LumeConfig::load(file.path()).unwrap();
    assert_eq!(config.message_dismiss(), Duration::from_secs(1));
    assert_eq!(config.http.timeout_ms, 5000);
    assert_eq!(config.toast_duration_ms, 4000);

    let doc = Document::with_config(config);
    let modal = Component::<Modal>::create(&doc).with_attribute("open", "");
    modal.mount().unwrap();
    assert!(modal.is_open());
    modal.close();
    doc.advance(Duration::from_millis(50));
    assert!(!modal.is_closing());
    assert!(!doc.is_scroll_locked());
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = LumeConfig::load(dir.path().join("lume.toml")).unwrap_err();
    assert!(matches!(err, LumeError::ConfigIo { .. }));
}
