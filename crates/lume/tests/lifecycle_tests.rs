//! Integration tests for the shared component lifecycle.

use std::sync::Arc;
use std::time::Duration;

use lume::prelude::*;
use lume::widgets::ArticleLayout;
use lume::{ChildNode, LumeError};
use parking_lot::Mutex;

fn label(text: &str) -> Vec<ChildNode> {
    vec![ChildNode::element("span").text(text)]
}

#[test]
fn test_rerender_is_idempotent() {
    let doc = Document::new();
    let hero = Component::<Hero>::create(&doc).with_attribute("heading-text", "Hello");
    hero.mount().unwrap();
    let first = hero.html();

    hero.refresh();
    hero.refresh();
    assert_eq!(hero.html(), first);
    assert_eq!(hero.render_count(), 3);

    hero.set_attribute("heading-text", "Hello");
    assert_eq!(hero.render_count(), 3, "unchanged value must not re-render");
}

#[test]
fn test_defaults_never_leak_empty_values() {
    let doc = Document::new();
    let navbar = Component::<Navbar>::create(&doc);
    navbar.mount().unwrap();
    let html = navbar.html();
    assert!(!html.contains("undefined"));
    assert_eq!(navbar.links().len(), 4);

    let article = Component::<Article>::create(&doc)
        .with_attribute("heading-size", "1rem; color: red")
        .with_attribute("layout", "diagonal");
    article.mount().unwrap();
    let config = article.config().unwrap();
    assert_eq!(config.layout, ArticleLayout::Left);
    assert!(!article.output().style().contains("color: red"));
    assert!(article.output().style().contains("clamp(2rem, 4vw, 3.5rem)"));
}

#[test]
fn test_rerender_rebinds_listeners() {
    let doc = Document::new();
    let button = Component::<Button>::create(&doc).with_children(label("Go"));
    button.mount().unwrap();
    let before = button.listener_count();
    let old_target = Arc::clone(button.node("button").unwrap().target());
    assert!(old_target.total_listener_count() > 0);

    for variant in ["ghost", "glow", "outlined", "primary"] {
        button.set_attribute("variant", variant);
    }

    assert_eq!(old_target.total_listener_count(), 0);
    assert_eq!(button.listener_count(), before);
    let clicks = Arc::new(Mutex::new(0));
    let clicks_clone = clicks.clone();
    button.notifications().connect(move |_| *clicks_clone.lock() += 1);
    button.dispatch("button", &DomEvent::click());
    assert_eq!(*clicks.lock(), 1, "one click must produce exactly one notification");
}

#[test]
fn test_unmount_releases_everything() {
    let doc = Document::new();
    let navbar = Component::<Navbar>::create(&doc);
    navbar.mount().unwrap();
    assert!(doc.window().total_listener_count() > 0);
    assert!(doc.body().total_listener_count() > 0);

    let button = Component::<Button>::create(&doc).with_children(label("Go"));
    button.mount().unwrap();
    button.click();
    assert_eq!(button.timers().active_count(), 1);

    navbar.unmount().unwrap();
    button.unmount().unwrap();
    assert_eq!(doc.window().total_listener_count(), 0);
    assert_eq!(doc.body().total_listener_count(), 0);
    assert_eq!(navbar.listener_count(), 0);
    assert_eq!(button.timers().active_count(), 0);

    let renders = button.render_count();
    doc.advance(Duration::from_secs(1));
    button.set_attribute("variant", "ghost");
    assert_eq!(button.render_count(), renders);
}

#[test]
fn test_page_events_after_unmount_have_no_effect() {
    let doc = Document::new();
    let navbar = Component::<Navbar>::create(&doc);
    navbar.mount().unwrap();
    navbar.open_menu();
    assert!(navbar.is_open());

    navbar.unmount().unwrap();
    let renders = navbar.render_count();

    doc.click_at(["lume-hero-elsewhere"]);
    doc.resize(1600);
    assert!(navbar.is_open(), "an unmounted navbar must not react to page events");
    assert_eq!(navbar.render_count(), renders);
}

#[test]
fn test_lifecycle_transitions_are_checked() {
    let doc = Document::new();
    let card = Component::<Card>::create(&doc);
    assert_eq!(card.state(), LifecycleState::Unmounted);
    assert!(matches!(card.unmount(), Err(LumeError::Lifecycle { .. })));

    card.mount().unwrap();
    assert!(matches!(card.mount(), Err(LumeError::Lifecycle { .. })));

    card.unmount().unwrap();
    card.mount().unwrap();
    assert!(card.is_mounted());
}

#[test]
fn test_properties_queue_until_mount() {
    let doc = Document::new();
    let input = Component::<Input>::create(&doc);
    input.set_property("label", Some("Email".into()));
    input.set_property("placeholder", Some("you@example.com".into()));
    input.set_property("placeholder", None);
    assert_eq!(input.property("label").as_deref(), Some("Email"));
    assert_eq!(input.attribute("label"), None);
    assert_eq!(input.render_count(), 0);

    input.mount().unwrap();
    assert_eq!(input.attribute("label").as_deref(), Some("Email"));
    assert!(!input.has_attribute("placeholder"));
    assert_eq!(input.render_count(), 1);

    input.set_property("label", Some("Work email".into()));
    assert!(input.output().markup().contains("Work email"));
    assert_eq!(input.render_count(), 2);
}

#[test]
fn test_instances_are_scoped() {
    let doc = Document::new();
    let red = Component::<Button>::create(&doc)
        .with_attribute("bg-color", "#ff0000")
        .with_children(label("Red"));
    let plain = Component::<Button>::create(&doc).with_children(label("Plain"));
    red.mount().unwrap();
    plain.mount().unwrap();

    assert_ne!(red.id(), plain.id());
    assert!(red.id().starts_with("lume-btn-"));
    assert_eq!(red.id().len(), "lume-btn-".len() + 9);

    let red_style = red.output().style().to_string();
    let plain_style = plain.output().style().to_string();
    assert!(red_style.contains(red.id()));
    assert!(red_style.contains("#ff0000"));
    assert!(!plain_style.contains("#ff0000"));
    assert!(!plain_style.contains(red.id()));

    red.set_attribute("bg-color", "#00ff00");
    assert!(!plain.output().style().contains("#00ff00"));
}

#[test]
fn test_notifications_bubble_to_document() {
    let doc = Document::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    doc.notifications()
        .connect(move |event| seen_clone.lock().push((event.tag, event.notification.name())));

    let accordion = Component::<Accordion>::create(&doc)
        .with_children(vec![AccordionPanel::new("One", "Body").to_child()]);
    accordion.mount().unwrap();
    accordion.toggle(0);

    assert_eq!(*seen.lock(), vec![("lume-accordion", "accordion-toggle")]);
}
