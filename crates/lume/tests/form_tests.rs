//! Integration tests for form validation and submission.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_util::future::BoxFuture;
use lume::form::{
    DEFAULT_ERROR_MESSAGE, DEFAULT_SUCCESS_MESSAGE, FAILURE_MESSAGE, MessageKind,
    PASSWORDS_DO_NOT_MATCH, SubmitTransport,
};
use lume::net::{FormSubmission, NetworkError, SubmissionReceipt};
use lume::prelude::*;
use parking_lot::Mutex;
use tokio::sync::Notify;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct Gate {
    entered: Notify,
    release: Notify,
    calls: AtomicUsize,
}

/// Holds every submission until the gate is released.
struct GatedTransport(Arc<Gate>);

impl SubmitTransport for GatedTransport {
    fn submit(&self, _submission: FormSubmission) -> BoxFuture<'static, std::result::Result<SubmissionReceipt, NetworkError>> {
        let gate = Arc::clone(&self.0);
        Box::pin(async move {
            gate.calls.fetch_add(1, Ordering::SeqCst);
            gate.entered.notify_one();
            gate.release.notified().await;
            Ok(SubmissionReceipt { status: 200 })
        })
    }
}

/// Logs go to the test output; filter with `RUST_LOG=lume::form=debug`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn contact_form(doc: &Document) -> Component<Form> {
    let form = Component::<Form>::create(doc);
    form.mount().unwrap();
    form
}

fn fill_contact(form: &Component<Form>) {
    form.set_field_value("name", "Ada Lovelace");
    form.set_field_value("email", "ada@example.com");
    form.set_field_value("message", "Hello there");
}

fn collect_notifications(doc: &Document) -> Arc<Mutex<Vec<Notification>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    doc.notifications()
        .connect(move |event| seen_clone.lock().push(event.notification.clone()));
    seen
}

fn submitted_count(seen: &Mutex<Vec<Notification>>) -> usize {
    seen.lock()
        .iter()
        .filter(|n| matches!(n, Notification::FormSubmitted { .. }))
        .count()
}

async fn wait_until_idle(form: &Component<Form>) {
    for _ in 0..1000 {
        if !form.is_submitting() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("submission never finished");
}

#[tokio::test]
async fn test_required_fields_block_submission() {
    let doc = Document::new();
    let seen = collect_notifications(&doc);
    let form = contact_form(&doc);

    let outcome = form.submit().await;
    let SubmitOutcome::Invalid(state) = outcome else {
        panic!("expected invalid outcome, got {outcome:?}");
    };
    assert_eq!(state.len(), 3);
    assert_eq!(state.error("email"), Some("Please fill out this field."));
    assert_eq!(form.phase(), SubmissionPhase::Invalid);
    assert_eq!(form.message().unwrap().text, DEFAULT_ERROR_MESSAGE);
    assert!(form.html().contains("has-error"));
    assert!(seen.lock().is_empty());
}

#[tokio::test]
async fn test_password_confirmation() {
    let doc = Document::new();
    let form = Component::<Form>::create(&doc).with_attribute("type", "register");
    form.mount().unwrap();
    form.set_field_value("name", "Ada");
    form.set_field_value("email", "ada@example.com");
    form.set_field_value("password", "hunter22");
    form.set_field_value("confirm_password", "hunter23");

    let outcome = form.submit().await;
    let SubmitOutcome::Invalid(state) = outcome else {
        panic!("expected invalid outcome, got {outcome:?}");
    };
    assert_eq!(state.len(), 1);
    assert_eq!(state.error("confirm_password"), Some(PASSWORDS_DO_NOT_MATCH));

    form.dismiss_message();
    form.set_field_value("confirm_password", "hunter22");
    assert!(form.submit().await.is_submitted());
}

#[tokio::test]
async fn test_submit_without_action_clears_values() {
    let doc = Document::new();
    let seen = collect_notifications(&doc);
    let form = contact_form(&doc);
    fill_contact(&form);

    assert_eq!(form.submit().await, SubmitOutcome::Submitted);
    assert_eq!(form.phase(), SubmissionPhase::Submitted);
    assert_eq!(form.field_value("name").as_deref(), Some(""));

    let message = form.message().unwrap();
    assert_eq!(message.kind, MessageKind::Success);
    assert_eq!(message.text, DEFAULT_SUCCESS_MESSAGE);

    let seen = seen.lock();
    assert_eq!(seen.len(), 1);
    let Notification::FormSubmitted { form_type, values } = &seen[0] else {
        panic!("unexpected notification {:?}", seen[0]);
    };
    assert_eq!(form_type, "contact");
    assert_eq!(values[0], ("name".to_string(), "Ada Lovelace".to_string()));
    assert_eq!(values.len(), 3);
}

#[tokio::test]
async fn test_dom_submit_runs_inline_without_action() {
    let doc = Document::new();
    let form = contact_form(&doc);
    fill_contact(&form);

    let allowed = form.dispatch("submit", &DomEvent::click());
    assert!(!allowed, "the native submission must be suppressed");
    assert_eq!(form.phase(), SubmissionPhase::Submitted);
}

#[tokio::test]
async fn test_double_submit_is_rejected() {
    init_tracing();
    let doc = Document::new();
    let seen = collect_notifications(&doc);
    let gate = Arc::new(Gate::default());
    doc.set_transport(Arc::new(GatedTransport(Arc::clone(&gate))));
    let form = Component::<Form>::create(&doc).with_attribute("action", "/contact");
    form.mount().unwrap();
    fill_contact(&form);

    let first = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });
    gate.entered.notified().await;

    assert!(form.is_submitting());
    assert_eq!(form.phase(), SubmissionPhase::Submitting);
    assert!(form.html().contains("Submitting..."));
    assert_eq!(form.submit().await, SubmitOutcome::AlreadySubmitting);

    gate.release.notify_one();
    assert_eq!(first.await.unwrap(), SubmitOutcome::Submitted);
    assert_eq!(gate.calls.load(Ordering::SeqCst), 1);
    assert_eq!(submitted_count(&seen), 1);
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_double_dom_submit_is_rejected() {
    let doc = Document::new();
    let seen = collect_notifications(&doc);
    let gate = Arc::new(Gate::default());
    doc.set_transport(Arc::new(GatedTransport(Arc::clone(&gate))));
    let form = Component::<Form>::create(&doc).with_attribute("action", "/contact");
    form.mount().unwrap();
    fill_contact(&form);

    assert!(!form.dispatch("submit", &DomEvent::click()));
    gate.entered.notified().await;
    assert!(form.is_submitting());

    assert!(!form.dispatch("submit", &DomEvent::click()));
    assert_eq!(form.phase(), SubmissionPhase::Submitting);

    gate.release.notify_one();
    wait_until_idle(&form).await;
    assert_eq!(form.phase(), SubmissionPhase::Submitted);
    assert_eq!(gate.calls.load(Ordering::SeqCst), 1);
    assert_eq!(submitted_count(&seen), 1);
}

#[test]
fn test_dom_submit_with_action_outside_runtime_is_abandoned() {
    let doc = Document::new();
    let seen = collect_notifications(&doc);
    let form = Component::<Form>::create(&doc).with_attribute("action", "http://127.0.0.1:9/contact");
    form.mount().unwrap();
    fill_contact(&form);

    assert!(!form.dispatch("submit", &DomEvent::click()));
    assert_eq!(form.phase(), SubmissionPhase::Idle);
    assert!(!form.is_submitting());
    assert_eq!(submitted_count(&seen), 0);
    assert_eq!(form.field_value("email").as_deref(), Some("ada@example.com"));
}

#[tokio::test]
async fn test_successful_remote_submission() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let doc = Document::new();
    let form = Component::<Form>::create(&doc)
        .with_attribute("action", format!("{}/contact", server.uri()));
    form.mount().unwrap();
    fill_contact(&form);

    assert_eq!(form.submit().await, SubmitOutcome::Submitted);
    assert_eq!(form.field_value("email").as_deref(), Some(""));
}

#[tokio::test]
async fn test_failed_remote_submission_keeps_values() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let doc = Document::new();
    let form = Component::<Form>::create(&doc)
        .with_attribute("action", format!("{}/contact", server.uri()));
    form.mount().unwrap();
    fill_contact(&form);

    assert!(matches!(form.submit().await, SubmitOutcome::Failed(_)));
    assert_eq!(form.phase(), SubmissionPhase::Failed);
    assert_eq!(form.message().unwrap().text, FAILURE_MESSAGE);
    assert_eq!(form.field_value("email").as_deref(), Some("ada@example.com"));
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_message_auto_dismisses() {
    let doc = Document::new();
    let form = contact_form(&doc);
    fill_contact(&form);
    form.submit().await;
    assert!(form.message().is_some());

    doc.advance(Duration::from_millis(4999));
    assert!(form.message().is_some());
    doc.advance(Duration::from_millis(1));
    assert_eq!(form.message(), None);
    assert_eq!(form.phase(), SubmissionPhase::Idle);
    assert!(!form.html().contains(DEFAULT_SUCCESS_MESSAGE));
}

#[tokio::test]
async fn test_unmount_cancels_dismiss_timer() {
    let doc = Document::new();
    let form = contact_form(&doc);
    form.submit().await;
    assert_eq!(form.timers().active_count(), 1);

    form.unmount().unwrap();
    assert_eq!(form.timers().active_count(), 0);
    assert_eq!(doc.advance(Duration::from_secs(10)), 0);
}
