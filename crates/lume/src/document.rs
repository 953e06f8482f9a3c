//! The host page.
//!
//! A [`Document`] stands in for everything a widget would otherwise reach
//! through browser globals: the window and document event scopes, a virtual
//! clock for timers, navigation, the page-level notification signal, named
//! click handlers, the toast container and the HTTP transport used by forms.
//!
//! Documents are cheap to clone; clones share state.
//!
//! ```ignore
//! let doc = Document::new();
//! doc.register_handler("track", |call| {
//!     println!("clicked {}", call.source);
//!     Ok(())
//! });
//!
//! let button = Component::<Button>::create(&doc);
//! button.set_attribute("onclick-handler", "track");
//! button.mount()?;
//! button.dispatch("button", &DomEvent::click());
//! ```

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use lume_core::logging::targets;
use lume_core::{DomEvent, EventTarget, Signal, TimerManager};
use parking_lot::{Mutex, RwLock};

use crate::attributes::LinkTarget;
use crate::config::LumeConfig;
use crate::error::Result;
use crate::form::SubmitTransport;
use crate::notification::NotificationEvent;
use crate::toast::{ToastContainer, ToastId, ToastKind};

/// Error type returned by named click handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

type ClickHandler = Arc<dyn Fn(&HandlerCall<'_>) -> std::result::Result<(), HandlerError> + Send + Sync>;

/// Arguments passed to a named click handler.
#[derive(Debug)]
pub struct HandlerCall<'a> {
    /// The triggering event.
    pub event: &'a DomEvent,
    /// Instance id of the widget that invoked the handler.
    pub source: &'a str,
}

/// A navigation request recorded by a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Destination.
    pub href: String,
    /// Browsing context.
    pub target: LinkTarget,
}

struct DocumentInner {
    config: LumeConfig,
    window: Arc<EventTarget>,
    body: Arc<EventTarget>,
    timers: Arc<TimerManager>,
    viewport_width: AtomicU32,
    navigations: Mutex<Vec<Navigation>>,
    notifications: Signal<NotificationEvent>,
    handlers: RwLock<HashMap<String, ClickHandler>>,
    toasts: OnceLock<ToastContainer>,
    scroll_locks: AtomicUsize,
    transport: Mutex<Option<Arc<dyn SubmitTransport>>>,
}

/// The page hosting a set of components.
#[derive(Clone)]
pub struct Document {
    inner: Arc<DocumentInner>,
}

impl Document {
    /// A document with the default configuration.
    pub fn new() -> Self {
        Self::with_config(LumeConfig::default())
    }

    /// A document with `config`.
    pub fn with_config(config: LumeConfig) -> Self {
        let viewport_width = AtomicU32::new(config.viewport_width);
        Self {
            inner: Arc::new(DocumentInner {
                config,
                window: Arc::new(EventTarget::new("window")),
                body: Arc::new(EventTarget::new("document")),
                timers: Arc::new(TimerManager::new()),
                viewport_width,
                navigations: Mutex::new(Vec::new()),
                notifications: Signal::new(),
                handlers: RwLock::new(HashMap::new()),
                toasts: OnceLock::new(),
                scroll_locks: AtomicUsize::new(0),
                transport: Mutex::new(None),
            }),
        }
    }

    /// The configuration.
    pub fn config(&self) -> &LumeConfig {
        &self.inner.config
    }

    // =========================================================================
    // Event scopes
    // =========================================================================

    /// The window scope (resize events).
    pub fn window(&self) -> &Arc<EventTarget> {
        &self.inner.window
    }

    /// The document scope (page-wide clicks).
    pub fn body(&self) -> &Arc<EventTarget> {
        &self.inner.body
    }

    /// Current viewport width in pixels.
    pub fn viewport_width(&self) -> u32 {
        self.inner.viewport_width.load(Ordering::SeqCst)
    }

    /// Resize the viewport and dispatch a resize event on the window scope.
    pub fn resize(&self, width: u32) {
        self.inner.viewport_width.store(width, Ordering::SeqCst);
        self.inner.window.dispatch(&DomEvent::resize(width));
    }

    /// Dispatch a click on the document scope. `path` lists the instance ids
    /// of the components the click landed inside, innermost first.
    pub fn click_at<I, S>(&self, path: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.body.dispatch(&DomEvent::click().with_path(path))
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// The document's timer manager.
    pub fn timers(&self) -> &Arc<TimerManager> {
        &self.inner.timers
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.inner.timers.now()
    }

    /// Advance the virtual clock, firing due timers. Returns how many fired.
    pub fn advance(&self, by: Duration) -> usize {
        self.inner.timers.advance(by)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Record a navigation request.
    pub fn navigate(&self, href: impl Into<String>, target: LinkTarget) {
        let href = href.into();
        tracing::debug!(target: targets::DOCUMENT, %href, %target, "navigation requested");
        self.inner.navigations.lock().push(Navigation { href, target });
    }

    /// Navigations recorded so far, oldest first.
    pub fn navigations(&self) -> Vec<Navigation> {
        self.inner.navigations.lock().clone()
    }

    /// Drain the recorded navigations.
    pub fn take_navigations(&self) -> Vec<Navigation> {
        std::mem::take(&mut *self.inner.navigations.lock())
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Page-level signal every component notification bubbles to.
    pub fn notifications(&self) -> &Signal<NotificationEvent> {
        &self.inner.notifications
    }

    pub(crate) fn publish(&self, event: NotificationEvent) {
        tracing::debug!(
            target: targets::DOCUMENT,
            source = %event.source,
            notification = event.notification.name(),
            "notification"
        );
        self.inner.notifications.emit(&event);
    }

    // =========================================================================
    // Named handlers
    // =========================================================================

    /// Register a click handler that widgets can reference by name.
    pub fn register_handler<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&HandlerCall<'_>) -> std::result::Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.inner
            .handlers
            .write()
            .insert(name.into(), Arc::new(handler));
    }

    /// Remove a handler. Returns whether it existed.
    pub fn unregister_handler(&self, name: &str) -> bool {
        self.inner.handlers.write().remove(name).is_some()
    }

    /// Run the named handler. Errors and panics are logged and swallowed.
    ///
    /// Returns `true` if the handler ran to completion without error.
    pub fn run_handler(&self, name: &str, call: &HandlerCall<'_>) -> bool {
        let Some(handler) = self.inner.handlers.read().get(name).cloned() else {
            tracing::warn!(target: targets::DOCUMENT, handler = name, "no handler registered under this name");
            return false;
        };
        match catch_unwind(AssertUnwindSafe(|| handler(call))) {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::error!(target: targets::DOCUMENT, handler = name, source = call.source, error = %e, "click handler failed");
                false
            }
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::error!(target: targets::DOCUMENT, handler = name, source = call.source, %message, "click handler panicked");
                false
            }
        }
    }

    // =========================================================================
    // Toasts and scroll lock
    // =========================================================================

    /// The toast container, created on first access.
    pub fn toasts(&self) -> &ToastContainer {
        self.inner.toasts.get_or_init(|| {
            ToastContainer::new(
                Arc::clone(&self.inner.timers),
                self.inner.config.toast_duration(),
                self.inner.config.toast_leave(),
            )
        })
    }

    /// Whether the toast container exists yet.
    pub fn has_toast_container(&self) -> bool {
        self.inner.toasts.get().is_some()
    }

    /// Show a toast.
    pub fn show_toast(&self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        self.toasts().show(message, kind)
    }

    /// Take a page scroll lock (held while a modal is open).
    pub fn lock_scroll(&self) {
        self.inner.scroll_locks.fetch_add(1, Ordering::SeqCst);
    }

    /// Release a scroll lock taken with [`lock_scroll`](Self::lock_scroll).
    pub fn unlock_scroll(&self) {
        let _ = self
            .inner
            .scroll_locks
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }

    /// Whether page scrolling is locked.
    pub fn is_scroll_locked(&self) -> bool {
        self.inner.scroll_locks.load(Ordering::SeqCst) > 0
    }

    // =========================================================================
    // Transport
    // =========================================================================

    /// Replace the transport used for form submission.
    pub fn set_transport(&self, transport: Arc<dyn SubmitTransport>) {
        *self.inner.transport.lock() = Some(transport);
    }

    /// The form transport. Defaults to an HTTP client built from the
    /// configuration on first use.
    pub fn transport(&self) -> Result<Arc<dyn SubmitTransport>> {
        let mut slot = self.inner.transport.lock();
        if let Some(transport) = slot.as_ref() {
            return Ok(Arc::clone(transport));
        }
        let transport: Arc<dyn SubmitTransport> = Arc::new(self.inner.config.http_client()?);
        *slot = Some(Arc::clone(&transport));
        Ok(transport)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("viewport_width", &self.viewport_width())
            .field("now", &self.now())
            .field("navigations", &self.inner.navigations.lock().len())
            .finish()
    }
}

static_assertions::assert_impl_all!(Document: Send, Sync);
