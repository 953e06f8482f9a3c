//! Page-wide toast notifications.
//!
//! A [`Document`](crate::Document) owns at most one [`ToastContainer`],
//! created on first use. Each toast stays for the configured duration, is
//! then marked as leaving, and is removed once the leave transition ends.

use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use lume_core::TimerManager;
use lume_core::logging::targets;
use lume_style::{TrustedValue, status};
use parking_lot::Mutex;

use crate::attributes::attribute_enum;
use crate::render::esc;

attribute_enum! {
    /// Toast severity.
    pub enum ToastKind {
        /// Operation succeeded.
        Success = "success",
        /// Operation failed.
        Error = "error",
        /// Something needs attention.
        Warning = "warning",
        /// Neutral information.
        Info = "info",
    }
    default Info
}

impl ToastKind {
    /// Accent color for this kind.
    pub fn color(self) -> TrustedValue {
        match self {
            Self::Success => status::SUCCESS,
            Self::Error => status::ERROR,
            Self::Warning => status::WARNING,
            Self::Info => status::INFO,
        }
    }
}

/// Identifier of a shown toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

/// A toast currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Identifier.
    pub id: ToastId,
    /// Message text.
    pub message: String,
    /// Severity.
    pub kind: ToastKind,
    /// Whether the leave transition has started.
    pub leaving: bool,
}

/// The page's toast stack.
pub struct ToastContainer {
    timers: Arc<TimerManager>,
    duration: Duration,
    leave: Duration,
    next_id: AtomicU64,
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl ToastContainer {
    pub(crate) fn new(timers: Arc<TimerManager>, duration: Duration, leave: Duration) -> Self {
        tracing::debug!(target: targets::DOCUMENT, "toast container created");
        Self {
            timers,
            duration,
            leave,
            next_id: AtomicU64::new(1),
            toasts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Show a toast. It dismisses itself after the configured duration.
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        let id = ToastId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.toasts.lock().push(Toast {
            id,
            message: message.into(),
            kind,
            leaving: false,
        });
        let toasts = Arc::clone(&self.toasts);
        let timers = Arc::downgrade(&self.timers);
        let leave = self.leave;
        self.timers.start_one_shot(self.duration, move || {
            if let Some(timers) = timers.upgrade()
                && begin_leaving(&toasts, id)
            {
                timers.start_one_shot(leave, move || remove(&toasts, id));
            }
        });
        id
    }

    /// Start dismissing a toast early. Returns `false` if it is already gone
    /// or leaving.
    pub fn dismiss(&self, id: ToastId) -> bool {
        if !begin_leaving(&self.toasts, id) {
            return false;
        }
        let toasts = Arc::clone(&self.toasts);
        self.timers
            .start_one_shot(self.leave, move || remove(&toasts, id));
        true
    }

    /// Snapshot of the visible toasts, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }

    /// Number of visible toasts (including leaving ones).
    pub fn len(&self) -> usize {
        self.toasts.lock().len()
    }

    /// Whether no toast is visible.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Markup for the container.
    pub fn render(&self) -> String {
        let mut html = String::from("<div class=\"lume-toast-container\" role=\"status\">");
        for toast in self.toasts.lock().iter() {
            let _ = write!(
                html,
                "<div class=\"lume-toast lume-toast--{}{}\" style=\"border-left-color: {}\">{}</div>",
                toast.kind,
                if toast.leaving { " is-leaving" } else { "" },
                toast.kind.color(),
                esc(&toast.message)
            );
        }
        html.push_str("</div>");
        html
    }
}

fn begin_leaving(toasts: &Mutex<Vec<Toast>>, id: ToastId) -> bool {
    let mut toasts = toasts.lock();
    match toasts.iter_mut().find(|t| t.id == id && !t.leaving) {
        Some(toast) => {
            toast.leaving = true;
            true
        }
        None => false,
    }
}

fn remove(toasts: &Mutex<Vec<Toast>>, id: ToastId) {
    toasts.lock().retain(|t| t.id != id);
}

impl std::fmt::Debug for ToastContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastContainer")
            .field("visible", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> (Arc<TimerManager>, ToastContainer) {
        let timers = Arc::new(TimerManager::new());
        let container = ToastContainer::new(
            Arc::clone(&timers),
            Duration::from_millis(4000),
            Duration::from_millis(300),
        );
        (timers, container)
    }

    #[test]
    fn test_toast_lifecycle() {
        let (timers, toasts) = container();
        toasts.show("Saved", ToastKind::Success);
        assert_eq!(toasts.len(), 1);

        timers.advance(Duration::from_millis(3999));
        assert!(!toasts.toasts()[0].leaving);

        timers.advance(Duration::from_millis(1));
        assert!(toasts.toasts()[0].leaving);
        assert!(toasts.render().contains("is-leaving"));

        timers.advance(Duration::from_millis(300));
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_early_dismiss() {
        let (timers, toasts) = container();
        let id = toasts.show("<b>hi</b>", ToastKind::Info);
        assert!(toasts.render().contains("&lt;b&gt;hi&lt;/b&gt;"));
        assert!(toasts.dismiss(id));
        assert!(!toasts.dismiss(id));
        timers.advance(Duration::from_millis(300));
        assert!(toasts.is_empty());
        // the duration timer finds nothing left to do
        timers.advance(Duration::from_secs(5));
        assert!(toasts.is_empty());
    }
}
