//! `<lume-modal>`: a dialog over a backdrop.
//!
//! The `open` attribute drives visibility. Opening locks page scroll;
//! closing plays a `closing` phase of `modal_close` before the dialog hides
//! and scroll is released.

use std::fmt::{self, Write as _};

use lume_core::logging::targets;
use lume_core::{EventKind, Listener, TimerId};
use parking_lot::Mutex;

use crate::attributes::{AttributeStore, attribute_enum};
use crate::component::{BindContext, Component, Widget};
use crate::notification::Notification;
use crate::render::RenderContext;
use crate::slot::ChildNode;

attribute_enum! {
    /// Maximum dialog width.
    pub enum ModalSize {
        /// 400px.
        Small = "small",
        /// 600px.
        Medium = "medium",
        /// 800px.
        Large = "large",
    }
    default Medium
}

/// Typed attributes of a modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalConfig {
    /// Dialog width class.
    pub size: ModalSize,
    /// Whether the `header` slot has content; otherwise a default title shows.
    pub has_header: bool,
    /// Whether the `footer` slot has content.
    pub has_footer: bool,
    open: bool,
    closing: bool,
}

#[derive(Debug, Default)]
struct ModalState {
    open: bool,
    closing: bool,
    scroll_locked: bool,
    close_timer: Option<TimerId>,
}

/// `<lume-modal>`.
#[derive(Debug, Default)]
pub struct Modal {
    state: Mutex<ModalState>,
}

impl Widget for Modal {
    const TAG: &'static str = "lume-modal";
    const ID_PREFIX: &'static str = "lume-modal-";
    const OBSERVED: &'static [&'static str] = &["open", "size"];

    type Config = ModalConfig;

    fn configure(&self, attrs: &AttributeStore, children: &[ChildNode]) -> ModalConfig {
        let assigned = |slot: &str| children.iter().any(|child| child.slot_name() == Some(slot));
        let state = self.state.lock();
        ModalConfig {
            size: attrs.get_enum("size"),
            has_header: assigned("header"),
            has_footer: assigned("footer"),
            open: state.open,
            closing: state.closing,
        }
    }

    fn render(&self, config: &ModalConfig, ctx: &mut RenderContext<'_>) -> fmt::Result {
        ctx.sheet().base(
            "& .modal-root { position: fixed; inset: 0; z-index: 1050; }\n\
             & .hidden { display: none; }\n\
             & .backdrop { position: absolute; inset: 0; background: rgba(0, 0, 0, 0.7); opacity: 0; transition: opacity 0.3s ease-out; }\n\
             & .backdrop.open { opacity: 1; }\n\
             & .modal { position: relative; display: flex; align-items: center; justify-content: center; min-height: 100vh; padding: 1rem; transform: scale(0.7); opacity: 0; transition: all 0.3s ease-out; }\n\
             & .modal.open { transform: scale(1); opacity: 1; }\n\
             & .closing { opacity: 0; }\n\
             & .modal.closing { transform: scale(0.7); }\n\
             & .dialog { background: #1f2937; border-radius: 12px; width: 100%; max-height: 90vh; overflow-y: auto; border: 1px solid #374151; }\n\
             & .dialog.small { max-width: 400px; }\n\
             & .dialog.medium { max-width: 600px; }\n\
             & .dialog.large { max-width: 800px; }\n\
             & .header { padding: 1rem 1.5rem; border-bottom: 1px solid #374151; display: flex; justify-content: space-between; align-items: center; }\n\
             & .close-button { border: none; background: none; font-size: 1.5rem; cursor: pointer; color: #9ca3af; }\n\
             & .body { padding: 1.5rem; }\n\
             & .footer { padding: 1rem 1.5rem; border-top: 1px solid #374151; text-align: right; }",
        );

        let visible = config.open || config.closing;
        let phase = match (config.open, config.closing) {
            (_, true) => " closing",
            (true, false) => " open",
            (false, false) => "",
        };
        write!(
            ctx,
            "<div class=\"modal-root{}\" role=\"dialog\" aria-modal=\"true\" aria-hidden=\"{}\">",
            if visible { "" } else { " hidden" },
            !visible
        )?;
        let backdrop = ctx.node("backdrop");
        write!(ctx, "<div class=\"backdrop{phase}\"{backdrop}></div>")?;
        write!(
            ctx,
            "<div class=\"modal{phase}\"><div class=\"dialog {}\"><div class=\"header\">",
            config.size
        )?;
        if config.has_header {
            ctx.push("<slot name=\"header\"></slot>");
        } else {
            ctx.push("<slot name=\"header\"><h3>Modal Title</h3></slot>");
        }
        let close = ctx.node("close");
        write!(
            ctx,
            "<button type=\"button\" class=\"close-button\" aria-label=\"Close\"{close}>&times;</button></div>"
        )?;
        ctx.push("<div class=\"body\"><slot></slot></div>");
        if config.has_footer {
            ctx.push("<div class=\"footer\"><slot name=\"footer\"></slot></div>");
        }
        ctx.push("</div></div></div>");
        Ok(())
    }

    fn listeners(&self, cx: &BindContext<'_, Self>) -> Vec<Listener> {
        let mut listeners = cx.on("backdrop", EventKind::Click, |modal, _, _| modal.close());
        listeners.extend(cx.on("close", EventKind::Click, |modal, _, _| modal.close()));
        listeners
    }

    fn attribute_changed(
        &self,
        component: &Component<Self>,
        name: &str,
        _old: Option<&str>,
        new: Option<&str>,
    ) {
        if name != "open" {
            return;
        }
        if new.is_some() {
            component.show();
        } else {
            component.hide();
        }
    }

    fn mounted(&self, component: &Component<Self>) {
        if component.has_attribute("open") {
            component.show();
            component.refresh();
        }
    }

    fn unmounted(&self, component: &Component<Self>) {
        let release = {
            let mut state = self.state.lock();
            let release = state.scroll_locked;
            *state = ModalState::default();
            release
        };
        if release {
            component.document().unlock_scroll();
        }
    }
}

impl Component<Modal> {
    /// Whether the dialog is open (not counting the closing phase).
    pub fn is_open(&self) -> bool {
        self.widget().state.lock().open
    }

    /// Whether the closing phase is running.
    pub fn is_closing(&self) -> bool {
        self.widget().state.lock().closing
    }

    /// Open the dialog by setting the `open` attribute.
    pub fn open(&self) {
        self.toggle_attribute("open", true);
    }

    /// Start closing the dialog by removing the `open` attribute.
    pub fn close(&self) {
        self.toggle_attribute("open", false);
    }

    fn show(&self) {
        let (lock, pending) = {
            let mut state = self.widget().state.lock();
            if state.open {
                return;
            }
            state.open = true;
            state.closing = false;
            let lock = !state.scroll_locked;
            state.scroll_locked = true;
            (lock, state.close_timer.take())
        };
        if let Some(id) = pending {
            self.timers().cancel(id);
        }
        if lock {
            self.document().lock_scroll();
        }
        tracing::debug!(target: targets::LIFECYCLE, id = self.id(), "modal opened");
        self.emit(Notification::ModalOpen);
    }

    fn hide(&self) {
        {
            let mut state = self.widget().state.lock();
            if !state.open {
                return;
            }
            state.open = false;
            state.closing = true;
        }
        let handle = self.downgrade();
        let id = self
            .timers()
            .start(self.document().config().modal_close(), move || {
                if let Some(modal) = handle.upgrade() {
                    modal.finish_close();
                }
            });
        self.widget().state.lock().close_timer = Some(id);
        tracing::debug!(target: targets::LIFECYCLE, id = self.id(), "modal closing");
        self.emit(Notification::ModalClose);
    }

    fn finish_close(&self) {
        let release = {
            let mut state = self.widget().state.lock();
            state.close_timer = None;
            if !state.closing {
                return;
            }
            state.closing = false;
            std::mem::take(&mut state.scroll_locked)
        };
        if release {
            self.document().unlock_scroll();
        }
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use lume_core::DomEvent;

    use super::*;
    use crate::Document;

    #[test]
    fn test_open_close_cycle() {
        let doc = Document::new();
        let modal = Component::<Modal>::create(&doc);
        modal.mount().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        modal.notifications().connect(move |n| seen_clone.lock().push(n.clone()));
        assert!(modal.output().markup().contains("modal-root hidden"));

        modal.open();
        assert!(modal.is_open());
        assert!(doc.is_scroll_locked());
        assert!(modal.output().markup().contains("backdrop open"));

        modal.dispatch("close", &DomEvent::click());
        assert!(!modal.has_attribute("open"));
        assert!(modal.is_closing());
        assert!(doc.is_scroll_locked());
        assert!(modal.output().markup().contains("backdrop closing"));

        doc.advance(Duration::from_millis(300));
        assert!(!modal.is_closing());
        assert!(!doc.is_scroll_locked());
        assert!(modal.output().markup().contains("modal-root hidden"));
        assert_eq!(*seen.lock(), vec![Notification::ModalOpen, Notification::ModalClose]);
    }

    #[test]
    fn test_reopen_during_closing_keeps_lock() {
        let doc = Document::new();
        let modal = Component::<Modal>::create(&doc).with_attribute("open", "");
        modal.mount().unwrap();
        assert!(modal.is_open());

        modal.dispatch("backdrop", &DomEvent::click());
        modal.open();
        doc.advance(Duration::from_millis(500));
        assert!(modal.is_open());
        assert!(doc.is_scroll_locked());
    }

    #[test]
    fn test_unmount_releases_scroll() {
        let doc = Document::new();
        let modal = Component::<Modal>::create(&doc);
        modal.mount().unwrap();
        modal.open();
        modal.unmount().unwrap();
        assert!(!doc.is_scroll_locked());
        assert!(!modal.is_open());
    }

    #[test]
    fn test_default_header() {
        let doc = Document::new();
        let modal = Component::<Modal>::create(&doc).with_attribute("size", "large");
        modal.mount().unwrap();
        let markup = modal.output();
        assert!(markup.markup().contains("<h3>Modal Title</h3>"));
        assert!(markup.markup().contains("dialog large"));
    }
}
