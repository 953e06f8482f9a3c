//! Lume: themeable attribute-driven widgets on a headless component runtime.
//!
//! Widgets are configured through string attributes, render to instance-scoped
//! HTML and CSS strings, bind listeners on an in-memory event surface and
//! report user intent as structured [`Notification`]s. A [`Document`] stands
//! in for the host page.
//!
//! # Example
//!
//! ```no_run
//! use lume::prelude::*;
//!
//! fn main() -> lume::Result<()> {
//!     let doc = Document::new();
//!     register_builtin_elements(ElementRegistry::global())?;
//!
//!     let button = Component::<Button>::create(&doc)
//!         .with_attribute("variant", "glow")
//!         .with_attribute("href", "/signup");
//!     button.mount()?;
//!     button.dispatch("button", &DomEvent::click());
//!
//!     assert_eq!(doc.navigations()[0].href, "/signup");
//!     Ok(())
//! }
//! ```
//!
//! # Crate layout
//!
//! - [`attributes`]: attribute store and enumerated attribute values
//! - [`render`]: render context, escaping and the rendered output
//! - [`component`]: the shared lifecycle ([`Widget`] and [`Component`])
//! - [`document`]: the host page (event scopes, clock, navigation, toasts)
//! - [`form`]: the form widget and its validation engine
//! - [`widgets`]: every other widget
//! - [`registry`]: tag-name registry

pub mod attributes;
pub mod component;
pub mod config;
pub mod document;
pub mod error;
pub mod form;
pub mod notification;
pub mod prelude;
pub mod registry;
pub mod render;
pub mod slot;
pub mod toast;
pub mod widgets;

pub use attributes::{AttributeEnum, AttributeStore, LinkTarget};
pub use component::{BindContext, Component, LifecycleState, Widget, WidgetHandle};
pub use config::{HttpSettings, LumeConfig};
pub use document::{Document, HandlerCall, HandlerError, Navigation};
pub use error::{LumeError, Result};
pub use notification::{NavItemKind, Notification, NotificationEvent};
pub use registry::{Element, ElementRegistry, register_builtin_elements};
pub use render::{NodeData, RenderContext, RenderedOutput, esc, escape_html};
pub use slot::ChildNode;
pub use toast::{Toast, ToastContainer, ToastId, ToastKind};

pub use lume_core::{DomEvent, EventKind};

/// Styling primitives.
pub mod style {
    pub use lume_style::*;
}

/// HTTP transport.
pub mod net {
    pub use lume_net::*;
}

static_assertions::assert_impl_all!(Document: Send, Sync, Clone);
static_assertions::assert_impl_all!(ElementRegistry: Send, Sync);
static_assertions::assert_impl_all!(Component<widgets::Button>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Component<form::Form>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Component<widgets::Modal>: Send, Sync, Clone);
