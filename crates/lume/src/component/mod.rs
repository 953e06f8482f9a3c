//! The shared component lifecycle.
//!
//! Every widget in this crate is a [`Widget`] driven by a [`Component`]. The
//! component owns the attribute map, the current [`RenderedOutput`] and the
//! listener disposers; the widget only describes how to turn attributes into a
//! typed configuration, how to render that configuration, and which listeners
//! the rendered nodes need.
//!
//! # Lifecycle
//!
//! ```text
//! Unmounted --mount()--> Mounting --> Mounted --unmount()--> Unmounting --> Unmounted
//! ```
//!
//! - `mount()` applies queued property assignments, renders, binds the
//!   render-scoped listeners and then the mount-scoped (global) ones.
//! - An observed attribute change while mounted re-renders synchronously:
//!   dispose the old listeners, replace the output, bind new listeners.
//! - `unmount()` disposes every listener and cancels the component's timers.
//!
//! # Writing a widget
//!
//! ```ignore
//! #[derive(Default)]
//! struct Badge;
//!
//! impl Widget for Badge {
//!     const TAG: &'static str = "lume-badge";
//!     const ID_PREFIX: &'static str = "lume-badge-";
//!     const OBSERVED: &'static [&'static str] = &["label"];
//!     type Config = String;
//!
//!     fn configure(&self, attrs: &AttributeStore, _: &[ChildNode]) -> String {
//!         attrs.get_or("label", "New")
//!     }
//!
//!     fn render(&self, label: &String, ctx: &mut RenderContext<'_>) -> fmt::Result {
//!         write!(ctx, "<span class=\"lume-badge\">{}</span>", esc(label))
//!     }
//! }
//! ```

mod lifecycle;

use std::fmt;
use std::sync::Arc;

use lume_core::{DomEvent, EventKind, EventTarget, Listener};

use crate::attributes::AttributeStore;
use crate::render::{NodeData, RenderContext, RenderedOutput};
use crate::slot::ChildNode;

pub use lifecycle::{Component, WidgetHandle};

/// Lifecycle state of a component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Not attached. Nothing is rendered or bound.
    #[default]
    Unmounted,
    /// First render in progress.
    Mounting,
    /// Attached and reacting to attribute changes.
    Mounted,
    /// Teardown in progress.
    Unmounting,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unmounted => "unmounted",
            Self::Mounting => "mounting",
            Self::Mounted => "mounted",
            Self::Unmounting => "unmounting",
        })
    }
}

/// Behaviour of one widget type.
pub trait Widget: Send + Sync + Sized + 'static {
    /// Element tag name.
    const TAG: &'static str;
    /// Prefix of generated instance ids.
    const ID_PREFIX: &'static str;
    /// Attributes whose changes trigger a re-render.
    const OBSERVED: &'static [&'static str];

    /// Typed snapshot of the attributes.
    type Config: Send + Sync + 'static;

    /// Build the configuration from the current attributes and children.
    fn configure(&self, attrs: &AttributeStore, children: &[ChildNode]) -> Self::Config;

    /// Render `config`.
    fn render(&self, config: &Self::Config, ctx: &mut RenderContext<'_>) -> fmt::Result;

    /// Listeners for the freshly rendered nodes.
    fn listeners(&self, _cx: &BindContext<'_, Self>) -> Vec<Listener> {
        Vec::new()
    }

    /// Listeners on document-level scopes, bound once per mount.
    fn global_listeners(&self, _cx: &BindContext<'_, Self>) -> Vec<Listener> {
        Vec::new()
    }

    /// Called for an observed attribute change before the re-render.
    fn attribute_changed(
        &self,
        _component: &Component<Self>,
        _name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) {
    }

    /// Called once mounting has finished.
    fn mounted(&self, _component: &Component<Self>) {}

    /// Called after listeners and timers were released on unmount.
    fn unmounted(&self, _component: &Component<Self>) {}
}

/// Context for building listeners.
pub struct BindContext<'a, W: Widget> {
    component: &'a Component<W>,
    output: &'a RenderedOutput,
}

impl<'a, W: Widget> BindContext<'a, W> {
    pub(crate) fn new(component: &'a Component<W>, output: &'a RenderedOutput) -> Self {
        Self { component, output }
    }

    /// The component being bound.
    pub fn component(&self) -> &Component<W> {
        self.component
    }

    /// The output whose nodes are being bound.
    pub fn output(&self) -> &RenderedOutput {
        self.output
    }

    /// One listener per node with `role`.
    ///
    /// The handler receives the live component, the node's data and the event.
    /// Listeners hold the component weakly.
    pub fn on<F>(&self, role: &str, kind: EventKind, handler: F) -> Vec<Listener>
    where
        F: Fn(&Component<W>, &NodeData, &DomEvent) + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        self.output
            .nodes_with_role(role)
            .map(|node| {
                let handle = self.component.downgrade();
                let handler = Arc::clone(&handler);
                let data = node.data().clone();
                Listener::new(node.target(), kind, move |event| {
                    if let Some(component) = handle.upgrade() {
                        handler(&component, &data, event);
                    }
                })
            })
            .collect()
    }

    /// A listener on an arbitrary target, such as a document scope.
    pub fn on_target<F>(&self, target: &Arc<EventTarget>, kind: EventKind, handler: F) -> Listener
    where
        F: Fn(&Component<W>, &DomEvent) + Send + Sync + 'static,
    {
        let handle = self.component.downgrade();
        Listener::new(target, kind, move |event| {
            if let Some(component) = handle.upgrade() {
                handler(&component, event);
            }
        })
    }
}
