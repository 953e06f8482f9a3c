//! [`Component`]: attribute storage, rendering and listener rewiring.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use lume_core::logging::{span_names, targets};
use lume_core::{Disposer, DomEvent, ListenerBinder, ScopedTimers, Signal};
use parking_lot::{Mutex, RwLock};

use super::{BindContext, LifecycleState, Widget};
use crate::attributes::AttributeStore;
use crate::document::Document;
use crate::error::{LumeError, Result};
use crate::notification::{Notification, NotificationEvent};
use crate::render::{InstanceId, InteractiveNode, RenderContext, RenderedOutput};
use crate::slot::ChildNode;

struct ComponentInner<W: Widget> {
    widget: W,
    id: InstanceId,
    document: Document,
    state: Mutex<LifecycleState>,
    attributes: RwLock<AttributeStore>,
    pending: Mutex<Vec<(String, Option<String>)>>,
    children: RwLock<Vec<ChildNode>>,
    config: RwLock<Option<Arc<W::Config>>>,
    output: RwLock<Arc<RenderedOutput>>,
    render_listeners: Mutex<Disposer>,
    global_listeners: Mutex<Disposer>,
    render_guard: Mutex<()>,
    timers: ScopedTimers,
    notifications: Signal<Notification>,
    render_count: AtomicU64,
}

/// A widget instance attached to a [`Document`].
///
/// Cloning yields another handle to the same instance.
pub struct Component<W: Widget> {
    inner: Arc<ComponentInner<W>>,
}

impl<W: Widget> Clone for Component<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// A weak reference to a [`Component`], held by listeners and timers.
pub struct WidgetHandle<W: Widget> {
    inner: Weak<ComponentInner<W>>,
}

impl<W: Widget> Clone for WidgetHandle<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<W: Widget> WidgetHandle<W> {
    /// The component, if it is still alive.
    pub fn upgrade(&self) -> Option<Component<W>> {
        self.inner.upgrade().map(|inner| Component { inner })
    }
}

impl<W: Widget + Default> Component<W> {
    /// Create an unmounted instance with the widget's default state.
    pub fn create(document: &Document) -> Self {
        Self::new(document, W::default())
    }
}

impl<W: Widget> Component<W> {
    /// Create an unmounted instance around `widget`.
    pub fn new(document: &Document, widget: W) -> Self {
        let id = InstanceId::generate(W::ID_PREFIX);
        tracing::trace!(target: targets::LIFECYCLE, tag = W::TAG, %id, "component created");
        Self {
            inner: Arc::new(ComponentInner {
                widget,
                id,
                document: document.clone(),
                state: Mutex::new(LifecycleState::Unmounted),
                attributes: RwLock::new(AttributeStore::new()),
                pending: Mutex::new(Vec::new()),
                children: RwLock::new(Vec::new()),
                config: RwLock::new(None),
                output: RwLock::new(Arc::new(RenderedOutput::empty())),
                render_listeners: Mutex::new(Disposer::empty()),
                global_listeners: Mutex::new(Disposer::empty()),
                render_guard: Mutex::new(()),
                timers: ScopedTimers::new(Arc::clone(document.timers())),
                notifications: Signal::new(),
                render_count: AtomicU64::new(0),
            }),
        }
    }

    /// Builder-style attribute assignment for unmounted instances.
    pub fn with_attribute(self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style children assignment.
    pub fn with_children(self, children: Vec<ChildNode>) -> Self {
        self.set_children(children);
        self
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Instance id (also the stylesheet scope class).
    pub fn id(&self) -> &str {
        self.inner.id.as_str()
    }

    /// Element tag.
    pub fn tag(&self) -> &'static str {
        W::TAG
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        *self.inner.state.lock()
    }

    /// Whether the component is mounted.
    pub fn is_mounted(&self) -> bool {
        self.state() == LifecycleState::Mounted
    }

    /// The hosting document.
    pub fn document(&self) -> &Document {
        &self.inner.document
    }

    /// The widget behaviour and its private state.
    pub fn widget(&self) -> &W {
        &self.inner.widget
    }

    /// A weak handle.
    pub fn downgrade(&self) -> WidgetHandle<W> {
        WidgetHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    // =========================================================================
    // Attributes and properties
    // =========================================================================

    /// Current value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.inner.attributes.read().get(name).map(str::to_string)
    }

    /// Whether an attribute is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.inner.attributes.read().has(name)
    }

    /// Snapshot of all attributes.
    pub fn attributes(&self) -> AttributeStore {
        self.inner.attributes.read().clone()
    }

    /// Set an attribute and run the change callback.
    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let old = self.inner.attributes.write().set(name, value.clone());
        self.attribute_changed(name, old.as_deref(), Some(&value));
    }

    /// Remove an attribute and run the change callback.
    pub fn remove_attribute(&self, name: &str) {
        let old = self.inner.attributes.write().remove(name);
        if old.is_some() {
            self.attribute_changed(name, old.as_deref(), None);
        }
    }

    /// Set or clear a boolean (presence) attribute.
    pub fn toggle_attribute(&self, name: &str, present: bool) {
        if present {
            if !self.has_attribute(name) {
                self.set_attribute(name, "");
            }
        } else {
            self.remove_attribute(name);
        }
    }

    /// Attribute change callback.
    ///
    /// Re-renders when mounted, `name` is observed and the value changed.
    pub fn attribute_changed(&self, name: &str, old: Option<&str>, new: Option<&str>) {
        if old == new {
            tracing::trace!(target: targets::LIFECYCLE, id = self.id(), attribute = name, "unchanged value ignored");
            return;
        }
        if !W::OBSERVED.contains(&name) {
            tracing::trace!(target: targets::LIFECYCLE, id = self.id(), attribute = name, "unobserved attribute");
            return;
        }
        let state = self.state();
        if state != LifecycleState::Mounted {
            tracing::trace!(target: targets::LIFECYCLE, id = self.id(), attribute = name, %state, "change ignored");
            return;
        }
        self.inner.widget.attribute_changed(self, name, old, new);
        self.refresh();
    }

    /// Assign a property.
    ///
    /// Before mount the assignment is queued and applied as an attribute when
    /// mounting; afterwards it is reflected into the attribute immediately.
    /// `None` removes the attribute.
    pub fn set_property(&self, name: &str, value: Option<String>) {
        if self.state() == LifecycleState::Unmounted {
            self.inner.pending.lock().push((name.to_string(), value));
            return;
        }
        match value {
            Some(value) => self.set_attribute(name, value),
            None => self.remove_attribute(name),
        }
    }

    /// Read a property, including queued assignments.
    pub fn property(&self, name: &str) -> Option<String> {
        let queued = self
            .inner
            .pending
            .lock()
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone());
        match queued {
            Some(value) => value,
            None => self.attribute(name),
        }
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Replace the light-DOM children. Re-renders when mounted.
    pub fn set_children(&self, children: Vec<ChildNode>) {
        *self.inner.children.write() = children;
        if self.is_mounted() {
            self.refresh();
        }
    }

    /// Snapshot of the children.
    pub fn children(&self) -> Vec<ChildNode> {
        self.inner.children.read().clone()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attach the component: apply queued properties, render and bind.
    pub fn mount(&self) -> Result<()> {
        self.transition(LifecycleState::Unmounted, LifecycleState::Mounting, "mount")?;

        let pending = std::mem::take(&mut *self.inner.pending.lock());
        if !pending.is_empty() {
            let mut attributes = self.inner.attributes.write();
            for (name, value) in pending {
                match value {
                    Some(value) => attributes.set(name, value),
                    None => attributes.remove(&name),
                };
            }
        }

        self.refresh();

        let output = self.output();
        let global = {
            let cx = BindContext::new(self, &output);
            self.inner.widget.global_listeners(&cx)
        };
        *self.inner.global_listeners.lock() = ListenerBinder::bind(global);

        *self.inner.state.lock() = LifecycleState::Mounted;
        tracing::debug!(target: targets::LIFECYCLE, tag = W::TAG, id = self.id(), "mounted");
        self.inner.widget.mounted(self);
        Ok(())
    }

    /// Detach the component: dispose every listener and cancel its timers.
    pub fn unmount(&self) -> Result<()> {
        self.transition(LifecycleState::Mounted, LifecycleState::Unmounting, "unmount")?;

        let mut render = std::mem::take(&mut *self.inner.render_listeners.lock());
        render.dispose();
        let mut global = std::mem::take(&mut *self.inner.global_listeners.lock());
        global.dispose();
        let cancelled = self.inner.timers.cancel_all();

        self.inner.widget.unmounted(self);
        *self.inner.state.lock() = LifecycleState::Unmounted;
        tracing::debug!(target: targets::LIFECYCLE, tag = W::TAG, id = self.id(), cancelled_timers = cancelled, "unmounted");
        Ok(())
    }

    fn transition(
        &self,
        from: LifecycleState,
        to: LifecycleState,
        action: &'static str,
    ) -> Result<()> {
        let mut state = self.inner.state.lock();
        if *state != from {
            return Err(LumeError::Lifecycle {
                tag: W::TAG,
                action,
                state: *state,
            });
        }
        *state = to;
        Ok(())
    }

    /// Re-render and rebind. Does nothing unless mounting or mounted.
    ///
    /// Must not be called while holding a lock that `configure` or `render`
    /// takes.
    pub fn refresh(&self) {
        let state = self.state();
        if !matches!(state, LifecycleState::Mounting | LifecycleState::Mounted) {
            tracing::trace!(target: targets::RENDER, id = self.id(), %state, "render skipped");
            return;
        }
        let _guard = self.inner.render_guard.lock();
        let _span = tracing::trace_span!(target: targets::RENDER, span_names::RENDER, tag = W::TAG, id = self.id()).entered();

        let mut previous = std::mem::take(&mut *self.inner.render_listeners.lock());
        previous.dispose();

        let config = {
            let attributes = self.inner.attributes.read();
            let children = self.inner.children.read();
            Arc::new(self.inner.widget.configure(&attributes, &children))
        };

        let mut ctx = RenderContext::new(&self.inner.id, W::TAG);
        if let Err(e) = self.inner.widget.render(&config, &mut ctx) {
            tracing::error!(target: targets::RENDER, id = self.id(), error = %e, "render failed");
        }
        let output = Arc::new(ctx.finish());

        *self.inner.config.write() = Some(config);
        *self.inner.output.write() = Arc::clone(&output);

        let listeners = {
            let cx = BindContext::new(self, &output);
            self.inner.widget.listeners(&cx)
        };
        *self.inner.render_listeners.lock() = ListenerBinder::bind(listeners);

        let count = self.inner.render_count.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::trace!(target: targets::RENDER, id = self.id(), count, nodes = output.nodes().len(), "rendered");
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// The configuration of the last render.
    pub fn config(&self) -> Option<Arc<W::Config>> {
        self.inner.config.read().clone()
    }

    /// The current output.
    pub fn output(&self) -> Arc<RenderedOutput> {
        self.inner.output.read().clone()
    }

    /// Style and markup of the current output.
    pub fn html(&self) -> String {
        self.output().html()
    }

    /// The first interactive node with `role`.
    pub fn node(&self, role: &str) -> Option<InteractiveNode> {
        self.output().node(role).cloned()
    }

    /// Number of completed render passes.
    pub fn render_count(&self) -> u64 {
        self.inner.render_count.load(Ordering::Relaxed)
    }

    /// Listeners bound to the current output plus the global scopes.
    pub fn listener_count(&self) -> usize {
        self.inner.render_listeners.lock().len() + self.inner.global_listeners.lock().len()
    }

    /// Dispatch `event` on the first node with `role`.
    ///
    /// Returns `false` if no such node exists or a listener prevented the
    /// default action.
    pub fn dispatch(&self, role: &str, event: &DomEvent) -> bool {
        let Some(target) = self.output().node(role).map(|node| Arc::clone(node.target())) else {
            tracing::trace!(target: targets::RENDER, id = self.id(), role, "no node with this role");
            return false;
        };
        target.dispatch(event)
    }

    /// Dispatch `event` on the `nth` node with `role`.
    pub fn dispatch_nth(&self, role: &str, nth: usize, event: &DomEvent) -> bool {
        let target = self
            .output()
            .nodes_with_role(role)
            .nth(nth)
            .map(|node| Arc::clone(node.target()));
        target.is_some_and(|target| target.dispatch(event))
    }

    // =========================================================================
    // Notifications and timers
    // =========================================================================

    /// The component's own notification signal.
    pub fn notifications(&self) -> &Signal<Notification> {
        &self.inner.notifications
    }

    /// Emit on the component signal, then bubble to the document.
    pub fn emit(&self, notification: Notification) {
        self.inner.notifications.emit(&notification);
        self.inner.document.publish(NotificationEvent {
            source: self.id().to_string(),
            tag: W::TAG,
            notification,
        });
    }

    /// Timers owned by this component; cancelled on unmount.
    pub fn timers(&self) -> &ScopedTimers {
        &self.inner.timers
    }
}

impl<W: Widget> fmt::Debug for Component<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("tag", &W::TAG)
            .field("id", &self.id())
            .field("state", &self.state())
            .field("renders", &self.render_count())
            .finish()
    }
}
