//! Element registry: tag name to widget type.
//!
//! The registry plays the role of a custom-element registry. Defining the
//! same widget type under its tag twice is a no-op; defining a different type
//! under a taken tag is an error.
//!
//! ```ignore
//! let registry = ElementRegistry::global();
//! register_builtin_elements(registry)?;
//!
//! let element = registry.create("lume-button", &doc)?;
//! element.set_attribute("variant", "ghost");
//! element.mount()?;
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use lume_core::DomEvent;
use lume_core::logging::targets;
use parking_lot::RwLock;

use crate::component::{Component, LifecycleState, Widget};
use crate::document::Document;
use crate::error::{LumeError, Result};
use crate::form::Form;
use crate::slot::ChildNode;
use crate::widgets::{Accordion, Article, Button, Card, Footer, Hero, Input, Modal, Navbar};

/// A component instance with its widget type erased.
pub trait Element: Send + Sync + fmt::Debug {
    /// Tag name.
    fn tag(&self) -> &'static str;
    /// Instance id.
    fn id(&self) -> &str;
    /// Lifecycle state.
    fn state(&self) -> LifecycleState;
    /// Attach and render.
    fn mount(&self) -> Result<()>;
    /// Detach and release listeners and timers.
    fn unmount(&self) -> Result<()>;
    /// Current attribute value.
    fn attribute(&self, name: &str) -> Option<String>;
    /// Set an attribute.
    fn set_attribute(&self, name: &str, value: &str);
    /// Remove an attribute.
    fn remove_attribute(&self, name: &str);
    /// Replace the light-DOM children.
    fn set_children(&self, children: Vec<ChildNode>);
    /// Style and markup of the current output.
    fn html(&self) -> String;
    /// Dispatch `event` on the first node with `role`.
    fn dispatch(&self, role: &str, event: &DomEvent) -> bool;
    /// Downcasting support; the concrete type is `Component<W>`.
    fn as_any(&self) -> &dyn Any;
}

impl<W: Widget> Element for Component<W> {
    fn tag(&self) -> &'static str {
        Component::tag(self)
    }

    fn id(&self) -> &str {
        Component::id(self)
    }

    fn state(&self) -> LifecycleState {
        Component::state(self)
    }

    fn mount(&self) -> Result<()> {
        Component::mount(self)
    }

    fn unmount(&self) -> Result<()> {
        Component::unmount(self)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        Component::attribute(self, name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        Component::set_attribute(self, name, value);
    }

    fn remove_attribute(&self, name: &str) {
        Component::remove_attribute(self, name);
    }

    fn set_children(&self, children: Vec<ChildNode>) {
        Component::set_children(self, children);
    }

    fn html(&self) -> String {
        Component::html(self)
    }

    fn dispatch(&self, role: &str, event: &DomEvent) -> bool {
        Component::dispatch(self, role, event)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn Element {
    /// Downcast to a concrete component.
    pub fn downcast_ref<W: Widget>(&self) -> Option<&Component<W>> {
        self.as_any().downcast_ref()
    }
}

type Factory = fn(&Document) -> Box<dyn Element>;

fn construct<W: Widget + Default>(document: &Document) -> Box<dyn Element> {
    Box::new(Component::<W>::create(document))
}

#[derive(Clone, Copy)]
struct Definition {
    type_id: TypeId,
    type_name: &'static str,
    factory: Factory,
}

/// Maps tag names to widget types.
#[derive(Default)]
pub struct ElementRegistry {
    definitions: RwLock<HashMap<&'static str, Definition>>,
}

impl ElementRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static ElementRegistry {
        static GLOBAL: OnceLock<ElementRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ElementRegistry::new)
    }

    /// Register `W` under [`Widget::TAG`].
    ///
    /// Returns `Ok(true)` when newly defined and `Ok(false)` when `W` was
    /// already registered under that tag.
    pub fn define<W: Widget + Default>(&self) -> Result<bool> {
        let mut definitions = self.definitions.write();
        if let Some(existing) = definitions.get(W::TAG) {
            if existing.type_id == TypeId::of::<W>() {
                tracing::trace!(target: targets::REGISTRY, tag = W::TAG, "already defined");
                return Ok(false);
            }
            tracing::warn!(
                target: targets::REGISTRY,
                tag = W::TAG,
                existing = existing.type_name,
                "conflicting definition rejected"
            );
            return Err(LumeError::AlreadyDefined {
                tag: W::TAG.to_string(),
                existing: existing.type_name,
            });
        }
        definitions.insert(
            W::TAG,
            Definition {
                type_id: TypeId::of::<W>(),
                type_name: std::any::type_name::<W>(),
                factory: construct::<W>,
            },
        );
        tracing::debug!(target: targets::REGISTRY, tag = W::TAG, "element defined");
        Ok(true)
    }

    /// Whether a widget is registered under `tag`.
    pub fn is_defined(&self, tag: &str) -> bool {
        self.definitions.read().contains_key(tag.to_ascii_lowercase().as_str())
    }

    /// Create an unmounted instance of the widget registered under `tag`.
    pub fn create(&self, tag: &str, document: &Document) -> Result<Box<dyn Element>> {
        let tag = tag.to_ascii_lowercase();
        let factory = self
            .definitions
            .read()
            .get(tag.as_str())
            .map(|definition| definition.factory)
            .ok_or_else(|| LumeError::UnknownElement(tag.clone()))?;
        Ok(factory(document))
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self.definitions.read().keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    /// Number of registered tags.
    pub fn len(&self) -> usize {
        self.definitions.read().len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.read().is_empty()
    }
}

impl fmt::Debug for ElementRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

/// Register every widget of this crate. Safe to call repeatedly.
///
/// Returns the number of newly defined tags.
pub fn register_builtin_elements(registry: &ElementRegistry) -> Result<usize> {
    let defined = [
        registry.define::<Button>()?,
        registry.define::<Navbar>()?,
        registry.define::<Hero>()?,
        registry.define::<Article>()?,
        registry.define::<Form>()?,
        registry.define::<Footer>()?,
        registry.define::<Card>()?,
        registry.define::<Modal>()?,
        registry.define::<Accordion>()?,
        registry.define::<Input>()?,
    ];
    Ok(defined.into_iter().filter(|newly| *newly).count())
}
