//! Prelude module for Lume.
//!
//! ```ignore
//! use lume::prelude::*;
//! ```
//!
//! This provides access to:
//! - The runtime (`Document`, `Component`, `Widget`, `ElementRegistry`)
//! - Events and notifications (`DomEvent`, `EventKind`, `Notification`)
//! - Every widget and its enumerated attributes
//! - Configuration (`LumeConfig`)

// ============================================================================
// Runtime
// ============================================================================

pub use crate::component::{Component, LifecycleState, Widget};
pub use crate::document::{Document, HandlerCall, Navigation};
pub use crate::registry::{Element, ElementRegistry, register_builtin_elements};
pub use crate::slot::ChildNode;

// ============================================================================
// Events and Notifications
// ============================================================================

pub use crate::notification::{NavItemKind, Notification, NotificationEvent};
pub use lume_core::{DomEvent, EventKind, Signal};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::attributes::LinkTarget;
pub use crate::form::{FieldDescriptor, FieldType, Form, FormKind, FormLayout, SubmissionPhase, SubmitOutcome};
pub use crate::toast::ToastKind;
pub use crate::widgets::{
    Accordion, AccordionPanel, Article, Button, ButtonSize, ButtonVariant, Card, Footer, Hero,
    Input, Modal, NavButton, NavLink, Navbar,
};
pub use lume_style::ThemeMode;

// ============================================================================
// Configuration and Errors
// ============================================================================

pub use crate::config::LumeConfig;
pub use crate::error::{LumeError, Result};
