//! Outbound notifications.
//!
//! Widgets report user intent as [`Notification`]s. Each one is emitted on
//! the component's own signal and then bubbles to the document's page-level
//! signal wrapped in a [`NotificationEvent`].

use serde::Serialize;

/// Kind of navbar item that was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavItemKind {
    /// A navigation link.
    Link,
    /// An action button.
    Button,
}

/// A structured notification emitted by a widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Notification {
    /// A button was activated.
    ClickActivate {
        /// Button variant.
        variant: String,
        /// Button size.
        size: String,
        /// Link target, when the button is a link.
        href: Option<String>,
        /// Instance id of the button.
        source: String,
    },
    /// A navbar link or action was activated.
    NavActivate {
        /// Link or button.
        kind: NavItemKind,
        /// Destination, if any.
        href: Option<String>,
        /// Visible text.
        text: String,
    },
    /// The hero's primary call to action was activated.
    HeroPrimaryActivate {
        /// Button text.
        text: String,
    },
    /// The hero's secondary call to action was activated.
    HeroSecondaryActivate {
        /// Button text.
        text: String,
    },
    /// A form passed validation and is being submitted.
    FormSubmitted {
        /// Form preset (`contact`, `login`, ...).
        form_type: String,
        /// Field values in field order.
        values: Vec<(String, String)>,
    },
    /// A footer link was activated.
    FooterLinkActivate {
        /// Destination.
        href: String,
        /// Visible text.
        text: String,
    },
    /// An input's value changed.
    InputChange {
        /// The input's `name`, if set.
        name: Option<String>,
        /// New value.
        value: String,
    },
    /// An accordion panel opened or closed.
    AccordionToggle {
        /// Panel index.
        index: usize,
        /// Whether it is now open.
        open: bool,
    },
    /// A modal opened.
    ModalOpen,
    /// A modal started closing.
    ModalClose,
}

impl Notification {
    /// Event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ClickActivate { .. } => "click-activate",
            Self::NavActivate { .. } => "nav-activate",
            Self::HeroPrimaryActivate { .. } => "hero-primary-activate",
            Self::HeroSecondaryActivate { .. } => "hero-secondary-activate",
            Self::FormSubmitted { .. } => "form-submitted",
            Self::FooterLinkActivate { .. } => "footer-link-activate",
            Self::InputChange { .. } => "input-change",
            Self::AccordionToggle { .. } => "accordion-toggle",
            Self::ModalOpen => "modal-open",
            Self::ModalClose => "modal-close",
        }
    }

    /// The payload as JSON, as a host page would receive it in `detail`.
    pub fn detail(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(object) = value.as_object_mut() {
            object.remove("type");
        }
        value
    }
}

/// A notification as seen on the document-level signal.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEvent {
    /// Instance id of the emitting component.
    pub source: String,
    /// Tag of the emitting component.
    pub tag: &'static str,
    /// The notification.
    pub notification: Notification,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_payload() {
        let notification = Notification::NavActivate {
            kind: NavItemKind::Button,
            href: Some("/signup".into()),
            text: "Get Started".into(),
        };
        assert_eq!(notification.name(), "nav-activate");
        assert_eq!(
            notification.detail(),
            serde_json::json!({ "kind": "button", "href": "/signup", "text": "Get Started" })
        );
    }

    #[test]
    fn test_unit_variant_detail_is_empty() {
        assert_eq!(Notification::ModalOpen.detail(), serde_json::json!({}));
    }
}
