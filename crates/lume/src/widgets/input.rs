//! `<lume-input>`: a labelled text field with inline error display.

use std::fmt::{self, Write as _};

use lume_core::{EventKind, Listener};

use crate::attributes::{AttributeStore, attribute_enum};
use crate::component::{BindContext, Component, Widget};
use crate::notification::Notification;
use crate::render::{RenderContext, esc};
use crate::slot::ChildNode;

/// Error shown when a required input loses focus while empty.
pub const REQUIRED_MESSAGE: &str = "This field is required";

attribute_enum! {
    /// Control type.
    pub enum InputType {
        /// Single-line text.
        Text = "text",
        /// Email address.
        Email = "email",
        /// Masked text.
        Password = "password",
        /// Numeric.
        Number = "number",
        /// Telephone number.
        Tel = "tel",
        /// URL.
        Url = "url",
        /// Search box.
        Search = "search",
        /// Multi-line text.
        Textarea = "textarea",
    }
    default Text
}

/// Typed attributes of an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputConfig {
    /// Label text without the required marker.
    pub label: Option<String>,
    /// Control type.
    pub input_type: InputType,
    /// Placeholder.
    pub placeholder: String,
    /// Current value.
    pub value: String,
    /// Field name.
    pub name: Option<String>,
    /// Error message; empty when valid.
    pub error: String,
    /// Whether a value is required.
    pub required: bool,
}

impl InputConfig {
    /// Label as displayed, with ` *` appended when required.
    pub fn label_text(&self) -> Option<String> {
        self.label.as_ref().map(|label| {
            if self.required {
                format!("{label} *")
            } else {
                label.clone()
            }
        })
    }
}

/// `<lume-input>`.
#[derive(Debug, Default)]
pub struct Input;

impl Widget for Input {
    const TAG: &'static str = "lume-input";
    const ID_PREFIX: &'static str = "lume-input-";
    const OBSERVED: &'static [&'static str] =
        &["label", "type", "placeholder", "value", "name", "error", "required"];

    type Config = InputConfig;

    fn configure(&self, attrs: &AttributeStore, _children: &[ChildNode]) -> InputConfig {
        InputConfig {
            label: attrs.get_opt("label"),
            input_type: attrs.get_enum("type"),
            placeholder: attrs.get("placeholder").unwrap_or_default().to_string(),
            value: attrs.get("value").unwrap_or_default().to_string(),
            name: attrs.get_opt("name"),
            error: attrs.get("error").unwrap_or_default().to_string(),
            required: attrs.has("required"),
        }
    }

    fn render(&self, config: &InputConfig, ctx: &mut RenderContext<'_>) -> fmt::Result {
        ctx.sheet().base(
            "& .field { display: flex; flex-direction: column; }\n\
             & label { font-size: 0.9rem; font-weight: 600; color: #e5e7eb; margin-bottom: 0.35rem; }\n\
             & input, & textarea { width: 100%; padding: 0.6rem 0.75rem; border-radius: 8px; border: 1px solid #374151; background: #1f2937; color: #e5e7eb; font-size: 1rem; box-sizing: border-box; }\n\
             & input:focus, & textarea:focus { outline: none; border-color: #3b82f6; }\n\
             & textarea { min-height: 100px; resize: vertical; }\n\
             & .error { margin-top: 0.4rem; color: #ef4444; font-size: 0.85rem; min-height: 1rem; }\n\
             & .invalid { border-color: #ef4444; }",
        );

        let control_id = format!("{}-control", ctx.id());
        ctx.push("<div class=\"field\">");
        if let Some(label) = config.label_text() {
            write!(ctx, "<label for=\"{control_id}\" part=\"label\">{}</label>", esc(&label))?;
        }

        let invalid = if config.error.is_empty() { "" } else { " class=\"invalid\" aria-invalid=\"true\"" };
        let name = config
            .name
            .as_deref()
            .map(|name| format!(" name=\"{}\"", esc(name)))
            .unwrap_or_default();
        let required = if config.required { " required" } else { "" };
        let node = ctx.node("control");
        if config.input_type == InputType::Textarea {
            write!(
                ctx,
                "<textarea id=\"{control_id}\" part=\"control\" placeholder=\"{}\"{name}{required}{invalid}{node}>{}</textarea>",
                esc(&config.placeholder),
                esc(&config.value)
            )?;
        } else {
            write!(
                ctx,
                "<input id=\"{control_id}\" part=\"control\" type=\"{}\" placeholder=\"{}\" value=\"{}\"{name}{required}{invalid}{node}>",
                config.input_type,
                esc(&config.placeholder),
                esc(&config.value)
            )?;
        }
        write!(
            ctx,
            "<div class=\"error\" part=\"error\" role=\"alert\">{}</div></div>",
            esc(&config.error)
        )
    }

    fn listeners(&self, cx: &BindContext<'_, Self>) -> Vec<Listener> {
        let mut listeners = cx.on("control", EventKind::Input, |input, _, event| {
            input.input_value(event.value().unwrap_or_default());
        });
        listeners.extend(cx.on("control", EventKind::Blur, |input, _, _| {
            input.check_required();
        }));
        listeners
    }
}

impl Component<Input> {
    /// Current value.
    pub fn value(&self) -> String {
        self.attribute("value").unwrap_or_default()
    }

    /// Set the value without emitting a change.
    pub fn set_value(&self, value: impl Into<String>) {
        self.set_attribute("value", value);
    }

    /// Current error message, empty when valid.
    pub fn error(&self) -> String {
        self.attribute("error").unwrap_or_default()
    }

    /// Show `message`, or clear the error when empty.
    pub fn set_error(&self, message: &str) {
        if message.is_empty() {
            self.remove_attribute("error");
        } else {
            self.set_attribute("error", message);
        }
    }

    /// Apply a user edit: store the value, clear the error and emit
    /// [`Notification::InputChange`].
    pub fn input_value(&self, value: &str) {
        self.set_attribute("value", value);
        self.remove_attribute("error");
        self.emit(Notification::InputChange {
            name: self.attribute("name").filter(|name| !name.is_empty()),
            value: value.to_string(),
        });
    }

    /// Focus-loss check: a required input with a blank value gets
    /// [`REQUIRED_MESSAGE`]; anything else clears the error.
    pub fn check_required(&self) -> bool {
        let missing = self.has_attribute("required") && self.value().trim().is_empty();
        self.set_error(if missing { REQUIRED_MESSAGE } else { "" });
        !missing
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lume_core::DomEvent;
    use parking_lot::Mutex;

    use super::*;
    use crate::Document;

    #[test]
    fn test_required_label_and_textarea() {
        let doc = Document::new();
        let input = Component::<Input>::create(&doc)
            .with_attribute("label", "Bio")
            .with_attribute("type", "textarea")
            .with_attribute("required", "")
            .with_attribute("value", "<hi>");
        input.mount().unwrap();
        let output = input.output();
        assert!(output.markup().contains("Bio *</label>"));
        assert!(output.markup().contains("&lt;hi&gt;</textarea>"));
    }

    #[test]
    fn test_blur_validates_required() {
        let doc = Document::new();
        let input = Component::<Input>::create(&doc).with_attribute("required", "");
        input.mount().unwrap();

        input.dispatch("control", &DomEvent::new(EventKind::Blur));
        assert_eq!(input.error(), REQUIRED_MESSAGE);
        assert!(input.output().markup().contains("class=\"invalid\""));

        input.dispatch("control", &DomEvent::input("x"));
        assert_eq!(input.error(), "");
        input.dispatch("control", &DomEvent::new(EventKind::Blur));
        assert_eq!(input.error(), "");
    }

    #[test]
    fn test_input_emits_change() {
        let doc = Document::new();
        let input = Component::<Input>::create(&doc).with_attribute("name", "email");
        input.mount().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        input.notifications().connect(move |n| seen_clone.lock().push(n.clone()));

        input.dispatch("control", &DomEvent::input("a@b.c"));
        assert_eq!(input.value(), "a@b.c");
        assert_eq!(
            *seen.lock(),
            vec![Notification::InputChange { name: Some("email".into()), value: "a@b.c".into() }]
        );
    }
}
