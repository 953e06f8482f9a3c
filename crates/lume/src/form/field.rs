//! Field descriptors and form presets.

use std::collections::HashSet;

use lume_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeStore, attribute_enum};

/// Input type of a form field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text.
    #[default]
    Text,
    /// Email address.
    Email,
    /// Masked password.
    Password,
    /// Number.
    Number,
    /// Telephone number.
    Tel,
    /// Absolute URL.
    Url,
    /// Multi-line text.
    Textarea,
    /// Drop-down list.
    Select,
    /// Checkbox; its value is `"on"` when checked and empty otherwise.
    Checkbox,
}

impl FieldType {
    /// The `type` attribute of the rendered control.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
        }
    }
}

/// An option of a select field: either a bare string or `{ value, label }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectOption {
    /// Value doubles as the label.
    Plain(String),
    /// Separate value and label.
    Labeled {
        /// Submitted value.
        value: String,
        /// Visible label.
        label: String,
    },
}

impl SelectOption {
    /// Submitted value.
    pub fn value(&self) -> &str {
        match self {
            Self::Plain(value) => value,
            Self::Labeled { value, .. } => value,
        }
    }

    /// Visible label.
    pub fn label(&self) -> &str {
        match self {
            Self::Plain(value) => value,
            Self::Labeled { label, .. } => label,
        }
    }
}

/// Description of one form field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDescriptor {
    /// Visible label.
    pub label: String,
    /// Control type.
    #[serde(rename = "type")]
    pub kind: FieldType,
    /// Field name; unique within a form.
    pub name: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Whether a value is required.
    pub required: bool,
    /// Textarea height.
    pub rows: Option<u32>,
    /// Select options.
    pub options: Vec<SelectOption>,
    /// Minimum length in characters.
    pub minlength: Option<usize>,
    /// Maximum length in characters.
    pub maxlength: Option<usize>,
    /// Minimum numeric value.
    pub min: Option<f64>,
    /// Maximum numeric value.
    pub max: Option<f64>,
    /// Regular expression the whole value must match.
    pub pattern: Option<String>,
    /// Initial value.
    pub value: Option<String>,
    /// Name of the field this one must equal.
    pub confirms: Option<String>,
}

impl FieldDescriptor {
    /// A field with a label, type and name.
    pub fn new(label: impl Into<String>, kind: FieldType, name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the placeholder.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set textarea rows.
    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    /// The field this one confirms: the explicit `confirms` value, or `x`
    /// for a field named `confirm_x`.
    pub fn confirm_target(&self) -> Option<&str> {
        self.confirms
            .as_deref()
            .or_else(|| self.name.strip_prefix("confirm_"))
            .filter(|target| !target.is_empty())
    }

    /// The value a fresh form starts with.
    pub fn initial_value(&self) -> String {
        self.value.clone().unwrap_or_default()
    }
}

attribute_enum! {
    /// Form preset.
    pub enum FormKind {
        /// Name, email and message.
        Contact = "contact",
        /// Email and password.
        Login = "login",
        /// Name, email, password and confirmation.
        Register = "register",
        /// Fields from the `fields` attribute.
        Custom = "custom",
    }
    default Contact
}

impl FormKind {
    /// Default panel title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Welcome Back",
            Self::Register => "Create Account",
            Self::Contact => "Get in Touch",
            Self::Custom => "Form",
        }
    }

    /// Default panel description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Login => "Sign in to your account to continue",
            Self::Register => "Join us today and get started",
            Self::Contact => "We'd love to hear from you. Send us a message and we'll respond as soon as possible.",
            Self::Custom => "Please fill out the form below",
        }
    }

    /// Default submit button text.
    pub fn button_text(self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::Register => "Create Account",
            Self::Contact => "Send Message",
            Self::Custom => "Submit",
        }
    }

    /// Built-in fields of this preset. `Custom` has none.
    pub fn preset_fields(self) -> Vec<FieldDescriptor> {
        match self {
            Self::Login => vec![
                FieldDescriptor::new("Email", FieldType::Email, "email")
                    .placeholder("Enter your email")
                    .required(),
                FieldDescriptor::new("Password", FieldType::Password, "password")
                    .placeholder("Enter your password")
                    .required(),
            ],
            Self::Register => vec![
                FieldDescriptor::new("Full Name", FieldType::Text, "name")
                    .placeholder("Enter your full name")
                    .required(),
                FieldDescriptor::new("Email", FieldType::Email, "email")
                    .placeholder("Enter your email")
                    .required(),
                FieldDescriptor::new("Password", FieldType::Password, "password")
                    .placeholder("Create a password")
                    .required(),
                FieldDescriptor::new("Confirm Password", FieldType::Password, "confirm_password")
                    .placeholder("Confirm your password")
                    .required(),
            ],
            Self::Contact => vec![
                FieldDescriptor::new("Name", FieldType::Text, "name")
                    .placeholder("Your name")
                    .required(),
                FieldDescriptor::new("Email", FieldType::Email, "email")
                    .placeholder("your@email.com")
                    .required(),
                FieldDescriptor::new("Message", FieldType::Textarea, "message")
                    .placeholder("Your message...")
                    .rows(4)
                    .required(),
            ],
            Self::Custom => Vec::new(),
        }
    }
}

/// Resolve the field list of a form.
///
/// `custom` forms read the `fields` JSON attribute; malformed or empty JSON
/// falls back to the contact preset. Fields without a name and later
/// duplicates of a name are dropped with a warning.
pub fn resolve_fields(kind: FormKind, attrs: &AttributeStore) -> Vec<FieldDescriptor> {
    let fields = match kind {
        FormKind::Custom => {
            let fields: Vec<FieldDescriptor> = attrs.get_json("fields", Vec::new());
            if fields.is_empty() {
                tracing::warn!(target: targets::FORM, "custom form without usable fields, using the contact preset");
                FormKind::Contact.preset_fields()
            } else {
                fields
            }
        }
        preset => preset.preset_fields(),
    };
    dedupe(fields)
}

fn dedupe(fields: Vec<FieldDescriptor>) -> Vec<FieldDescriptor> {
    let mut seen = HashSet::new();
    fields
        .into_iter()
        .filter(|field| {
            if field.name.trim().is_empty() {
                tracing::warn!(target: targets::FORM, label = %field.label, "field without a name dropped");
                return false;
            }
            if !seen.insert(field.name.clone()) {
                tracing::warn!(target: targets::FORM, name = %field.name, "duplicate field name dropped");
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_fields_parse() {
        let attrs: AttributeStore = [(
            "fields",
            r#"[
                {"label": "Topic", "type": "select", "name": "topic", "required": true,
                 "options": ["Sales", {"value": "support", "label": "Support"}]},
                {"label": "Age", "type": "number", "name": "age", "min": 18}
            ]"#,
        )]
        .into_iter()
        .collect();
        let fields = resolve_fields(FormKind::Custom, &attrs);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].kind, FieldType::Select);
        assert_eq!(fields[0].options[1].value(), "support");
        assert_eq!(fields[0].options[0].label(), "Sales");
        assert_eq!(fields[1].min, Some(18.0));
    }

    #[test]
    fn test_malformed_custom_fields_fall_back_to_contact() {
        let attrs: AttributeStore = [("fields", "[{")].into_iter().collect();
        let names: Vec<_> = resolve_fields(FormKind::Custom, &attrs)
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, ["name", "email", "message"]);
    }

    #[test]
    fn test_duplicate_names_are_dropped() {
        let attrs: AttributeStore = [(
            "fields",
            r#"[{"label":"A","name":"x"},{"label":"B","name":"x"},{"label":"C","name":""}]"#,
        )]
        .into_iter()
        .collect();
        let fields = resolve_fields(FormKind::Custom, &attrs);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].label, "A");
    }

    #[test]
    fn test_confirm_target() {
        let confirm = FieldDescriptor::new("Confirm", FieldType::Password, "confirm_password");
        assert_eq!(confirm.confirm_target(), Some("password"));
        let explicit = FieldDescriptor {
            confirms: Some("email".into()),
            ..FieldDescriptor::new("Repeat email", FieldType::Email, "email_again")
        };
        assert_eq!(explicit.confirm_target(), Some("email"));
        assert_eq!(FieldDescriptor::new("X", FieldType::Text, "x").confirm_target(), None);
    }
}
