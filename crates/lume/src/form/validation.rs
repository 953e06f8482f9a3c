//! Field validation.
//!
//! Each field is checked in a fixed order and reports only its first failure:
//!
//! 1. required presence
//! 2. `minlength`
//! 3. `maxlength`
//! 4. type format (email, number, url)
//! 5. `min`
//! 6. `max`
//! 7. `pattern` (must match the whole value)
//!
//! A field that passes all of these and confirms another field (see
//! [`FieldDescriptor::confirm_target`]) must then equal it.
//!
//! Empty optional fields skip every check except the confirm rule. Messages
//! follow the wording browsers use for constraint validation.

use std::collections::HashMap;
use std::sync::OnceLock;

use lume_core::logging::targets;
use regex::Regex;

use super::field::{FieldDescriptor, FieldType};

/// Message for a mismatched password confirmation.
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
/// Message for any other mismatched confirmation.
pub const VALUES_DO_NOT_MATCH: &str = "Values do not match";

/// Per-field error messages of the last validation pass, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationState {
    errors: Vec<(String, String)>,
}

impl ValidationState {
    /// No errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every field passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The message for `field`, if it failed.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    /// All failures in field order.
    pub fn errors(&self) -> &[(String, String)] {
        &self.errors
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether there are no failures.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a failure, replacing any earlier message for the same field.
    pub fn set(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.errors.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = message,
            None => self.errors.push((field, message)),
        }
    }

    /// Clear the message for one field. Returns whether there was one.
    pub fn clear_field(&mut self, field: &str) -> bool {
        let before = self.errors.len();
        self.errors.retain(|(name, _)| name != field);
        before != self.errors.len()
    }

    /// Clear every message.
    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

/// Validate every field against `values` (missing values count as empty).
pub fn validate(fields: &[FieldDescriptor], values: &HashMap<String, String>) -> ValidationState {
    let mut state = ValidationState::new();
    let value_of = |name: &str| values.get(name).map(String::as_str).unwrap_or("");

    for field in fields {
        let value = value_of(&field.name);
        if let Some(message) = validate_field(field, value) {
            state.set(&field.name, message);
            continue;
        }
        if let Some(target) = field.confirm_target() {
            let Some(other) = fields.iter().find(|f| f.name == target) else {
                tracing::warn!(target: targets::FORM, field = %field.name, confirms = target, "confirm target does not exist");
                continue;
            };
            if value != value_of(&other.name) {
                let message = if other.kind == FieldType::Password {
                    PASSWORDS_DO_NOT_MATCH
                } else {
                    VALUES_DO_NOT_MATCH
                };
                state.set(&field.name, message);
            }
        }
    }

    tracing::debug!(target: targets::FORM, fields = fields.len(), failures = state.len(), "validated");
    state
}

/// The first constraint `value` violates, if any. Does not apply the confirm rule.
pub fn validate_field(field: &FieldDescriptor, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        if !field.required {
            return None;
        }
        return Some(
            match field.kind {
                FieldType::Checkbox => "Please check this box.",
                FieldType::Select => "Please select an item in the list.",
                _ => "Please fill out this field.",
            }
            .to_string(),
        );
    }

    let length = value.chars().count();
    if let Some(min) = field.minlength
        && length < min
    {
        return Some(format!(
            "Please lengthen this text to {min} characters or more (you are currently using {length} characters)."
        ));
    }
    if let Some(max) = field.maxlength
        && length > max
    {
        return Some(format!(
            "Please shorten this text to {max} characters or less (you are currently using {length} characters)."
        ));
    }

    let number = match field.kind {
        FieldType::Email if !is_email(trimmed) => {
            return Some("Please enter an email address.".to_string());
        }
        FieldType::Url if url::Url::parse(trimmed).is_err() => {
            return Some("Please enter a URL.".to_string());
        }
        FieldType::Number => match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => Some(number),
            _ => return Some("Please enter a number.".to_string()),
        },
        _ => None,
    };

    if let Some(number) = number {
        if let Some(min) = field.min
            && number < min
        {
            return Some(format!("Value must be greater than or equal to {min}."));
        }
        if let Some(max) = field.max
            && number > max
        {
            return Some(format!("Value must be less than or equal to {max}."));
        }
    }

    if let Some(pattern) = field.pattern.as_deref() {
        match Regex::new(&format!("^(?:{pattern})$")) {
            Ok(regex) if !regex.is_match(value) => {
                return Some("Please match the requested format.".to_string());
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(target: targets::FORM, field = %field.name, error = %e, "invalid pattern ignored");
            }
        }
    }

    None
}

fn is_email(value: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$").ok()
    });
    match regex {
        Some(regex) => regex.is_match(value),
        None => value.split_once('@').is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_required_field_reports_first_failure_only() {
        let field = FieldDescriptor {
            minlength: Some(3),
            ..FieldDescriptor::new("Name", FieldType::Text, "name").required()
        };
        assert_eq!(
            validate_field(&field, "  ").as_deref(),
            Some("Please fill out this field.")
        );
        assert!(validate_field(&field, "Al").unwrap().starts_with("Please lengthen"));
        assert_eq!(validate_field(&field, "Ada"), None);
    }

    #[test]
    fn test_optional_empty_field_passes() {
        let field = FieldDescriptor::new("Website", FieldType::Url, "site");
        assert_eq!(validate_field(&field, ""), None);
        assert_eq!(
            validate_field(&field, "not a url").as_deref(),
            Some("Please enter a URL.")
        );
    }

    #[test]
    fn test_email_and_number_formats() {
        let email = FieldDescriptor::new("Email", FieldType::Email, "email");
        assert!(validate_field(&email, "ada@example.com").is_none());
        assert!(validate_field(&email, "ada@").is_some());

        let age = FieldDescriptor {
            min: Some(18.0),
            max: Some(130.0),
            ..FieldDescriptor::new("Age", FieldType::Number, "age")
        };
        assert_eq!(validate_field(&age, "abc").as_deref(), Some("Please enter a number."));
        assert_eq!(
            validate_field(&age, "12").as_deref(),
            Some("Value must be greater than or equal to 18.")
        );
        assert_eq!(
            validate_field(&age, "200").as_deref(),
            Some("Value must be less than or equal to 130.")
        );
        assert!(validate_field(&age, "42").is_none());
    }

    #[test]
    fn test_pattern_is_anchored() {
        let zip = FieldDescriptor {
            pattern: Some("[0-9]{5}".into()),
            ..FieldDescriptor::new("ZIP", FieldType::Text, "zip")
        };
        assert!(validate_field(&zip, "12345").is_none());
        assert!(validate_field(&zip, "123456").is_some());

        let broken = FieldDescriptor {
            pattern: Some("([".into()),
            ..FieldDescriptor::new("X", FieldType::Text, "x")
        };
        assert!(validate_field(&broken, "anything").is_none());
    }

    #[test]
    fn test_confirm_mismatch_is_reported_on_confirm_field() {
        let fields = vec![
            FieldDescriptor::new("Password", FieldType::Password, "password").required(),
            FieldDescriptor::new("Confirm", FieldType::Password, "confirm_password").required(),
        ];
        let state = validate(&fields, &values(&[("password", "a"), ("confirm_password", "b")]));
        assert_eq!(state.len(), 1);
        assert_eq!(state.error("confirm_password"), Some(PASSWORDS_DO_NOT_MATCH));

        let state = validate(&fields, &values(&[("password", "a"), ("confirm_password", "a")]));
        assert!(state.is_valid());
    }

    #[test]
    fn test_confirm_mismatch_independent_of_other_failures() {
        let fields = vec![
            FieldDescriptor::new("Email", FieldType::Email, "email").required(),
            FieldDescriptor::new("Repeat", FieldType::Email, "confirm_email"),
        ];
        let state = validate(&fields, &values(&[("email", "bad"), ("confirm_email", "other@example.com")]));
        assert_eq!(state.error("email"), Some("Please enter an email address."));
        assert_eq!(state.error("confirm_email"), Some(VALUES_DO_NOT_MATCH));
    }

    #[test]
    fn test_state_set_replaces() {
        let mut state = ValidationState::new();
        state.set("a", "one");
        state.set("a", "two");
        assert_eq!(state.errors(), &[("a".to_string(), "two".to_string())]);
        assert!(state.clear_field("a"));
        assert!(!state.clear_field("a"));
    }
}
