//! The form widget and its validation engine.
//!
//! A form is configured from a preset (`type="login"`, `"register"`,
//! `"contact"`) or from a JSON field list (`type="custom"`). Submitting runs
//! every field through [`validate`]; a valid form emits
//! [`Notification::FormSubmitted`](crate::Notification::FormSubmitted) and, when
//! an `action` is set, hands the values to the document's [`SubmitTransport`].
//!
//! ```text
//! Idle -> Validating -> Invalid ---------------------------> Idle
//!                    -> Submitting -> Submitted | Failed -> Idle
//! ```
//!
//! The terminal phases last until the banner message is dismissed.

mod field;
mod submit;
mod validation;
mod widget;

pub use field::{FieldDescriptor, FieldType, FormKind, SelectOption, resolve_fields};
pub use submit::{FormMessage, MessageKind, SubmissionPhase, SubmitOutcome, SubmitTransport};
pub use validation::{
    PASSWORDS_DO_NOT_MATCH, VALUES_DO_NOT_MATCH, ValidationState, validate, validate_field,
};
pub use widget::{
    DEFAULT_ERROR_MESSAGE, DEFAULT_SUCCESS_MESSAGE, FAILURE_MESSAGE, Form, FormConfig, FormLayout,
};
