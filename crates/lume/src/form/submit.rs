//! Submission transport and outcome types.

use futures_util::future::BoxFuture;
use lume_net::{FormSubmission, HttpClient, NetworkError, SubmissionReceipt};

/// Delivers a validated form to its `action`.
///
/// [`HttpClient`] implements this; tests can substitute their own transport
/// through [`Document::set_transport`](crate::Document::set_transport).
pub trait SubmitTransport: Send + Sync {
    /// Send the submission. A rejected status must be reported as `Err`.
    fn submit(&self, submission: FormSubmission) -> BoxFuture<'static, Result<SubmissionReceipt, NetworkError>>;
}

impl SubmitTransport for HttpClient {
    fn submit(&self, submission: FormSubmission) -> BoxFuture<'static, Result<SubmissionReceipt, NetworkError>> {
        let client = self.clone();
        Box::pin(async move { submission.send(&client).await })
    }
}

/// Where a form is in its submission cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SubmissionPhase {
    /// Waiting for input.
    #[default]
    Idle,
    /// Checking field values.
    Validating,
    /// Validation failed.
    Invalid,
    /// Waiting for the transport.
    Submitting,
    /// Delivered successfully.
    Submitted,
    /// Delivery failed.
    Failed,
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Delivered (or no `action` was configured).
    Submitted,
    /// Validation failed; nothing was sent.
    Invalid(crate::form::ValidationState),
    /// The transport failed; values were kept.
    Failed(String),
    /// Another submission of this form was still in flight.
    AlreadySubmitting,
}

impl SubmitOutcome {
    /// Whether the form was delivered.
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

/// Kind of banner shown under a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Submission succeeded.
    Success,
    /// Validation or submission failed.
    Error,
}

impl MessageKind {
    pub(crate) fn class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A banner message shown under a form until it is dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    /// Success or error.
    pub kind: MessageKind,
    /// Message text.
    pub text: String,
}
