//! Form submission over HTTP.
//!
//! A [`FormSubmission`] carries the ordered name/value pairs of a validated
//! form to its `action`. `GET` submissions put the fields in the query string;
//! every other method sends them URL-encoded in the body.
//!
//! ```ignore
//! use lume_net::{FormSubmission, HttpClient, HttpMethod};
//!
//! let client = HttpClient::new()?;
//! let receipt = FormSubmission::new("https://example.com/contact", HttpMethod::Post)
//!     .field("name", "Ada")
//!     .field("message", "Hello")
//!     .send(&client)
//!     .await?;
//! assert!(receipt.is_success());
//! ```

use lume_core::logging::targets;
use url::Url;

use crate::client::HttpClient;
use crate::error::{NetworkError, Result};
use crate::method::HttpMethod;

/// Bodies longer than this are cut when kept in a [`NetworkError::Rejected`].
const MAX_ERROR_BODY: usize = 512;

/// The outcome of a submission the server accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// HTTP status returned by the server.
    pub status: u16,
}

impl SubmissionReceipt {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A form's values addressed to its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    /// Target URL, absolute or relative to [`base`](Self::with_base).
    pub action: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Field name/value pairs in render order.
    pub fields: Vec<(String, String)>,
    base: Option<String>,
}

impl FormSubmission {
    /// Create an empty submission.
    pub fn new(action: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            action: action.into(),
            method,
            fields: Vec::new(),
            base: None,
        }
    }

    /// Append one field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Append several fields.
    pub fn fields<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.fields
            .extend(fields.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Resolve relative actions against `base`.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// The absolute URL the submission goes to.
    pub fn resolved_url(&self) -> Result<Url> {
        match Url::parse(&self.action) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = self.base.as_deref().ok_or_else(|| {
                    NetworkError::InvalidAction(format!(
                        "relative action '{}' without a base URL",
                        self.action
                    ))
                })?;
                Ok(Url::parse(base)?.join(&self.action)?)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Build the request `client` would send.
    pub fn to_request(&self, client: &HttpClient) -> Result<reqwest::Request> {
        let url = self.resolved_url()?;
        let builder = client.reqwest().request(self.method.into(), url);
        let builder = if self.method.uses_query() {
            builder.query(&self.fields)
        } else {
            builder.form(&self.fields)
        };
        Ok(builder.build()?)
    }

    /// Send the submission. Non-2xx statuses are returned as
    /// [`NetworkError::Rejected`].
    pub async fn send(&self, client: &HttpClient) -> Result<SubmissionReceipt> {
        let request = self.to_request(client)?;
        tracing::debug!(
            target: targets::NET,
            action = %self.action,
            method = %self.method,
            fields = self.fields.len(),
            "submitting form"
        );
        let response = client.reqwest().execute(request).await?;
        let status = response.status().as_u16();
        if response.status().is_success() {
            return Ok(SubmissionReceipt { status });
        }

        let body = response
            .text()
            .await
            .ok()
            .filter(|body| !body.is_empty())
            .map(|mut body| {
                if body.len() > MAX_ERROR_BODY {
                    let cut = (0..=MAX_ERROR_BODY)
                        .rev()
                        .find(|&i| body.is_char_boundary(i))
                        .unwrap_or(0);
                    body.truncate(cut);
                }
                body
            });
        tracing::warn!(target: targets::NET, action = %self.action, status, "form submission rejected");
        Err(NetworkError::Rejected { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_action_needs_base() {
        let submission = FormSubmission::new("/api/contact", HttpMethod::Post);
        assert!(matches!(
            submission.resolved_url(),
            Err(NetworkError::InvalidAction(_))
        ));

        let submission = submission.with_base("https://example.com/pages/contact.html");
        assert_eq!(
            submission.resolved_url().unwrap().as_str(),
            "https://example.com/api/contact"
        );
    }

    #[test]
    fn test_get_uses_query_string() {
        let client = HttpClient::new().unwrap();
        let request = FormSubmission::new("https://example.com/search", HttpMethod::Get)
            .field("q", "lume widgets")
            .to_request(&client)
            .unwrap();

        assert_eq!(request.method(), http::Method::GET);
        assert_eq!(request.url().query(), Some("q=lume+widgets"));
        assert!(request.body().is_none());
    }

    #[test]
    fn test_post_encodes_body_in_order() {
        let client = HttpClient::new().unwrap();
        let request = FormSubmission::new("https://example.com/contact", HttpMethod::Put)
            .fields([("name", "Ada"), ("email", "ada@example.com")])
            .to_request(&client)
            .unwrap();

        assert_eq!(request.method(), http::Method::PUT);
        assert_eq!(request.url().query(), None);
        let body = request.body().and_then(|body| body.as_bytes()).unwrap();
        assert_eq!(body, b"name=Ada&email=ada%40example.com");
    }
}
