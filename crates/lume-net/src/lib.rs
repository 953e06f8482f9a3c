//! HTTP transport for Lume forms.
//!
//! - **Client**: a shared `reqwest` client with timeouts, redirect and cookie
//!   settings ([`HttpClient`])
//! - **Form submission**: ordered field encoding for `GET` and body methods
//!   ([`FormSubmission`])
//!
//! # Example
//!
//! ```ignore
//! use lume_net::{FormSubmission, HttpClient, HttpMethod};
//!
//! let client = HttpClient::builder()
//!     .timeout(std::time::Duration::from_secs(15))
//!     .build()?;
//!
//! FormSubmission::new("https://example.com/login", HttpMethod::Post)
//!     .field("email", "ada@example.com")
//!     .field("password", "hunter22")
//!     .send(&client)
//!     .await?;
//! ```

mod client;
mod error;
pub mod form;
mod method;

pub use client::{ClientSettings, HttpClient, HttpClientBuilder};
pub use error::{NetworkError, Result};
pub use form::{FormSubmission, SubmissionReceipt};
pub use method::HttpMethod;
