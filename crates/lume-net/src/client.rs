//! The shared HTTP client.

use std::sync::Arc;
use std::time::Duration;

use lume_core::logging::targets;
use reqwest::redirect::Policy;

use crate::error::Result;

/// Settings the client was built with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientSettings {
    /// Whole-request timeout; `None` waits forever.
    pub timeout: Option<Duration>,
    /// Connect timeout.
    pub connect_timeout: Option<Duration>,
    /// Redirects followed before giving up. `0` disables redirects.
    pub max_redirects: usize,
    /// Whether cookies set by one submission are sent with the next.
    pub cookies: bool,
    /// User agent header.
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(10)),
            max_redirects: 10,
            cookies: true,
            user_agent: format!("lume/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    settings: ClientSettings,
}

impl HttpClientBuilder {
    /// A builder with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = Some(timeout);
        self
    }

    /// Wait for responses without a deadline.
    pub fn no_timeout(mut self) -> Self {
        self.settings.timeout = None;
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.settings.connect_timeout = Some(timeout);
        self
    }

    /// Follow at most `max` redirects.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.settings.max_redirects = max;
        self
    }

    /// Do not keep cookies between submissions.
    pub fn no_cookies(mut self) -> Self {
        self.settings.cookies = false;
        self
    }

    /// Override the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.settings.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<HttpClient> {
        let settings = self.settings;
        let mut builder = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .cookie_store(settings.cookies)
            .redirect(match settings.max_redirects {
                0 => Policy::none(),
                max => Policy::limited(max),
            });
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build()?;
        tracing::debug!(target: targets::NET, timeout = ?settings.timeout, redirects = settings.max_redirects, "http client built");
        Ok(HttpClient {
            inner: Arc::new(ClientInner { client, settings }),
        })
    }
}

#[derive(Debug)]
struct ClientInner {
    client: reqwest::Client,
    settings: ClientSettings,
}

/// HTTP client used to deliver form submissions.
///
/// Clones share one connection pool and cookie store.
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: Arc<ClientInner>,
}

impl HttpClient {
    /// A client with the default settings.
    pub fn new() -> Result<Self> {
        HttpClientBuilder::new().build()
    }

    /// Start configuring a client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// The settings this client was built with.
    pub fn settings(&self) -> &ClientSettings {
        &self.inner.settings
    }

    pub(crate) fn reqwest(&self) -> &reqwest::Client {
        &self.inner.client
    }
}
