//! Configuration for the HTTP pusher.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::headers::PushHeaders;

/// Default timeout for a push call: 30 seconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default HTTP method used for pushing.
pub const DEFAULT_METHOD: &str = "POST";

/// Configuration for [`HttpPusher`](crate::HttpPusher).
///
/// Fixed for the lifetime of the pusher it is handed to.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct HttpPusherConfig {
    /// Target URL payloads are pushed to
    #[cfg_attr(feature = "config", arg(long = "push-url", env = "PUSH_URL"))]
    pub url: String,

    /// HTTP method used for every push
    #[cfg_attr(
        feature = "config",
        arg(long = "push-method", env = "PUSH_METHOD", default_value = DEFAULT_METHOD)
    )]
    #[serde(default = "default_method")]
    pub method: String,

    /// Username for HTTP Basic authentication
    #[cfg_attr(feature = "config", arg(long = "push-username", env = "PUSH_USERNAME"))]
    #[serde(default)]
    pub username: Option<String>,

    /// Password for HTTP Basic authentication
    #[cfg_attr(
        feature = "config",
        arg(long = "push-password", env = "PUSH_PASSWORD", hide_env_values = true)
    )]
    #[serde(default)]
    pub password: Option<String>,

    /// Custom headers applied to every request
    #[cfg_attr(feature = "config", arg(skip))]
    #[serde(default)]
    pub headers: PushHeaders,

    /// Deadline for a single push in milliseconds
    #[cfg_attr(
        feature = "config",
        arg(long = "push-timeout-ms", env = "PUSH_TIMEOUT_MS", default_value = "30000")
    )]
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent header sent unless overridden by a custom header
    #[cfg_attr(
        feature = "config",
        arg(long = "push-user-agent", env = "PUSH_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_method() -> String {
    DEFAULT_METHOD.to_owned()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl fmt::Debug for HttpPusherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpPusherConfig")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("headers", &self.headers)
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpPusherConfig {
    /// Creates a configuration pushing to `url` with default settings.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: default_method(),
            username: None,
            password: None,
            headers: PushHeaders::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: None,
        }
    }

    /// Returns the timeout as a Duration.
    ///
    /// A zero timeout is kept as is: every push fails its deadline immediately.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .filter(|agent| !agent.is_empty())
            .unwrap_or_else(Self::default_user_agent)
    }

    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("frontpush/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Returns the Basic authentication credentials.
    ///
    /// Only present when both username and password are non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|u| !u.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((username, password))
    }

    /// Set the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set the Basic authentication credentials.
    #[must_use]
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Add a header value, appending if the header is already configured.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replace the configured header set.
    #[must_use]
    pub fn with_headers(mut self, headers: PushHeaders) -> Self {
        self.headers = headers;
        self
    }

    /// Set the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
