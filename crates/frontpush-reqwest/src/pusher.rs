//! HTTP pusher implementation using reqwest.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use frontpush_core::{LatencyObserver, PushLabels, PushService, Pusher};
use reqwest::header::HeaderMap;
use reqwest::{Body, Client, Method, Request};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;
use url::Url;

use crate::config::HttpPusherConfig;
use crate::error::{Error, Result};
use crate::headers::apply_headers;

/// Tracing target for HTTP pusher operations.
pub const TRACING_TARGET: &str = "frontpush_reqwest::pusher";

/// Status label recorded when no response was received.
const LOCAL_FAILURE_STATUS: u16 = 500;

/// Inner state shared by every clone of a pusher.
struct HttpPusherInner {
    http: Client,
    config: HttpPusherConfig,
    url: Url,
    method: Method,
    headers: HeaderMap,
    observer: Option<Arc<dyn LatencyObserver>>,
}

/// HTTP pusher delivering payloads to a single configured endpoint.
///
/// The transport client is created once, in [`HttpPusher::new`], and shared by
/// all clones, so concurrent pushes reuse its connection pool.
///
/// # Examples
///
/// ```rust,ignore
/// use frontpush_core::Pusher;
/// use frontpush_reqwest::{HttpPusher, HttpPusherConfig};
///
/// let config = HttpPusherConfig::new("https://example.com/cards").with_method("POST");
/// let pusher = HttpPusher::new(config)?;
/// let body = pusher.push(bytes::Bytes::from_static(b"hello")).await?;
/// ```
#[derive(Clone)]
pub struct HttpPusher {
    inner: Arc<HttpPusherInner>,
}

impl fmt::Debug for HttpPusher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpPusher")
            .field("config", &self.inner.config)
            .field("observer", &self.inner.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpPusher {
    /// Creates a new pusher without a latency observer.
    ///
    /// # Errors
    ///
    /// Fails if the target address cannot be parsed, the method or a header
    /// is invalid, or the HTTP client cannot be created.
    pub fn new(config: HttpPusherConfig) -> frontpush_core::Result<Self> {
        Self::with_observer(config, None)
    }

    /// Creates a new pusher reporting call latency to `observer`.
    ///
    /// # Errors
    ///
    /// See [`HttpPusher::new`].
    pub fn with_observer(
        config: HttpPusherConfig,
        observer: Option<Arc<dyn LatencyObserver>>,
    ) -> frontpush_core::Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET,
            url = %config.url,
            method = %config.method,
            timeout_ms = config.timeout_ms,
            "Creating HTTP pusher"
        );

        let inner = Self::build_inner(config, observer).map_err(|(config, err)| {
            tracing::error!(
                target: TRACING_TARGET,
                url = %config.url,
                method = %config.method,
                error = %err,
                "HTTP pusher configuration rejected"
            );
            frontpush_core::Error::from(err).with_message(format!(
                "{} {} is not a usable push target",
                config.method, config.url
            ))
        })?;

        tracing::info!(
            target: TRACING_TARGET,
            url = %inner.url,
            "HTTP pusher created successfully"
        );

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    fn build_inner(
        config: HttpPusherConfig,
        observer: Option<Arc<dyn LatencyObserver>>,
    ) -> std::result::Result<HttpPusherInner, (HttpPusherConfig, Error)> {
        let url = match Url::parse(&config.url) {
            Ok(url) => url,
            Err(e) => return Err((config, Error::Address(e))),
        };

        let method = match Method::from_bytes(config.method.as_bytes()) {
            Ok(method) => method,
            Err(_) => {
                let method = config.method.clone();
                return Err((config, Error::Method(method)));
            }
        };

        let headers = match config.headers.to_header_map() {
            Ok(headers) => headers,
            Err(e) => return Err((config, e)),
        };

        let http = match Client::builder()
            .user_agent(config.effective_user_agent())
            .build()
        {
            Ok(http) => http,
            Err(e) => return Err((config, Error::Build(e))),
        };

        Ok(HttpPusherInner {
            http,
            config,
            url,
            method,
            headers,
            observer,
        })
    }

    /// Gets the pusher configuration.
    pub fn config(&self) -> &HttpPusherConfig {
        &self.inner.config
    }

    /// Gets the parsed target address.
    pub fn url(&self) -> &Url {
        &self.inner.url
    }

    /// Converts this pusher into a [`PushService`] for use with dependency injection.
    pub fn into_service(self) -> PushService {
        PushService::new(self)
    }

    /// Pushes the contents of `reader` as a streamed request body.
    ///
    /// Behaves exactly like [`Pusher::push`] otherwise.
    pub async fn push_reader<R>(&self, reader: R) -> frontpush_core::Result<Bytes>
    where
        R: AsyncRead + Send + Sync + 'static,
    {
        self.execute(Body::wrap_stream(ReaderStream::new(reader)))
            .await
    }

    /// Runs one call and records its latency, whatever the outcome.
    async fn execute(&self, body: Body) -> frontpush_core::Result<Bytes> {
        let started_at = Instant::now();

        let result = self.dispatch(body).await;

        let status = match &result {
            Ok((status, _)) => *status,
            Err(err) => err.status_code.unwrap_or(LOCAL_FAILURE_STATUS),
        };
        self.observe(status, started_at);

        result.map(|(_, body)| body)
    }

    async fn dispatch(&self, body: Body) -> frontpush_core::Result<(u16, Bytes)> {
        let inner = &self.inner;

        let request = self
            .build_request(body)
            .map_err(|err| self.fail(err, "new request failed"))?;

        let timeout = inner.config.timeout();
        let deadline = tokio::time::Instant::now() + timeout;

        // The deadline covers both the send and the full body read; dropping
        // the timed future on return releases the timer and the connection.
        let (status, body) = match tokio::time::timeout_at(deadline, self.send(request)).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                let context = match &err {
                    Error::Read(_) => "read response failed",
                    _ => "request failed",
                };
                return Err(self.fail(err, context));
            }
            Err(_) => return Err(self.fail(Error::Deadline(timeout), "request failed")),
        };

        if status >= 300 {
            tracing::error!(
                target: TRACING_TARGET,
                method = %inner.method,
                url = %inner.url,
                status_code = status,
                body = %String::from_utf8_lossy(&body),
                "Push rejected by remote endpoint"
            );

            return Err(frontpush_core::Error::remote_rejected(status).with_message(format!(
                "{} {} returned status-code {}",
                inner.method, inner.config.url, status
            )));
        }

        tracing::debug!(
            target: TRACING_TARGET,
            method = %inner.method,
            url = %inner.url,
            status_code = status,
            response_bytes = body.len(),
            "Push completed"
        );

        Ok((status, body))
    }

    fn build_request(&self, body: Body) -> Result<Request> {
        let inner = &self.inner;

        let mut builder = inner
            .http
            .request(inner.method.clone(), inner.url.clone())
            .body(body);

        if let Some((username, password)) = inner.config.credentials() {
            builder = builder.basic_auth(username, Some(password));
        }

        let mut request = builder.build().map_err(Error::Build)?;
        apply_headers(request.headers_mut(), &inner.headers);

        Ok(request)
    }

    async fn send(&self, request: Request) -> Result<(u16, Bytes)> {
        let response = self.inner.http.execute(request).await.map_err(Error::Send)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(Error::Read)?;
        Ok((status, body))
    }

    /// Logs a local failure and converts it into the public error type.
    fn fail(&self, err: Error, context: &str) -> frontpush_core::Error {
        let inner = &self.inner;

        tracing::error!(
            target: TRACING_TARGET,
            method = %inner.method,
            url = %inner.url,
            stage = context,
            error = %err,
            "Push failed"
        );

        frontpush_core::Error::from(err).with_message(format!(
            "{} {} {}",
            inner.method, inner.config.url, context
        ))
    }

    fn observe(&self, status: u16, started_at: Instant) {
        let Some(observer) = &self.inner.observer else {
            return;
        };

        let elapsed_ms = u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        let labels = PushLabels {
            route: self.inner.url.path(),
            method: self.inner.method.as_str(),
            status,
        };
        observer.observe(labels, elapsed_ms);
    }
}

#[async_trait::async_trait]
impl Pusher for HttpPusher {
    async fn push(&self, payload: Bytes) -> frontpush_core::Result<Bytes> {
        self.execute(Body::from(payload)).await
    }
}
