//! Push service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;

use crate::{Pusher, Result, TRACING_TARGET};

/// Push service wrapper with observability.
///
/// This wrapper adds structured logging to any [`Pusher`] implementation.
/// The inner pusher is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct PushService {
    inner: Arc<dyn Pusher>,
}

impl fmt::Debug for PushService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushService").finish_non_exhaustive()
    }
}

impl PushService {
    /// Create a new push service wrapper.
    pub fn new<P>(pusher: P) -> Self
    where
        P: Pusher + 'static,
    {
        Self {
            inner: Arc::new(pusher),
        }
    }

    /// Create a push service from an already shared pusher.
    pub fn from_arc(pusher: Arc<dyn Pusher>) -> Self {
        Self { inner: pusher }
    }

    /// Pushes a payload through the inner pusher.
    pub async fn push(&self, payload: Bytes) -> Result<Bytes> {
        let started_at = Instant::now();
        let payload_len = payload.len();

        let result = self.inner.push(payload).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(body) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    payload_bytes = payload_len,
                    response_bytes = body.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Payload pushed successfully"
                );
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    kind = error.kind_str(),
                    status_code = ?error.status_code,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Push failed"
                );
            }
        }

        result
    }
}

#[async_trait::async_trait]
impl Pusher for PushService {
    async fn push(&self, payload: Bytes) -> Result<Bytes> {
        PushService::push(self, payload).await
    }
}
