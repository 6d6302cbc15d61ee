#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod observer;
mod service;

use bytes::Bytes;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::observer::{DEFAULT_HISTOGRAM_NAME, LatencyObserver, MetricsHistogram, PushLabels};
pub use crate::service::PushService;

/// Tracing target for push service operations.
pub const TRACING_TARGET: &str = "frontpush_core::service";

/// Core trait for pushing a payload to a remote endpoint.
///
/// Implement this trait to provide an alternative transport. Every call is
/// independent: one payload goes out, and the fully buffered response body
/// comes back.
#[async_trait::async_trait]
pub trait Pusher: Send + Sync {
    /// Pushes `payload` to the configured destination and returns the response body.
    async fn push(&self, payload: Bytes) -> Result<Bytes>;
}
