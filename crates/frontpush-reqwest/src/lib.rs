//! Reqwest-based HTTP pusher for frontpush.
//!
//! This crate provides [`HttpPusher`], the reqwest-based implementation of the
//! [`Pusher`](frontpush_core::Pusher) trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use frontpush_core::{MetricsHistogram, PushService};
//! use frontpush_reqwest::{HttpPusher, HttpPusherConfig};
//!
//! let config = HttpPusherConfig::new("https://example.com/cards")
//!     .with_basic_auth("user", "secret")
//!     .with_header("Content-Type", "application/json");
//!
//! // Report per-call latency through the `metrics` facade
//! let pusher = HttpPusher::with_observer(config, Some(Arc::new(MetricsHistogram::default())))?;
//!
//! // Convert to a service for dependency injection
//! let service: PushService = pusher.into_service();
//! let body = service.push(payload).await?;
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod error;
mod headers;
mod pusher;

pub use crate::config::{DEFAULT_METHOD, DEFAULT_TIMEOUT_MS, HttpPusherConfig};
pub use crate::headers::{HeaderValues, PushHeaders};
pub use crate::pusher::{HttpPusher, TRACING_TARGET};
