//! Internal error types for frontpush-reqwest.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for frontpush-reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for frontpush-reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Target address could not be parsed.
    #[error("invalid target address: {0}")]
    Address(#[from] url::ParseError),
    /// HTTP method is empty or contains invalid characters.
    #[error("invalid HTTP method '{0}'")]
    Method(String),
    /// Header name could not be used in a request.
    #[error("invalid header name '{name}'")]
    HeaderName {
        name: String,
        #[source]
        source: reqwest::header::InvalidHeaderName,
    },
    /// Header value could not be used in a request.
    #[error("invalid value for header '{name}'")]
    HeaderValue {
        name: String,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    /// Request could not be built.
    #[error("request build failed: {0}")]
    Build(#[source] reqwest::Error),
    /// Request could not be sent.
    #[error("HTTP error: {0}")]
    Send(#[source] reqwest::Error),
    /// Response body could not be read.
    #[error("response read failed: {0}")]
    Read(#[source] reqwest::Error),
    /// Deadline elapsed before the call completed.
    #[error("deadline of {}ms exceeded", .0.as_millis())]
    Deadline(Duration),
}

impl From<Error> for frontpush_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Address(e) => frontpush_core::Error::address_unparseable().with_source(e),
            e @ (Error::Method(_) | Error::HeaderName { .. } | Error::HeaderValue { .. }) => {
                frontpush_core::Error::invalid_request().with_source(e)
            }
            Error::Build(e) => frontpush_core::Error::invalid_request().with_source(e),
            Error::Send(e) => {
                if e.is_timeout() {
                    frontpush_core::Error::timeout().with_source(e)
                } else if e.is_builder() {
                    frontpush_core::Error::invalid_request().with_source(e)
                } else {
                    frontpush_core::Error::send_failed().with_source(e)
                }
            }
            Error::Read(e) => {
                if e.is_timeout() {
                    frontpush_core::Error::timeout().with_source(e)
                } else {
                    frontpush_core::Error::read_failed().with_source(e)
                }
            }
            e @ Error::Deadline(_) => frontpush_core::Error::timeout().with_source(e),
        }
    }
}
