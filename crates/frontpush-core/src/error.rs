//! Structured error handling for push operations.

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while pushing a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The configured target address could not be parsed.
    AddressUnparseable,
    /// The outbound request could not be constructed.
    InvalidRequest,
    /// The transport failed to deliver the request.
    SendFailed,
    /// The deadline elapsed before the call completed.
    Timeout,
    /// The response body could not be fully consumed.
    ReadFailed,
    /// The remote endpoint answered with a status code of 300 or above.
    RemoteRejected,
}

impl ErrorKind {
    /// Whether this error originates from the network rather than from configuration.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::SendFailed | Self::Timeout | Self::ReadFailed)
    }
}

/// Structured error type carrying the classification and call context.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message, naming method and target where known.
    pub message: Option<String>,
    /// Status code returned by the remote endpoint, if a response arrived.
    pub status_code: Option<u16>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            status_code: None,
            source: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self::new(kind).with_source(source)
    }

    /// Creates a new address unparseable error.
    pub fn address_unparseable() -> Self {
        Self::new(ErrorKind::AddressUnparseable)
    }

    /// Creates a new invalid request error.
    pub fn invalid_request() -> Self {
        Self::new(ErrorKind::InvalidRequest)
    }

    /// Creates a new send failed error.
    pub fn send_failed() -> Self {
        Self::new(ErrorKind::SendFailed)
    }

    /// Creates a new timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// Creates a new read failed error.
    pub fn read_failed() -> Self {
        Self::new(ErrorKind::ReadFailed)
    }

    /// Creates a new remote rejected error for the given status code.
    pub fn remote_rejected(status_code: u16) -> Self {
        Self::new(ErrorKind::RemoteRejected).with_status(status_code)
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Records the status code returned by the remote endpoint.
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Returns the error kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    #[must_use]
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }

    /// Whether a caller-side retry of the same push could succeed.
    ///
    /// Nothing in this workspace retries on its own.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self.kind {
            ErrorKind::SendFailed | ErrorKind::Timeout => true,
            ErrorKind::RemoteRejected => self
                .status_code
                .is_some_and(|code| code >= 500 || code == 408 || code == 429),
            _ => false,
        }
    }
}
