//! Error types for REST API operations

use ftx_auth::AuthError;
use ftx_types::ValidationError;

/// Broad failure categories a caller can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A parameter failed a pre-flight guard; nothing was sent
    ValidationFailed,
    /// The exchange could not be reached or answered with a malformed body
    TransportFailure,
    /// The exchange answered with an `{"error": ...}` envelope
    RemoteRejected,
    /// The client itself is misconfigured; nothing was sent
    Configuration,
}

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Request parameter rejected before dispatch
    #[error("Invalid parameter: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body is not JSON
    #[error("Malformed response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// Result did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Exchange rejected the request
    #[error("API error: {message}")]
    Remote {
        /// Error message exactly as returned by the exchange
        message: String,
    },

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Invalid or missing API credentials
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A header name or value could not be represented
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader {
        /// Header name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Request query or body could not be serialized
    #[error("Failed to serialize request: {0}")]
    Serialize(String),
}

impl RestError {
    /// Create a rejection error from an exchange `error` value
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::ValidationFailed,
            Self::Http(_) | Self::Decode(_) | Self::Parse(_) => ErrorKind::TransportFailure,
            Self::Remote { .. } => ErrorKind::RemoteRejected,
            Self::AuthRequired | Self::Auth(_) | Self::InvalidHeader { .. } | Self::Serialize(_) => {
                ErrorKind::Configuration
            }
        }
    }

    /// Check if this error is a pre-flight validation failure
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::ValidationFailed
    }

    /// Check if the exchange could not be reached
    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::TransportFailure
    }

    /// Check if the exchange rejected the request
    pub fn is_remote(&self) -> bool {
        self.kind() == ErrorKind::RemoteRejected
    }

    /// Check if the request timed out
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// Get the exchange's message for a rejected request
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::Remote { message } => Some(message),
            _ => None,
        }
    }

    /// Check if retrying the same request may succeed
    ///
    /// Only transport failures qualify. Rejections are usually caused by bad
    /// parameters or balances and are not transient. Nothing is retried
    /// automatically.
    pub fn is_retryable(&self) -> bool {
        self.is_transport()
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
