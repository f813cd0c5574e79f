//! Error types for the SES mail client.
//!
//! The error taxonomy is deliberately small, matching the three failure
//! classes the client distinguishes:
//!
//! - Invalid arguments (`InvalidFormat`, `MissingField`): raised
//!   synchronously while building a request, before any network activity.
//! - Transport failures (`Transport`): connection errors, DNS failures and
//!   anything else the underlying HTTP client reports. These propagate as
//!   errors; the client performs no retries of its own.
//! - Remote rejections (non-200 HTTP responses) are **not** errors — they
//!   surface as [`SendOutcome::Rejected`](crate::SendOutcome) so the caller
//!   owns the retry policy.
//!
//! # Examples
//!
//! ```rust
//! use ses_mailer::{EmailRequest, SesError};
//!
//! let result = EmailRequest::builder()
//!     .source("sender@example.com")
//!     .subject("Hi")
//!     .body("Hello")
//!     .email_format("markdown")
//!     .to("recipient@example.com")
//!     .build();
//!
//! assert!(matches!(result, Err(SesError::InvalidFormat { .. })));
//! ```

use thiserror::Error;

/// Result type alias for SES operations.
pub type SesResult<T> = std::result::Result<T, SesError>;

/// Top-level error type for the SES mail client.
#[derive(Debug, Error)]
pub enum SesError {
    /// The email format string is not one of the recognized values.
    ///
    /// Only `"text"` and `"html"` are accepted. The offending value is
    /// carried verbatim so callers can report it.
    #[error("unsupported email format {value:?}: expected \"text\" or \"html\"")]
    InvalidFormat {
        /// The unrecognized format value.
        value: String,
    },

    /// A required request field is missing or empty.
    #[error("missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// Client configuration errors.
    ///
    /// These occur when the client is misconfigured, for example a malformed
    /// endpoint URL or absent credentials.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// Request signing errors.
    ///
    /// The legacy signing scheme itself cannot fail, but assembling the
    /// signed headers can reject values that are not valid HTTP header text.
    #[error("signing error: {message}")]
    Signing {
        /// Description of the signing error.
        message: String,
    },

    /// Transport and network errors.
    ///
    /// These occur during HTTP communication with the SES endpoint and carry
    /// the underlying transport error as their source.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the transport error.
        message: String,
        /// The underlying error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SesError {
    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a signing error.
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for SesError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport {
            message: error.to_string(),
            source: Some(Box::new(error)),
        }
    }
}
