//! Minimal async client for the Amazon SES (Simple Email Service) query API.
//!
//! This crate supports exactly one operation — `SendEmail` — authenticated
//! with the legacy AWS3-HTTPS scheme: an HMAC-SHA256 signature over the
//! request's `Date` header, base64-encoded into the `X-Amzn-Authorization`
//! header. It is not a general AWS SDK.
//!
//! # Features
//!
//! - **Legacy request signing**: deterministic HMAC-SHA256 over the `Date`
//!   header; the secret key never leaves the process
//! - **Indexed parameter encoding**: recipient lists become AWS's 1-indexed
//!   `<Category>.member.<i>` singleton keys
//! - **Explicit completion**: HTTP 200 maps to [`SendOutcome::Delivered`],
//!   any other status to [`SendOutcome::Rejected`] with the response body —
//!   a value the caller can act on, never an exception-style error
//! - **Async/await**: one non-blocking POST per call on a reqwest transport
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ses_mailer::{AwsCredentials, EmailRequest, SesClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ses_mailer::SesError> {
//!     let client = SesClient::builder()
//!         .credentials(AwsCredentials::from_env()?)
//!         .build()?;
//!
//!     let request = EmailRequest::builder()
//!         .source("sender@example.com")
//!         .subject("Hello from SES")
//!         .body("This is a test email.")
//!         .to("recipient@example.com")
//!         .build()?;
//!
//!     let outcome = client.send_mail(&request).await?;
//!     println!("delivered: {}", outcome.is_delivered());
//!     Ok(())
//! }
//! ```
//!
//! # Wire Format
//!
//! One HTTP POST to `https://email.us-east-1.amazonaws.com` with
//! `Content-Type: application/x-www-form-urlencoded`, a `Date` header in
//! RFC 1123 GMT form and the `X-Amzn-Authorization` header described in
//! [`signing`]. The body is the form-encoded parameter set described in
//! [`params`], always including `Action=SendEmail`.
//!
//! # Error Handling
//!
//! Malformed input (an unrecognized format, a missing field) fails
//! synchronously before any network activity. Remote rejections are
//! completion values, not errors, so the caller owns the retry policy;
//! transport failures propagate as [`SesError::Transport`]. The client
//! itself never retries.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod params;
pub mod request;
pub mod signing;
pub mod transport;

pub use client::{SendOutcome, SesClient, SesClientBuilder};
pub use config::{SesConfig, SesConfigBuilder, DEFAULT_REGION};
pub use credentials::AwsCredentials;
pub use error::{SesError, SesResult};
pub use params::EmailFormat;
pub use request::{EmailRequest, EmailRequestBuilder};
pub use transport::{ReqwestTransport, Transport};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_exports_are_accessible() {
        let _ = std::any::type_name::<SesClient>();
        let _ = std::any::type_name::<SesError>();
        let _ = std::any::type_name::<EmailRequest>();
        let _ = std::any::type_name::<SendOutcome>();
        assert_eq!(DEFAULT_REGION, "us-east-1");
    }
}
