//! The SES client and the send-mail call orchestration.
//!
//! Each `send_mail` call moves through three states: *building* (encode and
//! validate — a failure here terminates synchronously, the HTTP layer is
//! never invoked), *in flight* (sign the current timestamp, issue one POST)
//! and *completed* (map the HTTP status to a [`SendOutcome`]). There are no
//! retries and no partial-failure semantics; a call either produces exactly
//! one completion value or one transport error.

use std::sync::Arc;

use chrono::Utc;
use http::StatusCode;
use reqwest::{Method, Request};
use tracing::{debug, error};
use url::Url;

use crate::config::SesConfig;
use crate::credentials::AwsCredentials;
use crate::error::{SesError, SesResult};
use crate::params;
use crate::request::EmailRequest;
use crate::signing;
use crate::transport::{ReqwestTransport, Transport};

/// Completion value of one `send_mail` call.
///
/// Remote rejection is a value, not an error: a non-200 response means SES
/// received and refused the request, and the caller decides whether to
/// retry. Transport failures, by contrast, surface as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// SES accepted the email (HTTP 200).
    Delivered,
    /// SES refused the request. The response body has already been logged
    /// at error level.
    Rejected {
        /// The non-200 HTTP status.
        status: StatusCode,
        /// The response body, as diagnostic text.
        body: String,
    },
}

impl SendOutcome {
    /// Whether SES accepted the email.
    pub fn is_delivered(&self) -> bool {
        matches!(self, SendOutcome::Delivered)
    }
}

/// Async client for the SES `SendEmail` query API.
///
/// The client is cheap to clone and safe to share across tasks: credentials
/// and configuration are immutable, and each call builds its own parameter
/// set and headers. Concurrent calls are independent, with no ordering
/// guarantee between them.
///
/// # Example
///
/// ```rust,no_run
/// use ses_mailer::{AwsCredentials, EmailRequest, SesClient};
///
/// # async fn example() -> Result<(), ses_mailer::SesError> {
/// let client = SesClient::builder()
///     .credentials(AwsCredentials::new("AKID", "SECRET"))
///     .build()?;
///
/// let request = EmailRequest::builder()
///     .source("sender@example.com")
///     .subject("Hello")
///     .body("Hello from SES")
///     .to("recipient@example.com")
///     .build()?;
///
/// let outcome = client.send_mail(&request).await?;
/// assert!(outcome.is_delivered());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SesClient {
    config: Arc<SesConfig>,
    credentials: Arc<AwsCredentials>,
    transport: Arc<dyn Transport>,
    endpoint: Url,
}

impl std::fmt::Debug for SesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SesClient")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .field("transport", &"<dyn Transport>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl SesClient {
    /// Create a client from a configuration and credentials.
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Configuration`] when the endpoint URL is
    /// malformed, or [`SesError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: SesConfig, credentials: AwsCredentials) -> SesResult<Self> {
        Self::builder().config(config).credentials(credentials).build()
    }

    /// Create a client from environment credentials and default
    /// configuration.
    ///
    /// Reads `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Configuration`] when either variable is unset.
    pub fn from_env() -> SesResult<Self> {
        Self::builder()
            .credentials(AwsCredentials::from_env()?)
            .build()
    }

    /// Create a new client builder.
    pub fn builder() -> SesClientBuilder {
        SesClientBuilder::default()
    }

    /// The client configuration.
    pub fn config(&self) -> &SesConfig {
        &self.config
    }

    /// Compose and send one email.
    ///
    /// Encodes the request, signs the current UTC timestamp and issues a
    /// single POST to the SES endpoint. HTTP 200 yields
    /// [`SendOutcome::Delivered`]; any other status logs the response body
    /// at error level and yields [`SendOutcome::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Transport`] when the request cannot be sent, and
    /// [`SesError::Signing`] when the signed headers cannot be assembled.
    pub async fn send_mail(&self, request: &EmailRequest) -> SesResult<SendOutcome> {
        let parameters = params::build_send_email(request);
        let body = params::form_urlencode(&parameters);

        let now = Utc::now();
        let headers = signing::signed_headers(&self.credentials, &now)?;

        let mut http_request = Request::new(Method::POST, self.endpoint.clone());
        *http_request.headers_mut() = headers;
        *http_request.body_mut() = Some(body.into());

        debug!(
            recipients = request.to_addresses.len(),
            source = %request.source,
            "dispatching SendEmail"
        );

        let response = self.transport.send(http_request).await?;
        let status = response.status();
        if status == StatusCode::OK {
            debug!("SendEmail accepted");
            return Ok(SendOutcome::Delivered);
        }

        let body = response.text().await.unwrap_or_default();
        error!(status = %status, "Amazon SES: {body}");
        Ok(SendOutcome::Rejected { status, body })
    }
}

/// Builder for [`SesClient`].
#[derive(Default)]
pub struct SesClientBuilder {
    config: Option<SesConfig>,
    region: Option<String>,
    endpoint: Option<String>,
    credentials: Option<AwsCredentials>,
    transport: Option<Arc<dyn Transport>>,
}

impl SesClientBuilder {
    /// Set the full configuration.
    pub fn config(mut self, config: SesConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the AWS region (shorthand for a config override).
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set a custom endpoint URL (shorthand for a config override).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the credentials. Required.
    pub fn credentials(mut self, credentials: AwsCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Substitute a custom transport (used by tests).
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Configuration`] when credentials are missing or
    /// the endpoint URL does not parse, and [`SesError::Transport`] when
    /// the default transport cannot be constructed.
    pub fn build(self) -> SesResult<SesClient> {
        let mut config = self.config.unwrap_or_default();
        if let Some(region) = self.region {
            config.region = region;
        }
        if let Some(endpoint) = self.endpoint {
            config.endpoint = Some(endpoint);
        }

        let credentials = self
            .credentials
            .ok_or_else(|| SesError::configuration("credentials are required"))?;

        let endpoint = Url::parse(&config.ses_endpoint())
            .map_err(|e| SesError::configuration(format!("invalid endpoint URL: {e}")))?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                config.timeout,
                config.connect_timeout,
            )?),
        };

        Ok(SesClient {
            config: Arc::new(config),
            credentials: Arc::new(credentials),
            transport,
            endpoint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_credentials() {
        let error = SesClient::builder().build().unwrap_err();
        assert!(matches!(error, SesError::Configuration { .. }));
    }

    #[test]
    fn default_endpoint_is_the_classic_ses_url() {
        let client = SesClient::builder()
            .credentials(AwsCredentials::new("AKID", "SECRET"))
            .build()
            .unwrap();
        assert_eq!(
            client.endpoint.as_str(),
            "https://email.us-east-1.amazonaws.com/"
        );
    }

    #[test]
    fn malformed_endpoint_is_a_configuration_error() {
        let error = SesClient::builder()
            .credentials(AwsCredentials::new("AKID", "SECRET"))
            .endpoint("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(error, SesError::Configuration { .. }));
    }

    #[test]
    fn outcome_reports_delivery() {
        assert!(SendOutcome::Delivered.is_delivered());
        let rejected = SendOutcome::Rejected {
            status: StatusCode::FORBIDDEN,
            body: "<ErrorResponse/>".to_string(),
        };
        assert!(!rejected.is_delivered());
    }
}
