//! Client configuration.
//!
//! The defaults reproduce the classic SES query endpoint,
//! `https://email.us-east-1.amazonaws.com`. The endpoint override exists for
//! testing against a local mock server or an SES-compatible stand-in; there
//! is no configuration file — everything is supplied programmatically.

use std::time::Duration;

/// Default AWS region for the SES endpoint.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default timeout for the entire request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for establishing a connection.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the SES client.
///
/// # Example
///
/// ```rust
/// use ses_mailer::SesConfig;
///
/// let config = SesConfig::default();
/// assert_eq!(config.ses_endpoint(), "https://email.us-east-1.amazonaws.com");
/// ```
#[derive(Debug, Clone)]
pub struct SesConfig {
    /// AWS region (e.g. `"us-east-1"`).
    pub region: String,

    /// Custom endpoint URL, overriding the region-derived one.
    pub endpoint: Option<String>,

    /// Timeout for the entire request.
    pub timeout: Duration,

    /// Timeout for establishing connections.
    pub connect_timeout: Duration,
}

impl Default for SesConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl SesConfig {
    /// Create a new configuration builder.
    pub fn builder() -> SesConfigBuilder {
        SesConfigBuilder::default()
    }

    /// The SES endpoint URL for this configuration.
    ///
    /// Returns the custom endpoint when one is configured, otherwise the
    /// standard SES query endpoint for the configured region.
    pub fn ses_endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://email.{}.amazonaws.com", self.region))
    }
}

/// Builder for [`SesConfig`].
#[derive(Debug, Default)]
pub struct SesConfigBuilder {
    region: Option<String>,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl SesConfigBuilder {
    /// Set the AWS region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set a custom endpoint URL.
    ///
    /// Useful for pointing the client at a local mock server in tests.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = Some(connect_timeout);
        self
    }

    /// Build the configuration, filling unset fields with defaults.
    pub fn build(self) -> SesConfig {
        let defaults = SesConfig::default();
        SesConfig {
            region: self.region.unwrap_or(defaults.region),
            endpoint: self.endpoint,
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
        }
    }
}
