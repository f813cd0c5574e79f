//! The `SendEmail` request type and its builder.

use serde::{Deserialize, Serialize};

use crate::error::{SesError, SesResult};
use crate::params::EmailFormat;

/// A fully-validated email send request.
///
/// Construct one through [`EmailRequest::builder`]; validation happens in
/// [`EmailRequestBuilder::build`], synchronously and before any network
/// activity. Recipient lists are ordered and the order is preserved into
/// the wire encoding.
///
/// Address syntax is deliberately not validated — SES itself is the
/// authority on what it accepts.
///
/// # Example
///
/// ```rust
/// use ses_mailer::EmailRequest;
///
/// let request = EmailRequest::builder()
///     .source("sender@example.com")
///     .subject("Hello")
///     .body("Plain text body")
///     .to("recipient@example.com")
///     .build()?;
///
/// assert_eq!(request.source, "sender@example.com");
/// # Ok::<(), ses_mailer::SesError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRequest {
    /// Sender address (`Source`).
    pub source: String,
    /// Subject line.
    pub subject: String,
    /// Body content, interpreted per `format`.
    pub body: String,
    /// Body format; selects the text or HTML body key.
    pub format: EmailFormat,
    /// Primary recipients. Required, non-empty.
    pub to_addresses: Vec<String>,
    /// CC recipients.
    pub cc_addresses: Vec<String>,
    /// BCC recipients.
    pub bcc_addresses: Vec<String>,
    /// Reply-to addresses.
    pub reply_to_addresses: Vec<String>,
    /// Bounce address (`ReturnPath`); omitted from the wire when `None`.
    pub return_path: Option<String>,
}

impl EmailRequest {
    /// Create a new request builder.
    pub fn builder() -> EmailRequestBuilder {
        EmailRequestBuilder::default()
    }
}

/// Fluent builder for [`EmailRequest`].
///
/// The format defaults to `"text"`. Recipient methods append; the
/// `*_addresses` variants replace the whole list at once.
#[derive(Debug, Clone, Default)]
pub struct EmailRequestBuilder {
    source: Option<String>,
    subject: Option<String>,
    body: Option<String>,
    email_format: Option<String>,
    to_addresses: Vec<String>,
    cc_addresses: Vec<String>,
    bcc_addresses: Vec<String>,
    reply_to_addresses: Vec<String>,
    return_path: Option<String>,
}

impl EmailRequestBuilder {
    /// Set the sender address.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the subject line.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the body content without changing the format.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the body format from its string name (`"text"` or `"html"`).
    ///
    /// Unrecognized values are rejected by [`build`](Self::build), naming
    /// the value.
    pub fn email_format(mut self, format: impl Into<String>) -> Self {
        self.email_format = Some(format.into());
        self
    }

    /// Set a plain text body.
    pub fn text(self, body: impl Into<String>) -> Self {
        self.body(body).email_format(EmailFormat::Text.as_str())
    }

    /// Set an HTML body.
    pub fn html(self, body: impl Into<String>) -> Self {
        self.body(body).email_format(EmailFormat::Html.as_str())
    }

    /// Add a primary recipient.
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to_addresses.push(address.into());
        self
    }

    /// Replace the primary recipient list.
    pub fn to_addresses(mut self, addresses: Vec<String>) -> Self {
        self.to_addresses = addresses;
        self
    }

    /// Add a CC recipient.
    pub fn cc(mut self, address: impl Into<String>) -> Self {
        self.cc_addresses.push(address.into());
        self
    }

    /// Replace the CC recipient list.
    pub fn cc_addresses(mut self, addresses: Vec<String>) -> Self {
        self.cc_addresses = addresses;
        self
    }

    /// Add a BCC recipient.
    pub fn bcc(mut self, address: impl Into<String>) -> Self {
        self.bcc_addresses.push(address.into());
        self
    }

    /// Replace the BCC recipient list.
    pub fn bcc_addresses(mut self, addresses: Vec<String>) -> Self {
        self.bcc_addresses = addresses;
        self
    }

    /// Add a reply-to address.
    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to_addresses.push(address.into());
        self
    }

    /// Replace the reply-to address list.
    pub fn reply_to_addresses(mut self, addresses: Vec<String>) -> Self {
        self.reply_to_addresses = addresses;
        self
    }

    /// Set the bounce address (`ReturnPath`).
    pub fn return_path(mut self, address: impl Into<String>) -> Self {
        self.return_path = Some(address.into());
        self
    }

    /// Build the request.
    ///
    /// # Errors
    ///
    /// - [`SesError::MissingField`] when `source`, `subject` or `body` is
    ///   unset, or when no primary recipient was added.
    /// - [`SesError::InvalidFormat`] when the format string is not `"text"`
    ///   or `"html"`.
    pub fn build(self) -> SesResult<EmailRequest> {
        let source = self.source.ok_or_else(|| SesError::missing_field("source"))?;
        let subject = self
            .subject
            .ok_or_else(|| SesError::missing_field("subject"))?;
        let body = self.body.ok_or_else(|| SesError::missing_field("body"))?;
        if self.to_addresses.is_empty() {
            return Err(SesError::missing_field("to_addresses"));
        }
        let format = match self.email_format {
            Some(value) => value.parse()?,
            None => EmailFormat::default(),
        };

        Ok(EmailRequest {
            source,
            subject,
            body,
            format,
            to_addresses: self.to_addresses,
            cc_addresses: self.cc_addresses,
            bcc_addresses: self.bcc_addresses,
            reply_to_addresses: self.reply_to_addresses,
            return_path: self.return_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_request_defaults_to_text() {
        let request = EmailRequest::builder()
            .source("a@x.com")
            .subject("Hi")
            .body("Hello")
            .to("b@x.com")
            .build()
            .unwrap();

        assert_eq!(request.format, EmailFormat::Text);
        assert_eq!(request.to_addresses, vec!["b@x.com"]);
        assert!(request.cc_addresses.is_empty());
        assert_eq!(request.return_path, None);
    }

    #[test]
    fn recipient_order_is_preserved() {
        let request = EmailRequest::builder()
            .source("a@x.com")
            .subject("Hi")
            .body("Hello")
            .to("first@x.com")
            .to("second@x.com")
            .to("third@x.com")
            .build()
            .unwrap();

        assert_eq!(
            request.to_addresses,
            vec!["first@x.com", "second@x.com", "third@x.com"]
        );
    }

    #[test]
    fn html_convenience_sets_body_and_format() {
        let request = EmailRequest::builder()
            .source("a@x.com")
            .subject("Hi")
            .html("<p>Hello</p>")
            .to("b@x.com")
            .build()
            .unwrap();

        assert_eq!(request.format, EmailFormat::Html);
        assert_eq!(request.body, "<p>Hello</p>");
    }

    #[test]
    fn unknown_format_fails_naming_the_value() {
        let error = EmailRequest::builder()
            .source("a@x.com")
            .subject("Hi")
            .body("Hello")
            .email_format("markdown")
            .to("b@x.com")
            .build()
            .unwrap_err();

        assert!(matches!(
            error,
            SesError::InvalidFormat { ref value } if value == "markdown"
        ));
    }

    #[test]
    fn missing_recipients_are_rejected() {
        let error = EmailRequest::builder()
            .source("a@x.com")
            .subject("Hi")
            .body("Hello")
            .build()
            .unwrap_err();

        assert!(matches!(
            error,
            SesError::MissingField { ref field } if field == "to_addresses"
        ));
    }

    #[test]
    fn missing_source_is_rejected() {
        let error = EmailRequest::builder()
            .subject("Hi")
            .body("Hello")
            .to("b@x.com")
            .build()
            .unwrap_err();

        assert!(matches!(
            error,
            SesError::MissingField { ref field } if field == "source"
        ));
    }

    #[test]
    fn list_setters_replace_wholesale() {
        let request = EmailRequest::builder()
            .source("a@x.com")
            .subject("Hi")
            .body("Hello")
            .to("dropped@x.com")
            .to_addresses(vec!["kept@x.com".to_string()])
            .build()
            .unwrap();

        assert_eq!(request.to_addresses, vec!["kept@x.com"]);
    }
}
