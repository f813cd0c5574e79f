//! Parameter encoding for the `SendEmail` query operation.
//!
//! The SES query API takes a flat key-value body. Scalar fields map to a
//! single unsuffixed key; list-valued fields use AWS's indexed convention,
//! where a list of N items becomes exactly N singleton keys
//! `<base>.<i>` with 1-based, gap-free indices in input order:
//!
//! ```text
//! Destination.ToAddresses.member.1=b@x.com
//! Destination.ToAddresses.member.2=c@x.com
//! ```
//!
//! Empty or absent lists contribute no keys at all. The scalar and indexed
//! key namespaces are disjoint by construction.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::error::SesError;
use crate::request::EmailRequest;

/// Fixed value of the `Action` parameter.
pub const ACTION_SEND_EMAIL: &str = "SendEmail";

const ACTION: &str = "Action";
const SOURCE: &str = "Source";
const SUBJECT_DATA: &str = "Message.Subject.Data";
const RETURN_PATH: &str = "ReturnPath";
const TO_MEMBER: &str = "Destination.ToAddresses.member";
const CC_MEMBER: &str = "Destination.CcAddresses.member";
const BCC_MEMBER: &str = "Destination.BccAddresses.member";
const REPLY_TO_MEMBER: &str = "ReplyToAddresses.member";

/// Characters percent-encoded in the form body: everything outside the
/// RFC 3986 unreserved set.
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Body format of an outgoing email.
///
/// Exactly one of the two formats applies to a request; the format selects
/// which `Message.Body.*.Data` key the body content is assigned to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailFormat {
    /// Plain text body (`Message.Body.Text.Data`).
    #[default]
    Text,
    /// HTML body (`Message.Body.Html.Data`).
    Html,
}

impl EmailFormat {
    /// The lowercase name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailFormat::Text => "text",
            EmailFormat::Html => "html",
        }
    }

    /// The parameter key the body content is assigned to.
    pub fn body_key(&self) -> &'static str {
        match self {
            EmailFormat::Text => "Message.Body.Text.Data",
            EmailFormat::Html => "Message.Body.Html.Data",
        }
    }
}

impl fmt::Display for EmailFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailFormat {
    type Err = SesError;

    /// Parse a format string, accepting exactly `"text"` and `"html"`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(EmailFormat::Text),
            "html" => Ok(EmailFormat::Html),
            other => Err(SesError::InvalidFormat {
                value: other.to_string(),
            }),
        }
    }
}

/// Expand an ordered list into indexed singleton parameters.
///
/// A list of N values produces exactly the keys `<base>.1` through
/// `<base>.N` in input order; an empty list produces nothing.
///
/// # Examples
///
/// ```rust
/// use ses_mailer::params::expand_member_list;
///
/// let pairs = expand_member_list(
///     "Destination.ToAddresses.member",
///     &["b@x.com".to_string(), "c@x.com".to_string()],
/// );
/// assert_eq!(pairs[0], ("Destination.ToAddresses.member.1".to_string(), "b@x.com".to_string()));
/// assert_eq!(pairs[1], ("Destination.ToAddresses.member.2".to_string(), "c@x.com".to_string()));
/// ```
pub fn expand_member_list(base: &str, values: &[String]) -> Vec<(String, String)> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| (format!("{}.{}", base, i + 1), value.clone()))
        .collect()
}

/// Encode an [`EmailRequest`] as the complete `SendEmail` parameter set.
///
/// Always includes `Action=SendEmail`, `Source` and the subject key; the
/// body lands under the key selected by the request's format. `ReturnPath`
/// appears only when a return path was supplied, and each recipient
/// category appears only when its list is non-empty.
pub fn build_send_email(request: &EmailRequest) -> Vec<(String, String)> {
    let mut params = vec![
        (ACTION.to_string(), ACTION_SEND_EMAIL.to_string()),
        (SOURCE.to_string(), request.source.clone()),
        (SUBJECT_DATA.to_string(), request.subject.clone()),
        (request.format.body_key().to_string(), request.body.clone()),
    ];
    if let Some(return_path) = &request.return_path {
        params.push((RETURN_PATH.to_string(), return_path.clone()));
    }
    params.extend(expand_member_list(TO_MEMBER, &request.to_addresses));
    params.extend(expand_member_list(CC_MEMBER, &request.cc_addresses));
    params.extend(expand_member_list(BCC_MEMBER, &request.bcc_addresses));
    params.extend(expand_member_list(
        REPLY_TO_MEMBER,
        &request.reply_to_addresses,
    ));
    params
}

/// Serialize parameters as an `application/x-www-form-urlencoded` body.
///
/// Keys and values are percent-encoded (RFC 3986 unreserved characters kept
/// verbatim, spaces as `%20`) and joined as `k=v&k=v` in input order.
pub fn form_urlencode(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, FORM_ENCODE_SET),
                utf8_percent_encode(value, FORM_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn value_of<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn base_request() -> EmailRequest {
        EmailRequest::builder()
            .source("a@x.com")
            .subject("Hi")
            .body("Hello")
            .to("b@x.com")
            .to("c@x.com")
            .build()
            .unwrap()
    }

    #[rstest]
    #[case("text", EmailFormat::Text)]
    #[case("html", EmailFormat::Html)]
    fn known_formats_parse(#[case] input: &str, #[case] expected: EmailFormat) {
        assert_eq!(input.parse::<EmailFormat>().unwrap(), expected);
    }

    #[rstest]
    #[case("markdown")]
    #[case("TEXT")]
    #[case("")]
    fn unknown_formats_are_rejected(#[case] input: &str) {
        let error = input.parse::<EmailFormat>().unwrap_err();
        assert!(matches!(
            error,
            SesError::InvalidFormat { ref value } if value == input
        ));
    }

    #[test]
    fn member_lists_are_one_indexed_without_gaps() {
        let values: Vec<String> = (0..4).map(|i| format!("user{i}@x.com")).collect();
        let pairs = expand_member_list("List.member", &values);

        assert_eq!(pairs.len(), 4);
        for (i, value) in values.iter().enumerate() {
            assert_eq!(pairs[i].0, format!("List.member.{}", i + 1));
            assert_eq!(&pairs[i].1, value);
        }
        assert!(!pairs.iter().any(|(k, _)| k == "List.member.0"));
        assert!(!pairs.iter().any(|(k, _)| k == "List.member.5"));
    }

    #[test]
    fn empty_member_list_produces_no_keys() {
        assert!(expand_member_list("List.member", &[]).is_empty());
    }

    #[test]
    fn send_email_parameters_for_a_text_message() {
        let params = build_send_email(&base_request());

        assert_eq!(value_of(&params, "Action"), Some("SendEmail"));
        assert_eq!(value_of(&params, "Source"), Some("a@x.com"));
        assert_eq!(value_of(&params, "Message.Subject.Data"), Some("Hi"));
        assert_eq!(value_of(&params, "Message.Body.Text.Data"), Some("Hello"));
        assert_eq!(
            value_of(&params, "Destination.ToAddresses.member.1"),
            Some("b@x.com")
        );
        assert_eq!(
            value_of(&params, "Destination.ToAddresses.member.2"),
            Some("c@x.com")
        );
        assert_eq!(value_of(&params, "Message.Body.Html.Data"), None);
    }

    #[test]
    fn html_body_lands_under_the_html_key() {
        let request = EmailRequest::builder()
            .source("a@x.com")
            .subject("Hi")
            .html("<p>Hello</p>")
            .to("b@x.com")
            .build()
            .unwrap();
        let params = build_send_email(&request);

        assert_eq!(
            value_of(&params, "Message.Body.Html.Data"),
            Some("<p>Hello</p>")
        );
        assert_eq!(value_of(&params, "Message.Body.Text.Data"), None);
    }

    #[test]
    fn absent_optional_categories_produce_no_keys() {
        let params = build_send_email(&base_request());
        assert!(!params
            .iter()
            .any(|(k, _)| k.starts_with("Destination.CcAddresses")
                || k.starts_with("Destination.BccAddresses")
                || k.starts_with("ReplyToAddresses")));
        assert_eq!(value_of(&params, "ReturnPath"), None);
    }

    #[test]
    fn optional_categories_expand_when_present() {
        let request = EmailRequest::builder()
            .source("a@x.com")
            .subject("Hi")
            .body("Hello")
            .to("b@x.com")
            .cc("cc@x.com")
            .bcc("bcc1@x.com")
            .bcc("bcc2@x.com")
            .reply_to("reply@x.com")
            .return_path("bounce@x.com")
            .build()
            .unwrap();
        let params = build_send_email(&request);

        assert_eq!(
            value_of(&params, "Destination.CcAddresses.member.1"),
            Some("cc@x.com")
        );
        assert_eq!(
            value_of(&params, "Destination.BccAddresses.member.2"),
            Some("bcc2@x.com")
        );
        assert_eq!(
            value_of(&params, "ReplyToAddresses.member.1"),
            Some("reply@x.com")
        );
        assert_eq!(value_of(&params, "ReturnPath"), Some("bounce@x.com"));
    }

    #[test]
    fn form_encoding_escapes_reserved_characters() {
        let params = vec![("Source".to_string(), "b c@x.com".to_string())];
        assert_eq!(form_urlencode(&params), "Source=b%20c%40x.com");
    }

    #[test]
    fn form_encoding_joins_pairs_in_order() {
        let params = vec![
            ("Action".to_string(), "SendEmail".to_string()),
            ("Source".to_string(), "a@x.com".to_string()),
        ];
        assert_eq!(form_urlencode(&params), "Action=SendEmail&Source=a%40x.com");
    }
}
