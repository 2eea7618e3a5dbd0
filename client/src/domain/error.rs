//! Error taxonomy of the access layer.
//!
//! The layer performs no recovery: every failure is logged by the call
//! wrapper and handed back to the caller in one of these shapes.

use serde_json::Value;

use crate::domain::ports::{SubmissionUploadError, TransportError};

/// Body of a non-success response as far as it could be understood.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// Body parsed as JSON.
    Structured(Value),
    /// Body was empty or not JSON.
    Malformed,
}

/// Normalised non-success HTTP response.
///
/// `Display` renders only the message, so callers can surface it verbatim.
///
/// # Examples
/// ```
/// use dashboard_client::domain::ApiError;
///
/// let err = ApiError::from_response(500, br#"{"error":"DB write failed"}"#);
/// assert_eq!(err.to_string(), "DB write failed");
///
/// let err = ApiError::from_response(502, b"<html>Bad Gateway</html>");
/// assert_eq!(err.to_string(), "HTTP 502");
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    status: u16,
    message: String,
    body: ErrorBody,
}

impl ApiError {
    /// Normalise a non-success status and its raw body.
    ///
    /// The message is the body's `error` string when present and non-empty,
    /// otherwise `HTTP {status}`.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let body = match serde_json::from_slice::<Value>(body) {
            Ok(value) => ErrorBody::Structured(value),
            Err(_) => ErrorBody::Malformed,
        };
        let message = match &body {
            ErrorBody::Structured(value) => value
                .get("error")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .map(str::to_owned),
            ErrorBody::Malformed => None,
        }
        .unwrap_or_else(|| format!("HTTP {status}"));
        Self {
            status,
            message,
            body,
        }
    }

    /// Numeric HTTP status.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Backend-provided message or the status fallback.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Parsed error body.
    #[must_use]
    pub const fn body(&self) -> &ErrorBody {
        &self.body
    }
}

/// Every way an access-layer call can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// No live session at call time. Raised before any network I/O.
    #[error("User not authenticated")]
    Unauthenticated,
    /// Backend answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Network-level failure; no response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Success status but the body was not JSON.
    #[error("response body is not valid JSON: {message}")]
    Decode {
        /// Parser diagnostic.
        message: String,
    },
    /// Request options failed boundary validation.
    #[error("invalid request options: {message}")]
    InvalidOptions {
        /// What was wrong with the options.
        message: String,
    },
    /// Payload could not be serialised to JSON.
    #[error("request body could not be encoded: {message}")]
    Encode {
        /// Serialiser diagnostic.
        message: String,
    },
    /// Caller-side input rejected before any request was made.
    #[error("{message}")]
    Validation {
        /// Human-readable reason.
        message: String,
    },
    /// Submission file could not be stored.
    #[error(transparent)]
    Upload(#[from] SubmissionUploadError),
}

impl ClientError {
    /// Construct [`ClientError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Construct [`ClientError::InvalidOptions`].
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }

    /// Construct [`ClientError::Encode`].
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Construct [`ClientError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// HTTP status for [`ClientError::Api`] failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(500, br#"{"error":"DB write failed"}"#.as_slice(), "DB write failed")]
    #[case(404, br#"{"error":"Module not found","code":"missing"}"#.as_slice(), "Module not found")]
    #[case(400, br#"{"message":"ignored"}"#.as_slice(), "HTTP 400")]
    #[case(409, br#"{"error":""}"#.as_slice(), "HTTP 409")]
    #[case(422, br#"{"error":42}"#.as_slice(), "HTTP 422")]
    #[case(503, b"Service Unavailable".as_slice(), "HTTP 503")]
    #[case(500, b"".as_slice(), "HTTP 500")]
    fn message_prefers_error_field(
        #[case] status: u16,
        #[case] body: &[u8],
        #[case] expected: &str,
    ) {
        let err = ApiError::from_response(status, body);
        assert_eq!(err.message(), expected);
        assert_eq!(err.status(), status);
    }

    #[rstest]
    fn structured_bodies_are_kept_whole() {
        let err = ApiError::from_response(400, br#"{"error":"bad","fields":["title"]}"#);
        assert_eq!(
            err.body(),
            &ErrorBody::Structured(json!({ "error": "bad", "fields": ["title"] }))
        );
    }

    #[rstest]
    fn unparseable_bodies_are_marked_malformed() {
        let err = ApiError::from_response(502, b"<html>");
        assert_eq!(err.body(), &ErrorBody::Malformed);
    }

    #[rstest]
    fn client_error_displays_api_message_verbatim() {
        let err = ClientError::from(ApiError::from_response(500, br#"{"error":"boom"}"#));
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.status(), Some(500));
        assert_eq!(ClientError::Unauthenticated.status(), None);
    }
}
