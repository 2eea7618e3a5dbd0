//! Driven port for issuing one HTTP request.
//!
//! The call wrapper owns request shaping and error normalisation; adapters
//! behind this port only move bytes and report network-level failures.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{HttpMethod, SessionCookie};

/// Fully shaped request handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Origin-relative path, including any query string.
    pub path: String,
    /// Headers after merging caller overrides over the defaults.
    pub headers: Vec<(String, String)>,
    /// Serialised JSON body.
    pub body: Option<String>,
    /// Session cookie the adapter must attach whatever the target.
    pub session_cookie: SessionCookie,
}

impl TransportRequest {
    /// First header value matching `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response as received from the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// Numeric HTTP status.
    pub status: u16,
    /// Undecoded body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Whether the status is in the `2xx` range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

define_port_error! {
    /// Network-level failures; no HTTP response was obtained.
    pub enum TransportError {
        /// Connection, DNS, TLS, or protocol failure.
        Transport { message: String } =>
            "network request failed: {message}",
        /// The transport's own deadline elapsed.
        Timeout { message: String } =>
            "network request timed out: {message}",
    }
}

/// Port for sending a single request. Implementations must not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` once and return whatever status came back.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Fixture transport answering every request with `200 {}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureHttpTransport;

#[async_trait]
impl HttpTransport for FixtureHttpTransport {
    async fn send(&self, _request: TransportRequest) -> Result<TransportResponse, TransportError> {
        Ok(TransportResponse {
            status: 200,
            body: b"{}".to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(200, true)]
    #[case(204, true)]
    #[case(299, true)]
    #[case(199, false)]
    #[case(301, false)]
    #[case(500, false)]
    fn success_range_is_2xx(#[case] status: u16, #[case] expected: bool) {
        let response = TransportResponse {
            status,
            body: Vec::new(),
        };
        assert_eq!(response.is_success(), expected);
    }

    #[tokio::test]
    async fn fixture_answers_empty_object() {
        let cookie = SessionCookie::new("sid", "v").expect("cookie");
        let response = FixtureHttpTransport
            .send(TransportRequest {
                method: HttpMethod::Get,
                path: "/api/modules".to_owned(),
                headers: Vec::new(),
                body: None,
                session_cookie: cookie,
            })
            .await
            .expect("fixture never fails");
        assert_eq!(response.body, b"{}".to_vec());
    }
}
