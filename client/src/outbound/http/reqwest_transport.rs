//! Reqwest-backed HTTP transport.
//!
//! This adapter owns transport details only: URL resolution, header and
//! cookie placement, timeout mapping, and reading the raw response. Status
//! interpretation stays in the domain.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{COOKIE, HeaderName, HeaderValue};
use reqwest::{Client, Method, Url};

use crate::domain::ports::{HttpTransport, TransportError, TransportRequest, TransportResponse};
use crate::domain::{HttpMethod, SessionCookie};

/// Transport sending requests to one backend origin.
///
/// Cookies set by the server are kept in a jar and sent back with later
/// requests, alongside the session cookie. A stored cookie sharing the
/// session cookie's name never replaces it.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    jar: Arc<Jar>,
    base_url: Url,
}

impl ReqwestTransport {
    /// Build a transport resolving paths beneath `base_url`.
    ///
    /// Any path prefix on `base_url` is kept: `http://ml.example/v1` with
    /// `/planner/stu-1` targets `http://ml.example/v1/planner/stu-1`.
    /// `timeout` bounds each request; `None` keeps reqwest's default.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let jar = Arc::new(Jar::default());
        let builder = Client::builder().cookie_provider(jar.clone());
        let builder = match timeout {
            Some(limit) => builder.timeout(limit),
            None => builder,
        };
        Ok(Self {
            client: builder.build()?,
            jar,
            base_url: with_trailing_slash(base_url),
        })
    }

    /// Base URL requests are resolved beneath, always ending in `/`.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|error| TransportError::transport(format!("invalid request path {path}: {error}")))
    }

    /// Session cookie first, then any stored cookies with other names.
    fn cookie_header(
        &self,
        url: &Url,
        session: &SessionCookie,
    ) -> Result<HeaderValue, TransportError> {
        let mut pairs = vec![session.header_value()];
        if let Some(stored) = self.jar.cookies(url) {
            let stored = stored
                .to_str()
                .map_err(|error| TransportError::transport(format!("invalid stored cookie: {error}")))?;
            pairs.extend(
                stored
                    .split(';')
                    .map(str::trim)
                    .filter(|pair| {
                        !pair.is_empty()
                            && pair.split_once('=').is_none_or(|(name, _)| name != session.name())
                    })
                    .map(str::to_owned),
            );
        }
        let mut header = HeaderValue::from_str(&pairs.join("; "))
            .map_err(|error| TransportError::transport(format!("invalid session cookie: {error}")))?;
        header.set_sensitive(true);
        Ok(header)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = self.resolve(&request.path)?;
        let cookie = self.cookie_header(&url, &request.session_cookie)?;
        let mut builder = self
            .client
            .request(to_method(request.method), url)
            .header(COOKIE, cookie);
        for (name, value) in &request.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|error| TransportError::transport(format!("invalid header {name}: {error}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|error| TransportError::transport(format!("invalid header {name}: {error}")))?;
            builder = builder.header(header_name, header_value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

const fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else {
        TransportError::transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Exercises the adapter against a one-shot local HTTP server.

    use super::*;
    use rstest::rstest;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Accept one connection, capture the raw request, and reply.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let raw = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            raw
        });
        let url = Url::parse(&format!("http://{addr}/")).expect("server url");
        (url, handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0_u8; 1024];
        loop {
            let read = socket.read(&mut chunk).await.expect("read request");
            buffer.extend_from_slice(&chunk[..read]);
            let text = String::from_utf8_lossy(&buffer).into_owned();
            if let Some((head, body)) = text.split_once("\r\n\r\n") {
                let expected = head
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if body.len() >= expected {
                    return text;
                }
            }
            if read == 0 {
                return text;
            }
        }
    }

    /// Serve two requests in turn, issuing cookies on the first reply.
    async fn serve_twice_setting_cookies() -> (Url, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            let replies = [
                "set-cookie: rotated=new-token; Path=/\r\nset-cookie: next-auth.session-token=server; Path=/\r\n",
                "",
            ];
            let mut captured = Vec::new();
            for extra_headers in replies {
                let (mut socket, _) = listener.accept().await.expect("accept");
                captured.push(read_request(&mut socket).await);
                let response = format!(
                    "HTTP/1.1 200 OK\r\n{extra_headers}content-length: 2\r\nconnection: close\r\n\r\n{{}}"
                );
                socket
                    .write_all(response.as_bytes())
                    .await
                    .expect("write response");
            }
            captured
        });
        let url = Url::parse(&format!("http://{addr}/")).expect("server url");
        (url, handle)
    }

    fn request(method: HttpMethod, path: &str, body: Option<&str>) -> TransportRequest {
        TransportRequest {
            method,
            path: path.to_owned(),
            headers: vec![("Content-Type".to_owned(), "application/json".to_owned())],
            body: body.map(str::to_owned),
            session_cookie: SessionCookie::new("next-auth.session-token", "tok-42")
                .expect("cookie"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn sends_method_headers_cookie_and_body() {
        let (base_url, server) = serve_once("201 Created", r#"{"progress":{"id":"p1"}}"#).await;
        let transport = ReqwestTransport::new(base_url, Some(Duration::from_secs(5)))
            .expect("client builds");

        let response = transport
            .send(request(
                HttpMethod::Post,
                "/api/student-progress",
                Some(r#"{"score":0}"#),
            ))
            .await
            .expect("response");
        let raw = server.await.expect("server task").to_lowercase();

        assert_eq!(response.status, 201);
        assert_eq!(response.body, br#"{"progress":{"id":"p1"}}"#.to_vec());
        assert!(raw.starts_with("post /api/student-progress http/1.1"));
        assert!(raw.contains("content-type: application/json"));
        assert!(raw.contains("cookie: next-auth.session-token=tok-42"));
        assert!(raw.ends_with(r#"{"score":0}"#));
    }

    #[rstest]
    #[tokio::test]
    async fn error_statuses_are_returned_not_raised() {
        let (base_url, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let transport = ReqwestTransport::new(base_url, None).expect("client builds");

        let response = transport
            .send(request(HttpMethod::Get, "/api/modules?batchId=b1", None))
            .await
            .expect("response");
        let raw = server.await.expect("server task");

        assert_eq!(response.status, 500);
        assert!(!response.is_success());
        assert!(raw.starts_with("GET /api/modules?batchId=b1 HTTP/1.1"));
    }

    #[rstest]
    #[tokio::test]
    async fn refused_connections_map_to_transport_errors() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);
        let base_url = Url::parse(&format!("http://{addr}/")).expect("url");
        let transport = ReqwestTransport::new(base_url, None).expect("client builds");

        let err = transport
            .send(request(HttpMethod::Get, "/api/modules", None))
            .await
            .expect_err("must fail");
        assert!(matches!(err, TransportError::Transport { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn slow_servers_map_to_timeouts() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.expect("accept");
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });
        let base_url = Url::parse(&format!("http://{addr}/")).expect("url");
        let transport = ReqwestTransport::new(base_url, Some(Duration::from_millis(100)))
            .expect("client builds");

        let err = transport
            .send(request(HttpMethod::Get, "/api/modules", None))
            .await
            .expect_err("must time out");
        assert!(matches!(err, TransportError::Timeout { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn server_issued_cookies_ride_along_with_later_requests() {
        let (base_url, server) = serve_twice_setting_cookies().await;
        let transport = ReqwestTransport::new(base_url, Some(Duration::from_secs(5)))
            .expect("client builds");

        transport
            .send(request(HttpMethod::Get, "/api/modules", None))
            .await
            .expect("first response");
        transport
            .send(request(HttpMethod::Get, "/api/assignments", None))
            .await
            .expect("second response");
        let captured = server.await.expect("server task");

        let first = captured[0].to_lowercase();
        let second = captured[1].to_lowercase();
        assert!(first.contains("cookie: next-auth.session-token=tok-42\r\n"));
        assert!(second.contains("cookie: next-auth.session-token=tok-42; rotated=new-token\r\n"));
        assert!(!second.contains("next-auth.session-token=server"));
    }

    #[rstest]
    #[case("v1")]
    #[case("v1/")]
    #[tokio::test]
    async fn base_path_prefixes_are_kept(#[case] prefix: &str) {
        let (origin, server) = serve_once("200 OK", "{}").await;
        let base_url = origin.join(prefix).expect("prefixed url");
        let transport = ReqwestTransport::new(base_url, Some(Duration::from_secs(5)))
            .expect("client builds");

        transport
            .send(request(HttpMethod::Get, "/planner/stu-1", None))
            .await
            .expect("response");
        let raw = server.await.expect("server task");

        assert_eq!(transport.base_url().path(), "/v1/");
        assert!(raw.starts_with("GET /v1/planner/stu-1 HTTP/1.1"));
    }
}
