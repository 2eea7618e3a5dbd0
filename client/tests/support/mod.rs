//! Shared fixtures for access-layer behaviour tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dashboard_client::domain::ports::{
    HttpTransport, TransportError, TransportRequest, TransportResponse,
};
use dashboard_client::domain::{ApiClient, Role, Session, SessionContext, SessionCookie};
use serde_json::Value;

/// Transport that records every request and replies from a script.
///
/// Paths without a scripted reply answer `200 {}`.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<TransportRequest>>,
    replies: Mutex<HashMap<String, (u16, String)>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Reply to `path` with `status` and `body`.
    pub fn reply(&self, path: &str, status: u16, body: &Value) {
        self.replies
            .lock()
            .expect("replies lock")
            .insert(path.to_owned(), (status, body.to_string()));
    }

    /// Reply to `path` with a raw, possibly non-JSON, body.
    pub fn reply_raw(&self, path: &str, status: u16, body: &str) {
        self.replies
            .lock()
            .expect("replies lock")
            .insert(path.to_owned(), (status, body.to_owned()));
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// The only request sent; panics unless exactly one was recorded.
    pub fn single_request(&self) -> TransportRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
        requests.into_iter().next().expect("one request")
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let reply = self
            .replies
            .lock()
            .expect("replies lock")
            .get(&request.path)
            .cloned();
        self.requests.lock().expect("requests lock").push(request);
        let (status, body) = reply.unwrap_or_else(|| (200, "{}".to_owned()));
        Ok(TransportResponse {
            status,
            body: body.into_bytes(),
        })
    }
}

pub fn student_context() -> SessionContext {
    let cookie = SessionCookie::new("next-auth.session-token", "tok-student").expect("cookie");
    SessionContext::authenticated(Session::new("stu-1", Role::Student, cookie).expect("session"))
}

pub fn client_over(transport: &Arc<RecordingTransport>) -> ApiClient {
    ApiClient::new(transport.clone())
}

/// Parsed JSON body of a recorded request.
pub fn body_of(request: &TransportRequest) -> Option<Value> {
    request
        .body
        .as_deref()
        .map(|raw| serde_json::from_str(raw).expect("request body is JSON"))
}
