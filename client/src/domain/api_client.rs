//! Generic call wrapper: the single chokepoint for outbound requests.
//!
//! Each call runs the session guard, shapes the request (default headers,
//! caller overrides, JSON body, session cookie), sends it exactly once, and
//! normalises the outcome. Failures are logged here and returned unchanged.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::domain::ports::{HttpTransport, TransportRequest, TransportResponse};
use crate::domain::request::merge_headers;
use crate::domain::{
    ApiError, ClientError, HttpMethod, RequestOptions, Session, SessionContext,
    ensure_authenticated,
};

/// Authenticated API client shared by every resource table.
///
/// Cloning is cheap; clones share the transport and clock. Calls hold no
/// state between them, so any number may run concurrently.
///
/// # Examples
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use dashboard_client::domain::{ApiClient, SessionContext};
/// # use dashboard_client::domain::ports::FixtureHttpTransport;
/// # async fn example(ctx: SessionContext) -> Result<(), dashboard_client::domain::ClientError> {
/// let client = ApiClient::new(Arc::new(FixtureHttpTransport));
/// let module = client.modules().get_by_id(&ctx, "m1").await?;
/// # let _ = module;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl ApiClient {
    /// Client over `transport` using the system clock for expiry checks.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            clock: Arc::new(DefaultClock),
        }
    }

    /// Replace the clock used to judge session expiry.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    /// Issue one authenticated call to `path` and return the parsed body.
    pub async fn call(
        &self,
        ctx: &SessionContext,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ClientError> {
        self.guarded(ctx, path, || Ok(options)).await
    }

    /// Authenticated `GET`.
    pub async fn get(&self, ctx: &SessionContext, path: &str) -> Result<Value, ClientError> {
        self.call(ctx, path, RequestOptions::new()).await
    }

    /// Authenticated `DELETE` without a body.
    pub async fn delete(&self, ctx: &SessionContext, path: &str) -> Result<Value, ClientError> {
        self.call(
            ctx,
            path,
            RequestOptions::new().with_method(HttpMethod::Delete),
        )
        .await
    }

    /// Authenticated call carrying `payload` serialised as JSON.
    pub async fn send_json<T>(
        &self,
        ctx: &SessionContext,
        method: HttpMethod,
        path: &str,
        payload: &T,
    ) -> Result<Value, ClientError>
    where
        T: Serialize + ?Sized,
    {
        self.guarded(ctx, path, || {
            let body = serde_json::to_value(payload)
                .map_err(|err| ClientError::encode(err.to_string()))?;
            Ok(RequestOptions::new().with_method(method).with_body(body))
        })
        .await
    }

    /// Authenticated `POST` with a JSON body.
    pub async fn post<T>(
        &self,
        ctx: &SessionContext,
        path: &str,
        payload: &T,
    ) -> Result<Value, ClientError>
    where
        T: Serialize + ?Sized,
    {
        self.send_json(ctx, HttpMethod::Post, path, payload).await
    }

    /// Authenticated `PUT` with a JSON body.
    pub async fn put<T>(
        &self,
        ctx: &SessionContext,
        path: &str,
        payload: &T,
    ) -> Result<Value, ClientError>
    where
        T: Serialize + ?Sized,
    {
        self.send_json(ctx, HttpMethod::Put, path, payload).await
    }

    /// Confirm the context holds a live session at the client's clock time.
    pub fn ensure_authenticated<'a>(
        &self,
        ctx: &'a SessionContext,
    ) -> Result<&'a Session, ClientError> {
        ensure_authenticated(ctx, self.clock.utc())
    }

    async fn guarded<F>(
        &self,
        ctx: &SessionContext,
        path: &str,
        options: F,
    ) -> Result<Value, ClientError>
    where
        F: FnOnce() -> Result<RequestOptions, ClientError>,
    {
        let outcome = match self.ensure_authenticated(ctx) {
            Ok(session) => match options() {
                Ok(options) => self.dispatch(session, path, options).await,
                Err(err) => Err(err),
            },
            Err(err) => Err(err),
        };
        if let Err(err) = &outcome {
            error!(path, error = %err, "API call failed");
        }
        outcome
    }

    async fn dispatch(
        &self,
        session: &Session,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ClientError> {
        let request = shape_request(session, path, options)?;
        debug!(method = %request.method, path, "issuing API request");
        let response = self.transport.send(request).await?;
        parse_response(response)
    }
}

fn shape_request(
    session: &Session,
    path: &str,
    options: RequestOptions,
) -> Result<TransportRequest, ClientError> {
    let (method, body, headers) = options.into_parts();
    let body = body
        .map(|value| serde_json::to_string(&value))
        .transpose()
        .map_err(|err| ClientError::encode(err.to_string()))?;
    Ok(TransportRequest {
        method,
        path: path.to_owned(),
        headers: merge_headers(headers),
        body,
        session_cookie: session.cookie().clone(),
    })
}

fn parse_response(response: TransportResponse) -> Result<Value, ClientError> {
    if !response.is_success() {
        return Err(ApiError::from_response(response.status, &response.body).into());
    }
    serde_json::from_slice(&response.body).map_err(|err| ClientError::decode(err.to_string()))
}
