//! Authenticated access layer for the student dashboard backend.
//!
//! Every page-level lookup goes through [`domain::ApiClient`]: the session is
//! checked first, the request is shaped uniformly, and failures come back as
//! a [`domain::ClientError`] after being logged.

pub mod config;
pub mod domain;
pub mod outbound;

pub use domain::{ApiClient, ClientError, SessionContext};
