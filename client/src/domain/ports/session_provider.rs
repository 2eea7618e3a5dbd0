//! Driven port for reading the externally owned session.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::Session;

define_port_error! {
    /// Errors surfaced while asking the provider for a session.
    pub enum SessionProviderError {
        /// Provider could not be reached.
        Unavailable { message: String } =>
            "session provider unavailable: {message}",
        /// Provider returned data that does not form a session.
        Invalid { message: String } =>
            "session data invalid: {message}",
    }
}

/// Port exposing the current session, if any. Never mutates it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Current session, or `None` when nobody is logged in.
    async fn current_session(&self) -> Result<Option<Session>, SessionProviderError>;
}

/// Fixture provider with nobody logged in.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSessionProvider;

#[async_trait]
impl SessionProvider for FixtureSessionProvider {
    async fn current_session(&self) -> Result<Option<Session>, SessionProviderError> {
        Ok(None)
    }
}
