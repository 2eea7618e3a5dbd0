//! Session provider backed by the loaded client settings.
//!
//! The authentication service owns the session; the CLI receives its cookie
//! through configuration and never refreshes or stores it.

use async_trait::async_trait;

use crate::config::ClientSettings;
use crate::domain::Session;
use crate::domain::ports::{SessionProvider, SessionProviderError};

/// Provider reporting the session described by [`ClientSettings`].
#[derive(Debug, Clone)]
pub struct SettingsSessionProvider {
    settings: ClientSettings,
}

impl SettingsSessionProvider {
    /// Provider over `settings`.
    #[must_use]
    pub const fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SessionProvider for SettingsSessionProvider {
    async fn current_session(&self) -> Result<Option<Session>, SessionProviderError> {
        self.settings
            .session()
            .map_err(|error| SessionProviderError::invalid(error.to_string()))
    }
}
