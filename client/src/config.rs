//! Client configuration loaded via OrthoConfig.
//!
//! Values come from `DASHBOARD_*` environment variables or a config file.
//! Accessors apply the documented fallbacks and validate URLs up front so a
//! bad deployment fails at start-up, not on the first call.

use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

use crate::domain::{Role, Session, SessionCookie, SessionValidationError};

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_COOKIE_NAME: &str = "next-auth.session-token";
const DEFAULT_ROLE: Role = Role::Student;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A URL field did not parse.
    #[error("{field} is not a valid URL: {message}")]
    InvalidUrl {
        /// Name of the offending field.
        field: &'static str,
        /// Parser diagnostic.
        message: String,
    },
    /// A session token was configured without a user id.
    #[error("session_token is set but user_id is missing")]
    MissingUserId,
    /// Session fields were present but inconsistent.
    #[error("invalid session settings: {0}")]
    Session(#[from] SessionValidationError),
}

/// Settings for the access layer and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct ClientSettings {
    /// Origin joined with every relative API path.
    pub base_url: Option<String>,
    /// Optional transport timeout in seconds; unset keeps the transport default.
    pub timeout_secs: Option<u64>,
    /// Name of the session cookie.
    pub cookie_name: Option<String>,
    /// Session cookie value; unset means nobody is logged in.
    pub session_token: Option<String>,
    /// Id of the session user.
    pub user_id: Option<String>,
    /// Role of the session user.
    pub role: Option<String>,
    /// Origin of the recommendation service; defaults to `base_url`.
    pub ml_base_url: Option<String>,
}

impl ClientSettings {
    /// Backend origin, defaulting to `http://localhost:3000`.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "base_url",
            self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
        )
    }

    /// Recommendation service origin, defaulting to [`Self::base_url`].
    pub fn ml_base_url(&self) -> Result<Url, SettingsError> {
        match self.ml_base_url.as_deref() {
            Some(raw) => parse_url("ml_base_url", raw),
            None => self.base_url(),
        }
    }

    /// Transport timeout, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Session cookie name.
    #[must_use]
    pub fn cookie_name(&self) -> &str {
        self.cookie_name.as_deref().unwrap_or(DEFAULT_COOKIE_NAME)
    }

    /// Role of the session user, defaulting to `student`.
    pub fn role(&self) -> Result<Role, SettingsError> {
        match self.role.as_deref() {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(DEFAULT_ROLE),
        }
    }

    /// Session described by the settings, if a token is configured.
    pub fn session(&self) -> Result<Option<Session>, SettingsError> {
        let Some(token) = self.session_token.as_deref() else {
            return Ok(None);
        };
        let user_id = self.user_id.as_deref().ok_or(SettingsError::MissingUserId)?;
        let cookie = SessionCookie::new(self.cookie_name(), token)?;
        Ok(Some(Session::new(user_id, self.role()?, cookie)?))
    }
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, SettingsError> {
    Url::parse(raw).map_err(|err| SettingsError::InvalidUrl {
        field,
        message: err.to_string(),
    })
}
