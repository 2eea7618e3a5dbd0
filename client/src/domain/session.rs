//! Session primitives and the guard every outbound call passes through.
//!
//! The session is owned by an external provider. This layer only reads it:
//! callers resolve a [`SessionContext`] once (from a [`SessionProvider`] or a
//! fabricated session in tests) and hand it to every access-layer call.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ClientError;
use crate::domain::ports::{SessionProvider, SessionProviderError};

/// Role carried by the authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Enrolled student.
    Student,
    /// Teaching staff.
    Educator,
    /// Platform administrator.
    Admin,
}

impl Role {
    /// Lowercase wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Educator => "educator",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SessionValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "educator" => Ok(Self::Educator),
            "admin" => Ok(Self::Admin),
            _ => Err(SessionValidationError::UnknownRole {
                role: raw.to_owned(),
            }),
        }
    }
}

/// Validation errors raised while assembling a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionValidationError {
    /// User id was missing or blank.
    #[error("session user id must not be empty")]
    EmptyUserId,
    /// Cookie name was missing or blank.
    #[error("session cookie name must not be empty")]
    EmptyCookieName,
    /// Cookie value was empty.
    #[error("session cookie value must not be empty")]
    EmptyCookieValue,
    /// Role string did not name a known role.
    #[error("unknown role `{role}`")]
    UnknownRole {
        /// Raw role string as supplied.
        role: String,
    },
}

/// Session cookie propagated with every request.
///
/// The value is zeroed on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCookie {
    name: String,
    value: Zeroizing<String>,
}

impl SessionCookie {
    /// Build a cookie from its name and opaque value.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, SessionValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SessionValidationError::EmptyCookieName);
        }
        let value = value.into();
        if value.is_empty() {
            return Err(SessionValidationError::EmptyCookieValue);
        }
        Ok(Self {
            name,
            value: Zeroizing::new(value),
        })
    }

    /// Cookie name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Render the `name=value` pair used in a `Cookie` header.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("{}={}", self.name, self.value.as_str())
    }
}

impl fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCookie")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// Opaque proof of an authenticated user.
///
/// ## Invariants
/// - `user_id` is non-blank.
/// - A session past `expires_at` is treated exactly like an absent one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: String,
    role: Role,
    cookie: SessionCookie,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Assemble a session for `user_id` with the given role and cookie.
    ///
    /// # Examples
    /// ```
    /// use dashboard_client::domain::{Role, Session, SessionCookie};
    ///
    /// let cookie = SessionCookie::new("next-auth.session-token", "abc").unwrap();
    /// let session = Session::new("stu-42", Role::Student, cookie).unwrap();
    /// assert_eq!(session.user_id(), "stu-42");
    /// ```
    pub fn new(
        user_id: impl Into<String>,
        role: Role,
        cookie: SessionCookie,
    ) -> Result<Self, SessionValidationError> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(SessionValidationError::EmptyUserId);
        }
        Ok(Self {
            user_id,
            role,
            cookie,
            expires_at: None,
        })
    }

    /// Attach the instant after which the provider considers the session dead.
    #[must_use]
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Identifier of the session user.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Role of the session user.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Cookie that must ride along with every request.
    #[must_use]
    pub const fn cookie(&self) -> &SessionCookie {
        &self.cookie
    }

    /// Expiry instant, if the provider supplied one.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Whether the session has lapsed at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }
}

/// Caller-side view of the current session, threaded into every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext(Option<Session>);

impl SessionContext {
    /// Context carrying an authenticated session.
    #[must_use]
    pub const fn authenticated(session: Session) -> Self {
        Self(Some(session))
    }

    /// Context with no session at all.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self(None)
    }

    /// Ask the provider for the current session.
    pub async fn resolve<P>(provider: &P) -> Result<Self, SessionProviderError>
    where
        P: SessionProvider + ?Sized,
    {
        provider.current_session().await.map(Self)
    }

    /// Session, if one is present (expired or not).
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.0.as_ref()
    }
}

impl From<Option<Session>> for SessionContext {
    fn from(value: Option<Session>) -> Self {
        Self(value)
    }
}

/// Confirm a live session exists and return it.
///
/// Read-only; fails with [`ClientError::Unauthenticated`] when the context is
/// anonymous or its session expired at `now`.
pub fn ensure_authenticated(
    ctx: &SessionContext,
    now: DateTime<Utc>,
) -> Result<&Session, ClientError> {
    match ctx.session() {
        Some(session) if !session.is_expired_at(now) => Ok(session),
        _ => Err(ClientError::Unauthenticated),
    }
}
