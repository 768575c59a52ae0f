use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity attached to a provider session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Session as reported by the authentication provider.
///
/// The provider answers `{}` when nobody is signed in, so every field is
/// optional and [`Session::access_token`] is the only thing that decides
/// whether a session is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    pub user: Option<SessionUser>,
    pub expires: Option<String>,
    pub access_token: Option<String>,
    pub permissions: Vec<i32>,
}

impl Session {
    /// Session carrying a bearer token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Attach permission codes
    #[must_use]
    pub fn with_permissions(mut self, permissions: impl Into<Vec<i32>>) -> Self {
        self.permissions = permissions.into();
        self
    }

    /// Bearer token, ignoring empty strings
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|token| !token.is_empty())
    }

    /// Whether this payload represents a signed-in principal
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

/// Provider-side session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    Loading,
    Authenticated,
    Unauthenticated,
}

/// Why a forced logout happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogoutReason {
    /// Countdown dialog ran out
    IdleExpired,
    /// Explicit "Log Out" action
    UserRequested,
    /// Provider reported no session
    SessionLost,
    /// Provider poll failed
    PollFailed,
    /// Another tab signed out
    SignedOutElsewhere,
}

impl LogoutReason {
    /// Whether the backend still accepts our token and should be told to
    /// invalidate it
    #[must_use]
    pub const fn notifies_server(self) -> bool {
        matches!(self, Self::IdleExpired | Self::UserRequested)
    }
}

impl fmt::Display for LogoutReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::IdleExpired => "idle session expired",
            Self::UserRequested => "user requested logout",
            Self::SessionLost => "provider reported no session",
            Self::PollFailed => "session poll failed",
            Self::SignedOutElsewhere => "signed out in another tab",
        };
        f.write_str(label)
    }
}

/// Typed session context handed to authenticated surfaces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub access_token: String,
    pub permissions: Vec<i32>,
    pub customer_id: Option<String>,
}

impl SessionContext {
    /// Whether a bearer token is currently held
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Check a single permission code
    pub fn has_permission(&self, code: i32) -> bool {
        self.permissions.contains(&code)
    }

    /// Check whether any of the given codes is held
    pub fn has_any_permission(&self, codes: &[i32]) -> bool {
        codes.iter().any(|code| self.has_permission(*code))
    }
}
