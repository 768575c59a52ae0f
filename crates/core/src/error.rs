//! Session error taxonomy shared across crates

/// Standard result type for session operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Failures the session core can observe.
///
/// None of these are shown to the user. Provider failures on a poll resolve to
/// a forced logout; everything else is logged and swallowed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, thiserror::Error)]
pub enum SessionError {
    #[error("Authentication provider unavailable: {message}")]
    ProviderUnavailable { message: String },

    #[error("Sign-out request failed: {message}")]
    SignOutFailed { message: String },

    #[error("Storage unavailable: {message}")]
    Storage { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl SessionError {
    /// Create a provider error
    pub fn provider_unavailable(message: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            message: message.into(),
        }
    }

    /// Create a sign-out error
    pub fn sign_out_failed(message: impl Into<String>) -> Self {
        Self::SignOutFailed {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        Self::provider_unavailable(format!("malformed provider payload: {err}"))
    }
}
