//! Frontend configuration
//!
//! Values are baked in at compile time through environment variables so the
//! same bundle layout works for every deployment; anything unset falls back
//! to the session defaults.

use stakepool_core::{SessionConfig, SessionResult};

/// Health check interval in milliseconds
pub const DEFAULT_HEALTH_CHECK_INTERVAL_MS: u32 = 60_000;

/// Path of the backend API relative to the origin when no URL is configured
pub const DEFAULT_API_PATH: &str = "/api/v1";

/// Runtime configuration of the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend REST API base URL
    pub api_base_url: String,
    /// Origin hosting the authentication provider's `/api/auth` routes
    pub provider_origin: String,
    pub health_check_interval_ms: u32,
    pub session: SessionConfig,
}

impl AppConfig {
    /// Build from compile-time overrides, resolving relative URLs against
    /// `origin`
    pub fn from_env(origin: &str) -> SessionResult<Self> {
        let defaults = SessionConfig::default();
        let session = SessionConfig {
            idle_timeout_ms: parse_override(
                option_env!("STAKEPOOL_IDLE_TIMEOUT_MS"),
                defaults.idle_timeout_ms,
            ),
            countdown_seconds: parse_override(
                option_env!("STAKEPOOL_COUNTDOWN_SECONDS"),
                defaults.countdown_seconds,
            ),
            token_poll_interval_ms: parse_override(
                option_env!("STAKEPOOL_TOKEN_POLL_INTERVAL_MS"),
                defaults.token_poll_interval_ms,
            ),
            customer_key: option_env!("STAKEPOOL_CUSTOMER_KEY")
                .map_or(defaults.customer_key.clone(), str::to_string),
            ..defaults
        };
        session.validate()?;

        Ok(Self {
            api_base_url: resolve_url(option_env!("STAKEPOOL_API_URL"), origin, DEFAULT_API_PATH),
            provider_origin: resolve_url(option_env!("STAKEPOOL_AUTH_ORIGIN"), origin, ""),
            health_check_interval_ms: parse_override(
                option_env!("STAKEPOOL_HEALTH_CHECK_INTERVAL_MS"),
                DEFAULT_HEALTH_CHECK_INTERVAL_MS,
            ),
            session,
        })
    }
}

/// Parse an override, keeping the default when unset or malformed
pub fn parse_override<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Absolute URLs pass through; anything else is joined onto `origin`
pub fn resolve_url(configured: Option<&str>, origin: &str, fallback_path: &str) -> String {
    let origin = origin.trim_end_matches('/');
    match configured.map(str::trim).filter(|value| !value.is_empty()) {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            url.trim_end_matches('/').to_string()
        }
        Some(path) => format!("{origin}/{}", path.trim_matches('/')),
        None => format!("{origin}{fallback_path}"),
    }
}
