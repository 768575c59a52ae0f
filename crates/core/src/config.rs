//! Session supervision configuration

use crate::error::{SessionError, SessionResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Idle threshold before the countdown dialog appears (29 minutes)
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 29 * 60 * 1000;

/// Length of the countdown shown in the warning dialog
pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 10;

/// Interval between countdown decrements
pub const DEFAULT_COUNTDOWN_TICK_MS: u64 = 1000;

/// Interval between provider session polls (29 minutes)
pub const DEFAULT_TOKEN_POLL_INTERVAL_MS: u64 = 29 * 60 * 1000;

/// localStorage key holding the active customer identifier
pub const DEFAULT_CUSTOMER_KEY: &str = "customerId";

/// localStorage key the provider uses to broadcast session events across tabs
pub const DEFAULT_BROADCAST_KEY: &str = "nextauth.message";

/// Configuration for the session supervisor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Inactivity before the warning dialog is shown
    pub idle_timeout_ms: u64,
    /// Starting value of the countdown
    pub countdown_seconds: u32,
    /// Countdown decrement interval
    pub countdown_tick_ms: u64,
    /// Provider poll interval
    pub token_poll_interval_ms: u64,
    /// Route every forced logout redirects to
    pub home_route: String,
    /// Storage key of the cached customer identifier
    pub customer_key: String,
    /// Storage key of cross-tab session broadcasts
    pub broadcast_key: String,
    /// Permission codes that grant access to the admin surface
    pub admin_permissions: Vec<i32>,
    /// When true the countdown must go below zero before expiry, so "0"
    /// stays on screen for one full tick.
    pub zero_grace: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            countdown_tick_ms: DEFAULT_COUNTDOWN_TICK_MS,
            token_poll_interval_ms: DEFAULT_TOKEN_POLL_INTERVAL_MS,
            home_route: "/".to_string(),
            customer_key: DEFAULT_CUSTOMER_KEY.to_string(),
            broadcast_key: DEFAULT_BROADCAST_KEY.to_string(),
            admin_permissions: vec![1],
            zero_grace: true,
        }
    }
}

impl SessionConfig {
    /// Idle timeout as a duration
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    /// Countdown tick as a duration
    #[must_use]
    pub const fn countdown_tick(&self) -> Duration {
        Duration::from_millis(self.countdown_tick_ms)
    }

    /// Provider poll interval as a duration
    #[must_use]
    pub const fn token_poll_interval(&self) -> Duration {
        Duration::from_millis(self.token_poll_interval_ms)
    }

    /// Reject configurations the supervisor cannot run with
    pub fn validate(&self) -> SessionResult<()> {
        if self.idle_timeout_ms == 0 {
            return Err(SessionError::invalid_config(
                "idle_timeout_ms must be greater than zero",
            ));
        }
        if self.countdown_tick_ms == 0 {
            return Err(SessionError::invalid_config(
                "countdown_tick_ms must be greater than zero",
            ));
        }
        if self.token_poll_interval_ms == 0 {
            return Err(SessionError::invalid_config(
                "token_poll_interval_ms must be greater than zero",
            ));
        }
        if self.countdown_seconds == 0 && !self.zero_grace {
            return Err(SessionError::invalid_config(
                "countdown_seconds must be greater than zero without zero_grace",
            ));
        }
        if self.customer_key.trim().is_empty() {
            return Err(SessionError::invalid_config("customer_key is empty"));
        }
        if self.broadcast_key.trim().is_empty() {
            return Err(SessionError::invalid_config("broadcast_key is empty"));
        }
        if !self.home_route.starts_with('/') {
            return Err(SessionError::invalid_config(format!(
                "home_route must be an absolute path, got {:?}",
                self.home_route
            )));
        }
        Ok(())
    }
}
