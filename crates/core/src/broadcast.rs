//! Cross-tab session broadcasts
//!
//! The provider writes `{"event":"session","data":{"trigger":...}}` to a
//! localStorage key whenever a tab signs out or refreshes its session. Other
//! tabs receive the write as a storage event and feed the parsed value to the
//! supervisor.

use serde::{Deserialize, Serialize};
use serde_json::json;

const SESSION_EVENT: &str = "session";
const TRIGGER_SIGNOUT: &str = "signout";
const TRIGGER_GET_SESSION: &str = "getSession";

/// Session event received from another tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBroadcast {
    /// Another tab signed out
    SignedOut,
    /// Another tab refreshed its session
    SessionChanged,
}

#[derive(Debug, Deserialize, Serialize)]
struct BroadcastMessage {
    event: String,
    #[serde(default)]
    data: BroadcastData,
    #[serde(default)]
    timestamp: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct BroadcastData {
    #[serde(default)]
    trigger: Option<String>,
}

impl SessionBroadcast {
    /// Parse a storage value. Anything unrecognised yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let message: BroadcastMessage = serde_json::from_str(raw).ok()?;
        if message.event != SESSION_EVENT {
            return None;
        }
        match message.data.trigger.as_deref() {
            Some(TRIGGER_SIGNOUT) => Some(Self::SignedOut),
            Some(TRIGGER_GET_SESSION) | None => Some(Self::SessionChanged),
            Some(_) => None,
        }
    }

    /// Serialise for writing to the broadcast key. `timestamp` is in seconds.
    pub fn to_message(self, timestamp: u64) -> String {
        let trigger = match self {
            Self::SignedOut => TRIGGER_SIGNOUT,
            Self::SessionChanged => TRIGGER_GET_SESSION,
        };
        json!({
            "event": SESSION_EVENT,
            "data": { "trigger": trigger },
            "timestamp": timestamp,
        })
        .to_string()
    }
}
