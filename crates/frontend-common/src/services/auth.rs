//! Browser side of the authentication provider

use crate::storage::LocalStore;
use async_trait::async_trait;
use stakepool_core::{AuthProvider, Session, SessionBroadcast, SessionResult};
use stakepool_http::ProviderClient;
use tracing::{info, warn};

/// Provider adapter that also performs the client-side half of sign-out:
/// telling sibling tabs and navigating to the callback.
pub struct BrowserAuthProvider {
    client: ProviderClient,
    broadcast_key: String,
}

impl BrowserAuthProvider {
    pub fn new(client: ProviderClient, broadcast_key: impl Into<String>) -> Self {
        Self {
            client,
            broadcast_key: broadcast_key.into(),
        }
    }

    fn announce_sign_out(&self) {
        let timestamp = (js_sys::Date::now() / 1000.0) as u64;
        let message = SessionBroadcast::SignedOut.to_message(timestamp);
        if let Err(err) = LocalStore.set(&self.broadcast_key, &message) {
            warn!("Could not broadcast sign-out: {err}");
        }
    }
}

#[async_trait(?Send)]
impl AuthProvider for BrowserAuthProvider {
    async fn current_session(&self) -> SessionResult<Option<Session>> {
        self.client.current_session().await
    }

    /// Navigation happens even when the provider call fails
    async fn sign_out(&self, callback_url: &str) -> SessionResult<()> {
        let result = self.client.request_sign_out(callback_url).await;
        let target = match &result {
            Ok(url) => url.clone(),
            Err(err) => {
                warn!("Provider sign-out failed, redirecting anyway: {err}");
                callback_url.to_string()
            }
        };

        self.announce_sign_out();
        info!("Redirecting to {target}");
        if let Some(window) = web_sys::window() {
            if window.location().set_href(&target).is_err() {
                warn!("Navigation to {target} was rejected");
            }
        }

        result.map(|_| ()).map_err(Into::into)
    }
}
