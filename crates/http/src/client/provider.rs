//! REST surface of the authentication provider
//!
//! The provider is mounted under `/api/auth` on the front end's own origin.
//! Sessions come back as `{}` when nobody is signed in, and sign-out is a
//! CSRF-protected form post that answers with the URL to navigate to.

use super::{error::ClientError, typed::PublicClient};
use async_trait::async_trait;
use serde::Deserialize;
use stakepool_core::{AuthProvider, Session, SessionResult};
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsrfResponse {
    csrf_token: String,
}

#[derive(Debug, Deserialize)]
struct SignOutResponse {
    url: String,
}

/// Client for the provider's `/api/auth` routes
#[derive(Clone)]
pub struct ProviderClient {
    inner: PublicClient,
}

impl ProviderClient {
    /// `origin` is the front end's origin, e.g. `https://pool.example.com`
    pub fn new(origin: impl Into<String>) -> Result<Self, ClientError> {
        let origin = origin.into();
        let base_url = format!("{}/api/auth", origin.trim_end_matches('/'));
        Ok(Self {
            inner: PublicClient::new(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    /// Current session, `None` for the empty object or `null`
    pub async fn session(&self) -> Result<Option<Session>, ClientError> {
        let request = self.inner.request(reqwest::Method::GET, "/session");
        let value: serde_json::Value = self.inner.execute(request).await?;

        let empty = value.is_null() || value.as_object().is_some_and(serde_json::Map::is_empty);
        if empty {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    /// Token required by the provider's mutating routes
    pub async fn csrf_token(&self) -> Result<String, ClientError> {
        let request = self.inner.request(reqwest::Method::GET, "/csrf");
        let response: CsrfResponse = self.inner.execute(request).await?;
        Ok(response.csrf_token)
    }

    /// End the provider session and return the URL to navigate to
    pub async fn request_sign_out(&self, callback_url: &str) -> Result<String, ClientError> {
        let csrf_token = self.csrf_token().await?;
        let request = self
            .inner
            .request(reqwest::Method::POST, "/signout")
            .form(&[
                ("csrfToken", csrf_token.as_str()),
                ("callbackUrl", callback_url),
                ("json", "true"),
            ]);
        let response: SignOutResponse = self.inner.execute(request).await?;
        debug!("Provider sign-out redirects to {}", response.url);
        Ok(response.url)
    }
}

/// Network part of the provider contract. Navigation is left to the browser
/// adapter.
#[async_trait(?Send)]
impl AuthProvider for ProviderClient {
    async fn current_session(&self) -> SessionResult<Option<Session>> {
        Ok(self.session().await?)
    }

    async fn sign_out(&self, callback_url: &str) -> SessionResult<()> {
        self.request_sign_out(callback_url).await?;
        Ok(())
    }
}
