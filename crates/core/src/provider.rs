//! Boundaries to the authentication provider and the backend sign-out call

use crate::error::SessionResult;
use crate::types::Session;
use async_trait::async_trait;

/// Third-party authentication provider
#[async_trait(?Send)]
pub trait AuthProvider {
    /// Current session, `None` when nobody is signed in
    async fn current_session(&self) -> SessionResult<Option<Session>>;

    /// End the provider session and send the browser to `callback_url`
    async fn sign_out(&self, callback_url: &str) -> SessionResult<()>;
}

/// Backend endpoint that invalidates a bearer token
#[async_trait(?Send)]
pub trait SignOutApi {
    async fn sign_out(&self, bearer: &str) -> SessionResult<()>;
}
