//! Backend API endpoints used by the session layer

use super::{
    error::ClientError,
    typed::{AuthenticatedClient, PublicClient},
};
use async_trait::async_trait;
use reqwest::header;
use stakepool_core::{SessionError, SessionResult, SignOutApi};
use tracing::debug;

impl PublicClient {
    /// Health check; any 2xx means the API is operational
    pub async fn health(&self) -> Result<(), ClientError> {
        let request = self.request(reqwest::Method::GET, "/health");
        self.execute_empty(request).await
    }
}

impl AuthenticatedClient {
    /// Invalidate the bearer token on the server. The endpoint takes no body
    /// but expects a JSON content type.
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        let request = self
            .request(reqwest::Method::POST, "/auth/signout")
            .header(header::CONTENT_TYPE, "application/json");
        self.execute_empty(request).await
    }
}

#[async_trait(?Send)]
impl SignOutApi for PublicClient {
    async fn sign_out(&self, bearer: &str) -> SessionResult<()> {
        debug!("Calling backend sign-out");
        self.authenticate(bearer)
            .sign_out()
            .await
            .map_err(|err| SessionError::sign_out_failed(err.to_string()))
    }
}
