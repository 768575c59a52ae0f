//! Client configuration and initialization

use once_cell::sync::Lazy;
pub use stakepool_http::ClientError;
use stakepool_http::{ProviderClient, PublicClient, TypedClientBuilder};
use std::sync::Mutex;
use web_sys::window;

/// Global client instances
static PUBLIC_CLIENT: Lazy<Mutex<Option<PublicClient>>> = Lazy::new(|| Mutex::new(None));
static PROVIDER_CLIENT: Lazy<Mutex<Option<ProviderClient>>> = Lazy::new(|| Mutex::new(None));

/// Origin of the page, empty outside a browser
pub fn get_origin() -> String {
    window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

fn poisoned() -> ClientError {
    ClientError::Configuration("client lock poisoned".into())
}

/// Install the clients for the configured endpoints
pub fn init_clients(api_base_url: &str, provider_origin: &str) -> Result<(), ClientError> {
    let public = TypedClientBuilder::new()
        .base_url(api_base_url)
        .build_public()?;
    let provider = ProviderClient::new(provider_origin)?;

    *PUBLIC_CLIENT.lock().map_err(|_| poisoned())? = Some(public);
    *PROVIDER_CLIENT.lock().map_err(|_| poisoned())? = Some(provider);
    Ok(())
}

/// Client for the backend API
pub fn create_public_client() -> Result<PublicClient, ClientError> {
    PUBLIC_CLIENT
        .lock()
        .map_err(|_| poisoned())?
        .clone()
        .ok_or_else(|| ClientError::Configuration("API client not initialized".into()))
}

/// Client for the authentication provider
pub fn create_provider_client() -> Result<ProviderClient, ClientError> {
    PROVIDER_CLIENT
        .lock()
        .map_err(|_| poisoned())?
        .clone()
        .ok_or_else(|| ClientError::Configuration("provider client not initialized".into()))
}
