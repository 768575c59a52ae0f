//! HTTP clients for the backend API and the authentication provider

pub mod api;
pub mod error;
pub mod provider;
pub mod typed;

pub use error::ClientError;
pub use provider::ProviderClient;
pub use typed::{AuthenticatedClient, PublicClient, TypedClientBuilder};
