//! Stake pool HTTP clients
//!
//! Typed `reqwest` clients for the backend API (`auth/signout`, `health`)
//! and the authentication provider's REST routes, with adapters for the
//! session core's [`stakepool_core::SignOutApi`] and
//! [`stakepool_core::AuthProvider`] seams.

pub mod client;

pub use client::{
    AuthenticatedClient, ClientError, ProviderClient, PublicClient, TypedClientBuilder,
};
