//! Yew integration of the stake pool session core

pub mod client;
pub mod components;
pub mod config;
pub mod logging;
pub mod services;
pub mod session;
pub mod storage;

pub use client::{create_provider_client, create_public_client, init_clients};
pub use components::{IdleWarningModal, MaintenanceGate, RequirePermission, SessionSurface, Spinner};
pub use config::AppConfig;
pub use session::{use_session, SessionHandle, SessionProvider, SessionRuntime};
pub use storage::LocalStore;
