//! Stake pool session core
//!
//! Platform-independent idle-session and bearer-token supervision. The
//! browser crates drive [`SessionSupervisor`] with events and execute the
//! [`SessionEffect`]s it returns.

pub mod broadcast;
pub mod config;
pub mod customer;
pub mod effect;
pub mod error;
pub mod idle;
pub mod logout;
pub mod provider;
pub mod supervisor;
pub mod token;
pub mod types;

#[cfg(any(test, feature = "tests"))]
pub mod testing;

#[cfg(test)]
mod tests;

pub use broadcast::SessionBroadcast;
pub use config::SessionConfig;
pub use customer::{KeyValueStore, clear_customer_selection, selected_customer};
pub use effect::{LogoutPlan, PollTicket, SessionEffect, SessionEvent, TimerToken};
pub use error::{SessionError, SessionResult};
pub use idle::{IdleCoordinator, IdlePhase, IdleView};
pub use logout::{LogoutReport, run_forced_logout};
pub use provider::{AuthProvider, SignOutApi};
pub use supervisor::{SessionSupervisor, SessionView};
pub use token::{PollOutcome, StatusOutcome, TokenState};
pub use types::{AuthStatus, LogoutReason, Session, SessionContext, SessionUser};
