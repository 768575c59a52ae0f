//! Session supervision for Yew applications

pub mod context;
pub mod runtime;

pub use context::{use_session, SessionHandle, SessionProvider};
pub use runtime::SessionRuntime;
