pub mod auth;
pub mod health;

pub use auth::BrowserAuthProvider;
pub use health::HealthService;
