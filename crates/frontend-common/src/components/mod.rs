mod idle_warning_modal;
mod maintenance;
mod session_surface;
mod spinner;

pub use idle_warning_modal::IdleWarningModal;
pub use maintenance::{MaintenanceFrame, MaintenanceGate};
pub use session_surface::{RequirePermission, SessionSurface};
pub use spinner::Spinner;
