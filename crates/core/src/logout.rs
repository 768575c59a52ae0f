//! Forced-logout sequence

use crate::effect::LogoutPlan;
use crate::provider::{AuthProvider, SignOutApi};
use tracing::{info, warn};

/// Which steps of a logout actually succeeded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogoutReport {
    pub server_notified: bool,
    pub provider_signed_out: bool,
}

/// Run a [`LogoutPlan`].
///
/// Best-effort and non-retrying. When the plan carries a bearer token the
/// backend sign-out endpoint is called first; its failure is logged and the
/// provider sign-out still runs. The provider call navigates away, so the
/// backend request may be cut short by the page unload.
pub async fn run_forced_logout<A, P>(api: &A, provider: &P, plan: &LogoutPlan) -> LogoutReport
where
    A: SignOutApi + ?Sized,
    P: AuthProvider + ?Sized,
{
    let mut report = LogoutReport::default();

    if let Some(bearer) = plan.bearer.as_deref() {
        match api.sign_out(bearer).await {
            Ok(()) => report.server_notified = true,
            Err(err) => warn!("Backend sign-out failed, continuing: {err}"),
        }
    }

    match provider.sign_out(&plan.callback_url).await {
        Ok(()) => report.provider_signed_out = true,
        Err(err) => warn!("Provider sign-out failed: {err}"),
    }

    info!(
        "Logout complete ({}), server notified: {}",
        plan.reason, report.server_notified
    );
    report
}
