//! Events fed into the supervisor and the effects it asks the platform to run

use crate::broadcast::SessionBroadcast;
use crate::error::SessionResult;
use crate::types::{AuthStatus, LogoutReason, Session};
use std::fmt;
use std::time::Duration;

/// Generation number of an armed timer.
///
/// Every arm gets a fresh token; a callback carrying an old token belongs to a
/// timer that was cancelled and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Identifies one provider poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PollTicket(pub u64);

impl fmt::Display for PollTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "poll#{}", self.0)
    }
}

/// Everything the forced-logout sequence needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutPlan {
    pub reason: LogoutReason,
    /// Token for the server-side sign-out call, absent when the server no
    /// longer knows us
    pub bearer: Option<String>,
    /// Where the provider redirects after sign-out
    pub callback_url: String,
}

/// Inputs to [`crate::SessionSupervisor::handle`]
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// An authenticated surface mounted
    SurfaceMounted,
    /// An authenticated surface unmounted
    SurfaceUnmounted,
    /// The poll interval fired
    PollDue,
    /// A provider poll finished
    PollCompleted {
        ticket: PollTicket,
        result: SessionResult<Option<Session>>,
    },
    /// The provider reported a status outside the poll cycle
    StatusChanged {
        status: AuthStatus,
        session: Option<Session>,
    },
    /// Document click on an authenticated surface
    Activity,
    /// The idle timeout fired
    IdleElapsed(TimerToken),
    /// The countdown interval fired
    CountdownTick(TimerToken),
    /// The dialog's extend action
    Extend,
    /// Explicit logout from a menu
    LogoutRequested,
    /// Session event broadcast by another tab
    Broadcast(SessionBroadcast),
}

/// Work the platform driver performs, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// Start the repeating provider poll
    StartPolling { every: Duration },
    /// Stop the repeating provider poll
    StopPolling,
    /// Query the provider and report back with `PollCompleted`
    FetchSession(PollTicket),
    /// Query the provider and report back with `StatusChanged`
    RefreshStatus,
    /// Attach the document-level click listener
    AttachActivityListener,
    /// Detach the document-level click listener
    DetachActivityListener,
    /// Schedule the idle timeout
    ArmIdleTimeout { token: TimerToken, after: Duration },
    /// Cancel the pending idle timeout
    CancelIdleTimeout,
    /// Start the repeating countdown
    StartCountdown { token: TimerToken, every: Duration },
    /// Cancel the countdown
    CancelCountdown,
    /// Remove the cached customer identifier
    ClearCustomerSelection { key: String },
    /// Run the forced-logout sequence
    ForceLogout(LogoutPlan),
}
