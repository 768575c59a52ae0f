//! Local copy of the provider's bearer token

use crate::effect::PollTicket;
use crate::error::SessionResult;
use crate::types::{AuthStatus, LogoutReason, Session};
use tracing::{debug, info, warn};

/// What a finished poll means for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Result belongs to an abandoned poll
    Stale,
    /// Token stored. `acquired` is true when no token was held before.
    Refreshed { acquired: bool },
    /// Token cleared; the session must be torn down
    Lost(LogoutReason),
}

/// What a status report outside the poll cycle means for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    Unchanged,
    /// A token was stored where none was held
    Acquired,
    /// The provider no longer reports a token for the held one
    Lost,
}

/// Token mirror with single-flight polling.
///
/// At most one poll is in flight. Results carrying any other ticket are
/// dropped, which covers polls abandoned by unmount or logout.
#[derive(Debug, Default)]
pub struct TokenState {
    token: Option<String>,
    permissions: Vec<i32>,
    in_flight: Option<PollTicket>,
    next_ticket: u64,
}

impl TokenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token, or the empty string when none is held
    pub fn access_token(&self) -> &str {
        self.token.as_deref().unwrap_or_default()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn permissions(&self) -> &[i32] {
        &self.permissions
    }

    pub const fn in_flight(&self) -> Option<PollTicket> {
        self.in_flight
    }

    /// Start a poll unless one is already outstanding
    pub fn begin_poll(&mut self) -> Option<PollTicket> {
        if let Some(ticket) = self.in_flight {
            debug!("Skipping poll, {ticket} still in flight");
            return None;
        }
        self.next_ticket += 1;
        let ticket = PollTicket(self.next_ticket);
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Forget the outstanding poll so its result is ignored
    pub fn abandon_poll(&mut self) {
        if let Some(ticket) = self.in_flight.take() {
            debug!("Abandoned {ticket}");
        }
    }

    /// Apply a poll result. Provider errors are treated exactly like an
    /// absent session.
    pub fn complete_poll(
        &mut self,
        ticket: PollTicket,
        result: SessionResult<Option<Session>>,
    ) -> PollOutcome {
        if self.in_flight != Some(ticket) {
            debug!("Discarding result of stale {ticket}");
            return PollOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(Some(session)) => match session.access_token() {
                Some(token) => {
                    let acquired = self.store(token, &session.permissions);
                    PollOutcome::Refreshed { acquired }
                }
                None => {
                    info!("Provider session carries no token");
                    self.clear();
                    PollOutcome::Lost(LogoutReason::SessionLost)
                }
            },
            Ok(None) => {
                info!("Provider reports no session");
                self.clear();
                PollOutcome::Lost(LogoutReason::SessionLost)
            }
            Err(err) => {
                warn!("Session poll failed: {err}");
                self.clear();
                PollOutcome::Lost(LogoutReason::PollFailed)
            }
        }
    }

    /// Status change reported outside the poll cycle. Fills an empty local
    /// copy and clears a held one the provider no longer backs.
    pub fn observe_status(
        &mut self,
        status: AuthStatus,
        session: Option<&Session>,
    ) -> StatusOutcome {
        if status == AuthStatus::Loading {
            return StatusOutcome::Unchanged;
        }
        let reported = session
            .filter(|_| status == AuthStatus::Authenticated)
            .and_then(|session| session.access_token().map(|token| (session, token)));

        match (reported, self.token.is_some()) {
            (Some(_), true) => StatusOutcome::Unchanged,
            (Some((session, token)), false) => {
                self.store(token, &session.permissions);
                StatusOutcome::Acquired
            }
            (None, true) => {
                info!("Provider status no longer carries a token");
                self.clear();
                StatusOutcome::Lost
            }
            (None, false) => StatusOutcome::Unchanged,
        }
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.permissions.clear();
    }

    fn store(&mut self, token: &str, permissions: &[i32]) -> bool {
        let acquired = self.token.is_none();
        if acquired {
            info!("Bearer token acquired");
        } else {
            debug!("Bearer token refreshed");
        }
        self.token = Some(token.to_string());
        self.permissions = permissions.to_vec();
        acquired
    }
}
