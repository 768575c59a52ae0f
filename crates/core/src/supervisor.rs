//! Unified session supervisor
//!
//! One instance lives at the application root. It combines the token mirror
//! with the idle coordinator and turns every input into an ordered list of
//! effects for the platform driver. It never touches a clock or the network.

use crate::broadcast::SessionBroadcast;
use crate::config::SessionConfig;
use crate::effect::{LogoutPlan, SessionEffect, SessionEvent};
use crate::idle::{IdleCoordinator, IdleView};
use crate::token::{PollOutcome, StatusOutcome, TokenState};
use crate::types::{LogoutReason, SessionContext};
use tracing::{debug, info};

/// Render projection of the whole session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub access_token: String,
    pub permissions: Vec<i32>,
    pub idle: IdleView,
    pub logged_out: bool,
}

pub struct SessionSupervisor {
    config: SessionConfig,
    token: TokenState,
    idle: IdleCoordinator,
    surfaces: u32,
    logged_out: Option<LogoutReason>,
}

impl SessionSupervisor {
    pub fn new(config: SessionConfig) -> Self {
        let idle = IdleCoordinator::new(&config);
        Self {
            config,
            token: TokenState::new(),
            idle,
            surfaces: 0,
            logged_out: None,
        }
    }

    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of authenticated surfaces currently mounted
    pub const fn surfaces(&self) -> u32 {
        self.surfaces
    }

    /// Reason of the logout that ended this session, if any
    pub const fn logout_reason(&self) -> Option<LogoutReason> {
        self.logged_out
    }

    pub fn token(&self) -> &TokenState {
        &self.token
    }

    pub fn idle(&self) -> &IdleCoordinator {
        &self.idle
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            access_token: self.token.access_token().to_string(),
            permissions: self.token.permissions().to_vec(),
            idle: self.idle.view(),
            logged_out: self.logged_out.is_some(),
        }
    }

    /// Typed context for authenticated surfaces
    pub fn context(&self, customer_id: Option<String>) -> SessionContext {
        SessionContext {
            access_token: self.token.access_token().to_string(),
            permissions: self.token.permissions().to_vec(),
            customer_id,
        }
    }

    /// Apply one event and return the effects to run, in order
    pub fn handle(&mut self, event: SessionEvent) -> Vec<SessionEffect> {
        let mut effects = Vec::new();

        match event {
            SessionEvent::SurfaceMounted => self.mount(&mut effects),
            SessionEvent::SurfaceUnmounted => self.unmount(&mut effects),
            SessionEvent::PollDue => self.poll(&mut effects),
            SessionEvent::PollCompleted { ticket, result } => {
                match self.token.complete_poll(ticket, result) {
                    PollOutcome::Stale => {}
                    PollOutcome::Refreshed { acquired } => {
                        if acquired {
                            self.token_acquired(&mut effects);
                        }
                    }
                    PollOutcome::Lost(reason) => self.force_logout(reason, &mut effects),
                }
            }
            SessionEvent::StatusChanged { status, session } => {
                if self.logged_out.is_none() {
                    match self.token.observe_status(status, session.as_ref()) {
                        StatusOutcome::Unchanged => {}
                        StatusOutcome::Acquired => self.token_acquired(&mut effects),
                        StatusOutcome::Lost => {
                            self.force_logout(LogoutReason::SessionLost, &mut effects);
                        }
                    }
                }
            }
            SessionEvent::Activity => self.idle.record_activity(&mut effects),
            SessionEvent::IdleElapsed(token) => self.idle.idle_elapsed(token, &mut effects),
            SessionEvent::CountdownTick(token) => {
                if self.idle.countdown_tick(token, &mut effects) {
                    self.force_logout(LogoutReason::IdleExpired, &mut effects);
                }
            }
            SessionEvent::Extend => self.idle.extend(&mut effects),
            SessionEvent::LogoutRequested => {
                self.force_logout(LogoutReason::UserRequested, &mut effects);
            }
            SessionEvent::Broadcast(SessionBroadcast::SignedOut) => {
                if self.surfaces > 0 || self.token.has_token() {
                    self.force_logout(LogoutReason::SignedOutElsewhere, &mut effects);
                } else {
                    debug!("Sign-out broadcast with nothing to tear down");
                }
            }
            SessionEvent::Broadcast(SessionBroadcast::SessionChanged) => {
                if self.logged_out.is_none() && self.surfaces > 0 {
                    effects.push(SessionEffect::RefreshStatus);
                }
            }
        }

        effects
    }

    fn mount(&mut self, effects: &mut Vec<SessionEffect>) {
        self.surfaces += 1;
        if self.surfaces > 1 {
            debug!("Surface mounted, {} active", self.surfaces);
            return;
        }
        if self.logged_out.is_some() {
            return;
        }
        info!("First authenticated surface mounted");
        effects.push(SessionEffect::StartPolling {
            every: self.config.token_poll_interval(),
        });
        self.poll(effects);
        if self.token.has_token() {
            self.idle.activate(effects);
        }
    }

    fn unmount(&mut self, effects: &mut Vec<SessionEffect>) {
        if self.surfaces == 0 {
            debug!("Unmount without a mounted surface ignored");
            return;
        }
        self.surfaces -= 1;
        if self.surfaces > 0 {
            debug!("Surface unmounted, {} still active", self.surfaces);
            return;
        }
        if self.logged_out.is_some() {
            return;
        }
        info!("Last authenticated surface unmounted");
        effects.push(SessionEffect::StopPolling);
        self.token.abandon_poll();
        self.idle.deactivate(effects);
    }

    fn poll(&mut self, effects: &mut Vec<SessionEffect>) {
        if self.surfaces == 0 || self.logged_out.is_some() {
            return;
        }
        if let Some(ticket) = self.token.begin_poll() {
            effects.push(SessionEffect::FetchSession(ticket));
        }
    }

    fn token_acquired(&mut self, effects: &mut Vec<SessionEffect>) {
        if self.surfaces > 0 {
            self.idle.activate(effects);
        }
    }

    /// Tear the session down exactly once
    fn force_logout(&mut self, reason: LogoutReason, effects: &mut Vec<SessionEffect>) {
        if let Some(previous) = self.logged_out {
            debug!("Already logged out ({previous}), ignoring {reason}");
            return;
        }
        info!("Forcing logout: {reason}");
        self.logged_out = Some(reason);

        let bearer = reason
            .notifies_server()
            .then(|| self.token.access_token().to_string())
            .filter(|token| !token.is_empty());

        self.token.abandon_poll();
        self.token.clear();
        self.idle.shutdown(effects);
        if self.surfaces > 0 {
            effects.push(SessionEffect::StopPolling);
        }
        effects.push(SessionEffect::ClearCustomerSelection {
            key: self.config.customer_key.clone(),
        });
        effects.push(SessionEffect::ForceLogout(LogoutPlan {
            reason,
            bearer,
            callback_url: self.config.home_route.clone(),
        }));
    }
}
