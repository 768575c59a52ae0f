//! Idle timer and countdown coordinator
//!
//! The coordinator owns the only idle-timeout slot and the only countdown
//! slot. Re-arming always emits a cancel for the old timer before the new arm,
//! and every timer carries a [`TimerToken`] so a late callback from a timer
//! that was already replaced is dropped instead of acting twice.

use crate::config::SessionConfig;
use crate::effect::{SessionEffect, TimerToken};
use tracing::{debug, info};

/// Lifecycle of the idle coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdlePhase {
    /// No token held; no listener, no timers
    Dormant,
    /// Idle timer armed from the last qualifying click
    Active,
    /// Countdown dialog visible
    Warning { seconds_remaining: i32 },
    /// Terminal, logout in progress
    LoggedOut,
}

/// Render projection of the idle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleView {
    pub phase: IdlePhase,
    pub dialog_visible: bool,
    /// Countdown as displayed, never below zero
    pub seconds_remaining: u32,
}

pub struct IdleCoordinator {
    idle_timeout: std::time::Duration,
    countdown_tick: std::time::Duration,
    countdown_seconds: i32,
    zero_grace: bool,
    phase: IdlePhase,
    listening: bool,
    idle_timer: Option<TimerToken>,
    countdown_timer: Option<TimerToken>,
    next_token: u64,
}

impl IdleCoordinator {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            idle_timeout: config.idle_timeout(),
            countdown_tick: config.countdown_tick(),
            countdown_seconds: i32::try_from(config.countdown_seconds).unwrap_or(i32::MAX),
            zero_grace: config.zero_grace,
            phase: IdlePhase::Dormant,
            listening: false,
            idle_timer: None,
            countdown_timer: None,
            next_token: 0,
        }
    }

    pub const fn phase(&self) -> IdlePhase {
        self.phase
    }

    pub const fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn view(&self) -> IdleView {
        match self.phase {
            IdlePhase::Warning { seconds_remaining } => IdleView {
                phase: self.phase,
                dialog_visible: true,
                seconds_remaining: u32::try_from(seconds_remaining.max(0)).unwrap_or(0),
            },
            _ => IdleView {
                phase: self.phase,
                dialog_visible: false,
                seconds_remaining: 0,
            },
        }
    }

    /// A token is now held on a mounted surface
    pub fn activate(&mut self, effects: &mut Vec<SessionEffect>) {
        if self.phase != IdlePhase::Dormant {
            return;
        }
        info!("Idle supervision started");
        self.phase = IdlePhase::Active;
        self.attach(effects);
        self.arm_idle(effects);
    }

    /// Token lost or last surface gone; back to dormant
    pub fn deactivate(&mut self, effects: &mut Vec<SessionEffect>) {
        if matches!(self.phase, IdlePhase::Dormant | IdlePhase::LoggedOut) {
            return;
        }
        info!("Idle supervision stopped");
        self.release(effects);
        self.phase = IdlePhase::Dormant;
    }

    /// Enter the terminal state, releasing every timer and the listener
    pub fn shutdown(&mut self, effects: &mut Vec<SessionEffect>) {
        if self.phase == IdlePhase::LoggedOut {
            return;
        }
        self.release(effects);
        self.phase = IdlePhase::LoggedOut;
    }

    /// Document click. Only re-arms while `Active`; the warning dialog is
    /// modal and only extend or expiry leave it.
    pub fn record_activity(&mut self, effects: &mut Vec<SessionEffect>) {
        if self.phase == IdlePhase::Active {
            self.arm_idle(effects);
        }
    }

    /// Idle timeout fired
    pub fn idle_elapsed(&mut self, token: TimerToken, effects: &mut Vec<SessionEffect>) {
        if self.phase != IdlePhase::Active || self.idle_timer != Some(token) {
            debug!("Ignoring stale idle timeout {token}");
            return;
        }
        // A fired timeout is no longer pending
        self.idle_timer = None;
        info!(
            "No activity for {:?}, showing {}s countdown",
            self.idle_timeout, self.countdown_seconds
        );
        self.phase = IdlePhase::Warning {
            seconds_remaining: self.countdown_seconds,
        };
        self.start_countdown(effects);
    }

    /// Countdown tick. Returns true exactly once, on the tick that expires
    /// the session.
    pub fn countdown_tick(&mut self, token: TimerToken, effects: &mut Vec<SessionEffect>) -> bool {
        let IdlePhase::Warning { seconds_remaining } = self.phase else {
            debug!("Ignoring countdown tick {token} outside warning");
            return false;
        };
        if self.countdown_timer != Some(token) {
            debug!("Ignoring stale countdown tick {token}");
            return false;
        }

        let seconds_remaining = seconds_remaining - 1;
        let expired = if self.zero_grace {
            seconds_remaining < 0
        } else {
            seconds_remaining <= 0
        };

        if expired {
            info!("Countdown expired, forcing logout");
            self.shutdown(effects);
            return true;
        }

        debug!("Countdown at {seconds_remaining}s");
        self.phase = IdlePhase::Warning { seconds_remaining };
        false
    }

    /// Dialog extend action
    pub fn extend(&mut self, effects: &mut Vec<SessionEffect>) {
        let IdlePhase::Warning { seconds_remaining } = self.phase else {
            debug!("Extend outside warning ignored");
            return;
        };
        info!("Session extended with {}s remaining", seconds_remaining.max(0));
        self.cancel_countdown(effects);
        self.phase = IdlePhase::Active;
        self.arm_idle(effects);
    }

    fn attach(&mut self, effects: &mut Vec<SessionEffect>) {
        if !self.listening {
            self.listening = true;
            effects.push(SessionEffect::AttachActivityListener);
        }
    }

    fn release(&mut self, effects: &mut Vec<SessionEffect>) {
        self.cancel_idle(effects);
        self.cancel_countdown(effects);
        if self.listening {
            self.listening = false;
            effects.push(SessionEffect::DetachActivityListener);
        }
    }

    fn arm_idle(&mut self, effects: &mut Vec<SessionEffect>) {
        self.cancel_idle(effects);
        let token = self.issue_token();
        self.idle_timer = Some(token);
        debug!("Arming idle timeout {token} for {:?}", self.idle_timeout);
        effects.push(SessionEffect::ArmIdleTimeout {
            token,
            after: self.idle_timeout,
        });
    }

    fn cancel_idle(&mut self, effects: &mut Vec<SessionEffect>) {
        if self.idle_timer.take().is_some() {
            effects.push(SessionEffect::CancelIdleTimeout);
        }
    }

    fn start_countdown(&mut self, effects: &mut Vec<SessionEffect>) {
        self.cancel_countdown(effects);
        let token = self.issue_token();
        self.countdown_timer = Some(token);
        effects.push(SessionEffect::StartCountdown {
            token,
            every: self.countdown_tick,
        });
    }

    fn cancel_countdown(&mut self, effects: &mut Vec<SessionEffect>) {
        if self.countdown_timer.take().is_some() {
            effects.push(SessionEffect::CancelCountdown);
        }
    }

    fn issue_token(&mut self) -> TimerToken {
        self.next_token += 1;
        TimerToken(self.next_token)
    }
}
