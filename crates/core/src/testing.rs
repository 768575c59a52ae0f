//! Virtual-time harness for the session supervisor
//!
//! [`SimulatedRuntime`] executes effects the way the browser driver does, but
//! against a fake clock: timers are entries in a list, `advance` fires them in
//! due order, and provider fetches are answered by a scripted closure. A timer
//! that leaks shows up as an extra entry.

use crate::config::SessionConfig;
use crate::effect::{LogoutPlan, PollTicket, SessionEffect, SessionEvent, TimerToken};
use crate::error::{SessionError, SessionResult};
use crate::provider::{AuthProvider, SignOutApi};
use crate::supervisor::{SessionSupervisor, SessionView};
use crate::types::{AuthStatus, Session};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

type ScriptedProvider = Box<dyn FnMut(u32) -> SessionResult<Option<Session>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Poll,
    Idle(TimerToken),
    Countdown(TimerToken),
}

#[derive(Debug)]
struct PendingTimer {
    kind: TimerKind,
    due: Duration,
    every: Option<Duration>,
}

pub struct SimulatedRuntime {
    supervisor: SessionSupervisor,
    now: Duration,
    timers: Vec<PendingTimer>,
    queue: VecDeque<SessionEvent>,
    provider: ScriptedProvider,
    hold_polls: bool,
    held_polls: Vec<PollTicket>,
    listener_attached: bool,
    fetches: u32,
    refreshes: u32,
    customer_cleared: u32,
    logouts: Vec<LogoutPlan>,
}

impl SimulatedRuntime {
    /// Runtime whose provider always returns `token`
    pub fn with_token(config: SessionConfig, token: &str) -> Self {
        let token = token.to_string();
        Self::scripted(config, move |_| Ok(Some(Session::with_token(token.clone()))))
    }

    /// Runtime whose provider answers fetch number `n` (starting at 1) with
    /// `provider(n)`
    pub fn scripted<F>(config: SessionConfig, provider: F) -> Self
    where
        F: FnMut(u32) -> SessionResult<Option<Session>> + 'static,
    {
        Self {
            supervisor: SessionSupervisor::new(config),
            now: Duration::ZERO,
            timers: Vec::new(),
            queue: VecDeque::new(),
            provider: Box::new(provider),
            hold_polls: false,
            held_polls: Vec::new(),
            listener_attached: false,
            fetches: 0,
            refreshes: 0,
            customer_cleared: 0,
            logouts: Vec::new(),
        }
    }

    /// Keep fetches outstanding until [`Self::release_poll`]
    pub fn hold_polls(&mut self, hold: bool) {
        self.hold_polls = hold;
    }

    /// Answer the oldest held fetch
    pub fn release_poll(&mut self, result: SessionResult<Option<Session>>) -> bool {
        if self.held_polls.is_empty() {
            return false;
        }
        let ticket = self.held_polls.remove(0);
        self.send(SessionEvent::PollCompleted { ticket, result });
        true
    }

    /// Feed an event and run every effect it causes
    pub fn send(&mut self, event: SessionEvent) {
        self.queue.push_back(event);
        while let Some(event) = self.queue.pop_front() {
            for effect in self.supervisor.handle(event) {
                self.apply(effect);
            }
        }
    }

    pub fn mount(&mut self) {
        self.send(SessionEvent::SurfaceMounted);
    }

    pub fn unmount(&mut self) {
        self.send(SessionEvent::SurfaceUnmounted);
    }

    /// Document click; only reaches the supervisor when the listener is
    /// attached
    pub fn click(&mut self) {
        if self.listener_attached {
            self.send(SessionEvent::Activity);
        }
    }

    /// Move the clock forward, firing due timers in order
    pub fn advance(&mut self, by: Duration) {
        let target = self.now + by;
        while let Some(index) = self.next_due(target) {
            let PendingTimer { kind, due, every } = self.timers[index];
            self.now = due;
            match every {
                Some(every) => self.timers[index].due += every,
                None => {
                    self.timers.remove(index);
                }
            }
            self.send(match kind {
                TimerKind::Poll => SessionEvent::PollDue,
                TimerKind::Idle(token) => SessionEvent::IdleElapsed(token),
                TimerKind::Countdown(token) => SessionEvent::CountdownTick(token),
            });
        }
        self.now = target;
    }

    pub fn advance_secs(&mut self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }

    pub fn advance_mins(&mut self, mins: u64) {
        self.advance(Duration::from_secs(mins * 60));
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn view(&self) -> SessionView {
        self.supervisor.view()
    }

    pub fn supervisor(&self) -> &SessionSupervisor {
        &self.supervisor
    }

    pub fn pending_idle_timeouts(&self) -> usize {
        self.count(|kind| matches!(kind, TimerKind::Idle(_)))
    }

    pub fn pending_countdowns(&self) -> usize {
        self.count(|kind| matches!(kind, TimerKind::Countdown(_)))
    }

    pub fn pending_polls(&self) -> usize {
        self.count(|kind| kind == TimerKind::Poll)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn listener_attached(&self) -> bool {
        self.listener_attached
    }

    pub fn fetches(&self) -> u32 {
        self.fetches
    }

    pub fn refreshes(&self) -> u32 {
        self.refreshes
    }

    pub fn customer_cleared(&self) -> u32 {
        self.customer_cleared
    }

    pub fn logouts(&self) -> &[LogoutPlan] {
        &self.logouts
    }

    fn next_due(&self, target: Duration) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= target)
            .min_by_key(|(index, timer)| (timer.due, *index))
            .map(|(index, _)| index)
    }

    fn count(&self, predicate: impl Fn(TimerKind) -> bool) -> usize {
        self.timers
            .iter()
            .filter(|timer| predicate(timer.kind))
            .count()
    }

    fn schedule(&mut self, kind: TimerKind, after: Duration, every: Option<Duration>) {
        self.timers.push(PendingTimer {
            kind,
            due: self.now + after,
            every,
        });
    }

    fn cancel(&mut self, predicate: impl Fn(TimerKind) -> bool) {
        self.timers.retain(|timer| !predicate(timer.kind));
    }

    fn apply(&mut self, effect: SessionEffect) {
        match effect {
            SessionEffect::StartPolling { every } => {
                self.schedule(TimerKind::Poll, every, Some(every));
            }
            SessionEffect::StopPolling => self.cancel(|kind| kind == TimerKind::Poll),
            SessionEffect::FetchSession(ticket) => {
                self.fetches += 1;
                if self.hold_polls {
                    self.held_polls.push(ticket);
                } else {
                    let result = (self.provider)(self.fetches);
                    self.queue
                        .push_back(SessionEvent::PollCompleted { ticket, result });
                }
            }
            SessionEffect::RefreshStatus => {
                self.refreshes += 1;
                let Ok(session) = (self.provider)(self.fetches + self.refreshes) else {
                    return;
                };
                let status = if session.as_ref().is_some_and(Session::is_authenticated) {
                    AuthStatus::Authenticated
                } else {
                    AuthStatus::Unauthenticated
                };
                self.queue
                    .push_back(SessionEvent::StatusChanged { status, session });
            }
            SessionEffect::AttachActivityListener => self.listener_attached = true,
            SessionEffect::DetachActivityListener => self.listener_attached = false,
            SessionEffect::ArmIdleTimeout { token, after } => {
                self.schedule(TimerKind::Idle(token), after, None);
            }
            SessionEffect::CancelIdleTimeout => {
                self.cancel(|kind| matches!(kind, TimerKind::Idle(_)));
            }
            SessionEffect::StartCountdown { token, every } => {
                self.schedule(TimerKind::Countdown(token), every, Some(every));
            }
            SessionEffect::CancelCountdown => {
                self.cancel(|kind| matches!(kind, TimerKind::Countdown(_)));
            }
            SessionEffect::ClearCustomerSelection { .. } => self.customer_cleared += 1,
            SessionEffect::ForceLogout(plan) => self.logouts.push(plan),
        }
    }
}

/// Records sign-out calls on both boundaries, in order
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: RefCell<Vec<String>>,
    fail_api: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose sign-out endpoint always fails
    pub fn failing_api() -> Self {
        Self {
            fail_api: true,
            ..Self::default()
        }
    }

    /// Calls as `api:<bearer>` and `provider:<callback>`
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn api_calls(&self) -> usize {
        self.count("api:")
    }

    pub fn redirects_to(&self, callback_url: &str) -> usize {
        let expected = format!("provider:{callback_url}");
        self.calls
            .borrow()
            .iter()
            .filter(|call| **call == expected)
            .count()
    }

    fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }
}

#[async_trait(?Send)]
impl SignOutApi for RecordingBackend {
    async fn sign_out(&self, bearer: &str) -> SessionResult<()> {
        self.calls.borrow_mut().push(format!("api:{bearer}"));
        if self.fail_api {
            return Err(SessionError::sign_out_failed("HTTP 500"));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthProvider for RecordingBackend {
    async fn current_session(&self) -> SessionResult<Option<Session>> {
        Ok(None)
    }

    async fn sign_out(&self, callback_url: &str) -> SessionResult<()> {
        self.calls
            .borrow_mut()
            .push(format!("provider:{callback_url}"));
        Ok(())
    }
}
