//! Browser driver for the session supervisor
//!
//! Owns every timer and listener handle the supervisor asks for. Each slot
//! holds at most one handle, and dropping a handle cancels it, so replacing a
//! slot is the cancel half of cancel-then-arm. Callbacks hold a `Weak`
//! reference and only enqueue events; the event is handled on a later
//! microtask, never inside the callback that produced it.

use crate::storage::LocalStore;
use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use stakepool_core::{
    AuthProvider, AuthStatus, KeyValueStore, SessionBroadcast, SessionConfig, SessionContext,
    SessionEffect, SessionEvent, SessionSupervisor, SessionView, SignOutApi,
    clear_customer_selection, run_forced_logout, selected_customer,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::{debug, info};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::StorageEvent;
use yew::Callback;

#[derive(Default)]
struct TimerSlots {
    poll: Option<Interval>,
    idle: Option<Timeout>,
    countdown: Option<Interval>,
    clicks: Option<EventListener>,
    broadcasts: Option<EventListener>,
}

pub struct SessionRuntime {
    this: Weak<SessionRuntime>,
    supervisor: RefCell<SessionSupervisor>,
    slots: RefCell<TimerSlots>,
    provider: Rc<dyn AuthProvider>,
    api: Rc<dyn SignOutApi>,
    store: Rc<dyn KeyValueStore>,
    on_change: RefCell<Option<Callback<SessionView>>>,
    last_view: RefCell<Option<SessionView>>,
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

impl SessionRuntime {
    pub fn new(
        config: SessionConfig,
        provider: Rc<dyn AuthProvider>,
        api: Rc<dyn SignOutApi>,
        store: Rc<dyn KeyValueStore>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            supervisor: RefCell::new(SessionSupervisor::new(config)),
            slots: RefCell::new(TimerSlots::default()),
            provider,
            api,
            store,
            on_change: RefCell::new(None),
            last_view: RefCell::new(None),
        })
    }

    /// Runtime backed by `localStorage`
    pub fn with_local_store(
        config: SessionConfig,
        provider: Rc<dyn AuthProvider>,
        api: Rc<dyn SignOutApi>,
    ) -> Rc<Self> {
        Self::new(config, provider, api, Rc::new(LocalStore))
    }

    /// Start listening for broadcasts from other tabs and report view
    /// changes to `on_change`
    pub fn start(&self, on_change: Callback<SessionView>) {
        *self.on_change.borrow_mut() = Some(on_change);

        let key = self.supervisor.borrow().config().broadcast_key.clone();
        let weak = self.this.clone();
        let listener = EventListener::new(&gloo::utils::window(), "storage", move |event| {
            let Some(event) = event.dyn_ref::<StorageEvent>() else {
                return;
            };
            if event.key().as_deref() != Some(key.as_str()) {
                return;
            }
            let Some(raw) = event.new_value() else {
                return;
            };
            match SessionBroadcast::parse(&raw) {
                Some(broadcast) => enqueue(&weak, SessionEvent::Broadcast(broadcast)),
                None => debug!("Ignoring unrecognised session broadcast"),
            }
        });
        self.slots.borrow_mut().broadcasts = Some(listener);
    }

    /// Drop every handle; nothing fires afterwards
    pub fn stop(&self) {
        *self.slots.borrow_mut() = TimerSlots::default();
        self.on_change.borrow_mut().take();
    }

    /// Queue an event for handling on the next microtask
    pub fn send(&self, event: SessionEvent) {
        enqueue(&self.this, event);
    }

    pub fn view(&self) -> SessionView {
        self.supervisor.borrow().view()
    }

    /// Typed context including the selected customer
    pub fn context(&self) -> SessionContext {
        let supervisor = self.supervisor.borrow();
        let customer = selected_customer(&*self.store, &supervisor.config().customer_key);
        supervisor.context(customer)
    }

    pub fn config(&self) -> SessionConfig {
        self.supervisor.borrow().config().clone()
    }

    fn dispatch(&self, event: SessionEvent) {
        let effects = self.supervisor.borrow_mut().handle(event);
        for effect in effects {
            self.apply(effect);
        }
        self.notify();
    }

    fn notify(&self) {
        let view = self.view();
        if self.last_view.borrow().as_ref() == Some(&view) {
            return;
        }
        *self.last_view.borrow_mut() = Some(view.clone());

        let callback = self.on_change.borrow().clone();
        if let Some(callback) = callback {
            callback.emit(view);
        }
    }

    fn apply(&self, effect: SessionEffect) {
        let weak = self.this.clone();
        match effect {
            SessionEffect::StartPolling { every } => {
                let interval = Interval::new(millis(every), move || {
                    enqueue(&weak, SessionEvent::PollDue);
                });
                self.slots.borrow_mut().poll = Some(interval);
            }
            SessionEffect::StopPolling => {
                self.slots.borrow_mut().poll.take();
            }
            SessionEffect::FetchSession(ticket) => {
                let provider = self.provider.clone();
                spawn_local(async move {
                    let result = provider.current_session().await;
                    if let Some(runtime) = weak.upgrade() {
                        runtime.dispatch(SessionEvent::PollCompleted { ticket, result });
                    }
                });
            }
            SessionEffect::RefreshStatus => {
                let provider = self.provider.clone();
                spawn_local(async move {
                    let session = match provider.current_session().await {
                        Ok(session) => session,
                        Err(err) => {
                            debug!("Status refresh failed: {err}");
                            return;
                        }
                    };
                    let status = if session.as_ref().is_some_and(|s| s.is_authenticated()) {
                        AuthStatus::Authenticated
                    } else {
                        AuthStatus::Unauthenticated
                    };
                    if let Some(runtime) = weak.upgrade() {
                        runtime.dispatch(SessionEvent::StatusChanged { status, session });
                    }
                });
            }
            SessionEffect::AttachActivityListener => {
                let listener = EventListener::new(&gloo::utils::document(), "click", move |_| {
                    enqueue(&weak, SessionEvent::Activity);
                });
                self.slots.borrow_mut().clicks = Some(listener);
            }
            SessionEffect::DetachActivityListener => {
                self.slots.borrow_mut().clicks.take();
            }
            SessionEffect::ArmIdleTimeout { token, after } => {
                let timeout = Timeout::new(millis(after), move || {
                    enqueue(&weak, SessionEvent::IdleElapsed(token));
                });
                self.slots.borrow_mut().idle = Some(timeout);
            }
            SessionEffect::CancelIdleTimeout => {
                self.slots.borrow_mut().idle.take();
            }
            SessionEffect::StartCountdown { token, every } => {
                let interval = Interval::new(millis(every), move || {
                    enqueue(&weak, SessionEvent::CountdownTick(token));
                });
                self.slots.borrow_mut().countdown = Some(interval);
            }
            SessionEffect::CancelCountdown => {
                self.slots.borrow_mut().countdown.take();
            }
            SessionEffect::ClearCustomerSelection { key } => {
                clear_customer_selection(&*self.store, &key);
            }
            SessionEffect::ForceLogout(plan) => {
                info!("Running forced logout: {}", plan.reason);
                let provider = self.provider.clone();
                let api = self.api.clone();
                spawn_local(async move {
                    run_forced_logout(&*api, &*provider, &plan).await;
                });
            }
        }
    }
}

fn enqueue(weak: &Weak<SessionRuntime>, event: SessionEvent) {
    let weak = weak.clone();
    spawn_local(async move {
        if let Some(runtime) = weak.upgrade() {
            runtime.dispatch(event);
        }
    });
}
