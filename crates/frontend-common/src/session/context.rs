//! Global session context and provider

use super::runtime::SessionRuntime;
use crate::components::IdleWarningModal;
use stakepool_core::{SessionConfig, SessionContext, SessionEvent, SessionView};
use std::rc::Rc;
use yew::prelude::*;

/// What components see of the session
#[derive(Clone)]
pub struct SessionHandle {
    runtime: Rc<SessionRuntime>,
    view: SessionView,
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.runtime, &other.runtime) && self.view == other.view
    }
}

impl SessionHandle {
    pub fn view(&self) -> &SessionView {
        &self.view
    }

    /// Current bearer token, empty when none is held
    pub fn access_token(&self) -> &str {
        &self.view.access_token
    }

    pub fn is_authenticated(&self) -> bool {
        !self.view.access_token.is_empty()
    }

    /// Typed context for data fetching
    pub fn context(&self) -> SessionContext {
        self.runtime.context()
    }

    pub fn config(&self) -> SessionConfig {
        self.runtime.config()
    }

    pub fn send(&self, event: SessionEvent) {
        self.runtime.send(event);
    }

    /// Explicit "Log Out"
    pub fn logout(&self) {
        self.send(SessionEvent::LogoutRequested);
    }

    /// Dialog's extend action
    pub fn extend(&self) {
        self.send(SessionEvent::Extend);
    }
}

#[derive(Properties)]
pub struct SessionProviderProps {
    pub runtime: Rc<SessionRuntime>,
    pub children: Children,
}

impl PartialEq for SessionProviderProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.runtime, &other.runtime) && self.children == other.children
    }
}

/// Owns the runtime for the lifetime of the application and renders the idle
/// warning above every page
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let view = use_state(|| props.runtime.view());

    {
        let runtime = props.runtime.clone();
        let view = view.clone();
        use_effect_with((), move |_| {
            let setter = view.setter();
            runtime.start(Callback::from(move |next| setter.set(next)));
            move || runtime.stop()
        });
    }

    let handle = SessionHandle {
        runtime: props.runtime.clone(),
        view: (*view).clone(),
    };

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            <IdleWarningModal />
            {props.children.clone()}
        </ContextProvider<SessionHandle>>
    }
}

/// Hook to use the session context
#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
        .expect("SessionHandle not found. Make sure to wrap your component with SessionProvider")
}
