//! Authenticated surfaces and permission gates

use super::Spinner;
use crate::session::use_session;
use stakepool_core::SessionEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SessionSurfaceProps {
    pub children: Children,
}

/// Registers an authenticated surface with the supervisor for as long as it
/// is mounted. Nested surfaces are counted, so layouts may wrap each other.
#[function_component(SessionSurface)]
pub fn session_surface(props: &SessionSurfaceProps) -> Html {
    let session = use_session();

    {
        let session = session.clone();
        use_effect_with((), move |_| {
            session.send(SessionEvent::SurfaceMounted);
            move || session.send(SessionEvent::SurfaceUnmounted)
        });
    }

    if session.view().logged_out {
        return html! { <Spinner label="Signing out..." full_screen={true} /> };
    }

    if !session.is_authenticated() {
        return html! { <Spinner label="Checking session..." full_screen={true} /> };
    }

    html! { <>{ props.children.clone() }</> }
}

#[derive(Properties, PartialEq)]
pub struct RequirePermissionProps {
    /// Any one of these codes grants access
    pub codes: Vec<i32>,
    pub children: Children,
}

#[function_component(RequirePermission)]
pub fn require_permission(props: &RequirePermissionProps) -> Html {
    let session = use_session();
    let context = session.context();

    if context.has_any_permission(&props.codes) {
        return html! { <>{ props.children.clone() }</> };
    }

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 dark:bg-gray-900">
            <div class="text-center">
                <h2 class="text-xl font-bold text-gray-900 dark:text-white mb-2">{"Access denied"}</h2>
                <p class="text-gray-600 dark:text-gray-400">
                    {"Your account does not have permission to view this page."}
                </p>
            </div>
        </div>
    }
}
