use crate::layouts::{AdminLayout, MemberLayout};
use crate::pages::{Home, NotFound};
use stakepool_frontend_common::client::get_origin;
use stakepool_frontend_common::services::BrowserAuthProvider;
use stakepool_frontend_common::{
    AppConfig, MaintenanceGate, SessionProvider, SessionRuntime, create_provider_client,
    create_public_client, init_clients,
};
use std::rc::Rc;
use tracing::{error, info};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/account")]
    Account,
    #[at("/admin")]
    Admin,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::Account => html! { <MemberLayout /> },
        Route::Admin => html! { <AdminLayout /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

/// Configuration and the single session runtime shared by every surface
fn bootstrap() -> Result<(AppConfig, Rc<SessionRuntime>), String> {
    let config = AppConfig::from_env(&get_origin()).map_err(|e| e.to_string())?;
    init_clients(&config.api_base_url, &config.provider_origin)
        .map_err(|e| format!("Failed to initialize clients: {e}"))?;

    let provider = create_provider_client().map_err(|e| e.to_string())?;
    let api = create_public_client().map_err(|e| e.to_string())?;
    let provider = BrowserAuthProvider::new(provider, config.session.broadcast_key.clone());

    info!("Session supervision configured for {}", config.api_base_url);
    let runtime =
        SessionRuntime::with_local_store(config.session.clone(), Rc::new(provider), Rc::new(api));
    Ok((config, runtime))
}

#[function_component(App)]
pub fn app() -> Html {
    let setup = use_memo((), |_| bootstrap());

    match &*setup {
        Ok((config, runtime)) => html! {
            <SessionProvider runtime={runtime.clone()}>
                <MaintenanceGate interval_ms={config.health_check_interval_ms}>
                    <BrowserRouter>
                        <Switch<Route> render={switch} />
                    </BrowserRouter>
                </MaintenanceGate>
            </SessionProvider>
        },
        Err(message) => {
            error!("Start-up failed: {message}");
            html! {
                <div class="min-h-screen flex items-center justify-center bg-gray-50 dark:bg-gray-900">
                    <p class="text-red-700 dark:text-red-300">{"The application could not start. Please try again later."}</p>
                </div>
            }
        }
    }
}
