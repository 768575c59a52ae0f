//! Maintenance-mode gate driven by the API health check

use crate::services::HealthService;
use gloo::timers::callback::Interval;
use tracing::{info, warn};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MaintenanceGateProps {
    pub interval_ms: u32,
    pub children: Children,
}

fn check(operational: UseStateHandle<bool>) {
    spawn_local(async move {
        let healthy = match HealthService::new().is_operational().await {
            Ok(healthy) => healthy,
            Err(err) => {
                warn!("Health check unavailable: {err}");
                false
            }
        };
        if !healthy {
            info!("API reports maintenance");
        }
        operational.set(healthy);
    });
}

#[derive(Properties, PartialEq)]
pub struct MaintenanceFrameProps {
    pub operational: bool,
    pub children: Children,
}

/// Keeps the page mounted and lays the maintenance notice over it while the
/// API is down. The idle warning stacks above the notice.
#[function_component(MaintenanceFrame)]
pub fn maintenance_frame(props: &MaintenanceFrameProps) -> Html {
    html! {
        <>
            { props.children.clone() }
            if !props.operational {
                <div class="fixed inset-0 z-40 flex items-center justify-center bg-gray-50 dark:bg-gray-900 px-4"
                     role="status">
                    <div class="max-w-md text-center">
                        <h1 class="text-2xl font-bold text-gray-900 dark:text-white mb-4">
                            {"Scheduled maintenance"}
                        </h1>
                        <p class="text-gray-600 dark:text-gray-400">
                            {"The staking service is temporarily unavailable. This page comes back by itself as soon as the service does."}
                        </p>
                    </div>
                </div>
            }
        </>
    }
}

/// Polls the API health check and covers the page while it fails
#[function_component(MaintenanceGate)]
pub fn maintenance_gate(props: &MaintenanceGateProps) -> Html {
    let operational = use_state_eq(|| true);

    {
        let operational = operational.clone();
        use_effect_with(props.interval_ms, move |interval_ms| {
            check(operational.clone());
            let interval = Interval::new(*interval_ms, move || check(operational.clone()));
            move || drop(interval)
        });
    }

    html! {
        <MaintenanceFrame operational={*operational}>
            { props.children.clone() }
        </MaintenanceFrame>
    }
}
