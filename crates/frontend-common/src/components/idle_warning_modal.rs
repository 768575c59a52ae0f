//! Idle session countdown dialog

use crate::session::use_session;
use yew::prelude::*;

/// Shown once the idle threshold passes. There is no close button and the
/// backdrop ignores clicks; "Ok" is the only way to keep the session.
#[function_component(IdleWarningModal)]
pub fn idle_warning_modal() -> Html {
    let session = use_session();
    let idle = session.view().idle;

    let on_extend = {
        let session = session.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            session.extend();
        })
    };

    if !idle.dialog_visible {
        return html! {};
    }

    html! {
        <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50"
             role="alertdialog" aria-modal="true" aria-labelledby="idle-warning-title">
            <div class="bg-white dark:bg-gray-800 rounded-lg p-6 max-w-md w-full mx-4 shadow-xl">
                <div class="flex items-center mb-4">
                    <svg class="w-8 h-8 text-yellow-500 mr-3" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2"
                            d="M12 8v4l3 3m6-3a9 9 0 11-18 0 9 9 0 0118 0z" />
                    </svg>
                    <h2 id="idle-warning-title" class="text-xl font-bold text-gray-900 dark:text-white">
                        {"Are you still there?"}
                    </h2>
                </div>

                <p class="text-gray-600 dark:text-gray-300 mb-6">
                    {"For your security you will be logged out in "}
                    <span class="font-semibold tabular-nums">{idle.seconds_remaining}</span>
                    {if idle.seconds_remaining == 1 { " second." } else { " seconds." }}
                </p>

                <button
                    onclick={on_extend}
                    class="w-full bg-blue-600 hover:bg-blue-700 text-white font-medium py-3 px-4
                           rounded-lg transition-colors"
                >
                    {"Ok"}
                </button>
            </div>
        </div>
    }
}
