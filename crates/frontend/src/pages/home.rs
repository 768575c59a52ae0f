//! Public landing page, target of every forced logout

use crate::app::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <div class="min-h-screen bg-gradient-to-br from-gray-50 to-gray-100 dark:from-gray-900 dark:to-gray-800 flex items-center justify-center px-4">
            <div class="max-w-md w-full text-center">
                <h1 class="text-3xl font-bold bg-gradient-to-r from-blue-600 to-purple-600 bg-clip-text text-transparent mb-4">
                    {"Stake Pool"}
                </h1>
                <p class="text-gray-600 dark:text-gray-400 mb-8">
                    {"Stake with the pool and follow your rewards."}
                </p>
                <div class="flex flex-col gap-3">
                    <Link<Route> to={Route::Account} classes="w-full bg-blue-600 hover:bg-blue-700 text-white font-medium py-3 px-4 rounded-lg transition-colors">
                        {"Member area"}
                    </Link<Route>>
                    <Link<Route> to={Route::Admin} classes="w-full text-gray-600 dark:text-gray-400 hover:text-gray-900 dark:hover:text-gray-100 py-2">
                        {"Administration"}
                    </Link<Route>>
                </div>
            </div>
        </div>
    }
}
