use crate::app::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="min-h-screen flex flex-col items-center justify-center bg-gray-50 dark:bg-gray-900">
            <h1 class="text-2xl font-bold text-gray-900 dark:text-white mb-4">{"Page not found"}</h1>
            <Link<Route> to={Route::Home} classes="text-blue-600 hover:text-blue-700">{"Back to Home"}</Link<Route>>
        </div>
    }
}
