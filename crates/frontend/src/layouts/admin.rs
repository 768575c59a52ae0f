use super::nav::NavBar;
use stakepool_frontend_common::{RequirePermission, SessionSurface, use_session};
use yew::prelude::*;

#[function_component(AdminLayout)]
pub fn admin_layout() -> Html {
    html! {
        <SessionSurface>
            <AdminContent />
        </SessionSurface>
    }
}

#[function_component(AdminContent)]
fn admin_content() -> Html {
    let codes = use_session().config().admin_permissions;

    html! {
        <RequirePermission {codes}>
            <div class="min-h-screen flex flex-col bg-white dark:bg-gray-900">
                <NavBar title="Pool Administration" />
                <main class="flex-1 p-6">
                    <p class="text-gray-600 dark:text-gray-400">
                        {"Tranche processing and member management live here."}
                    </p>
                </main>
            </div>
        </RequirePermission>
    }
}
