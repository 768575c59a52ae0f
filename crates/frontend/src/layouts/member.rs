use super::nav::NavBar;
use stakepool_frontend_common::SessionSurface;
use yew::prelude::*;

#[function_component(MemberLayout)]
pub fn member_layout() -> Html {
    html! {
        <SessionSurface>
            <div class="min-h-screen flex flex-col bg-white dark:bg-gray-900">
                <NavBar title="My Staking" />
                <main class="flex-1 p-6">
                    <p class="text-gray-600 dark:text-gray-400">
                        {"Your stakes, rewards and KYC status appear here."}
                    </p>
                </main>
            </div>
        </SessionSurface>
    }
}
