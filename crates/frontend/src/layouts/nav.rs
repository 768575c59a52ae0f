//! Header shared by the authenticated layouts

use stakepool_frontend_common::use_session;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct NavBarProps {
    pub title: AttrValue,
}

#[function_component(NavBar)]
pub fn nav_bar(props: &NavBarProps) -> Html {
    let session = use_session();
    let customer = session.context().customer_id;

    let on_logout = {
        let session = session.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            session.logout();
        })
    };

    html! {
        <header class="p-4 bg-gray-50 dark:bg-gray-800 border-b border-gray-200 dark:border-gray-700 flex justify-between items-center">
            <h1 class="text-lg font-semibold text-gray-900 dark:text-white">{props.title.clone()}</h1>
            <div class="flex items-center gap-4">
                if let Some(customer) = customer {
                    <span class="text-sm text-gray-600 dark:text-gray-400">{format!("Customer {customer}")}</span>
                }
                <button onclick={on_logout} class="text-gray-600 dark:text-gray-400 hover:text-gray-900 dark:hover:text-gray-100 transition-colors">
                    {"Log Out"}
                </button>
            </div>
        </header>
    }
}
