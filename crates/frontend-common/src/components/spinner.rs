//! Loading spinner component

use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct SpinnerProps {
    #[prop_or_default]
    pub label: Option<AttrValue>,
    /// Center in the viewport instead of the parent
    #[prop_or_default]
    pub full_screen: bool,
}

#[function_component(Spinner)]
pub fn spinner(props: &SpinnerProps) -> Html {
    let container = if props.full_screen {
        "flex flex-col items-center justify-center min-h-screen"
    } else {
        "text-center p-10"
    };

    html! {
        <div class={container}>
            <div class="w-10 h-10 border-4 border-gray-200 dark:border-gray-700 border-t-blue-500 rounded-full animate-spin mx-auto mb-4"></div>
            if let Some(label) = &props.label {
                <p class="text-gray-600 dark:text-gray-400 text-sm">{label.clone()}</p>
            }
        </div>
    }
}
