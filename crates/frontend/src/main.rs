mod app;
mod layouts;
mod pages;

use app::App;
use stakepool_frontend_common::logging::init_logging;

fn main() {
    init_logging();
    yew::Renderer::<App>::new().render();
}
