mod api;
mod components;
mod errors;
mod models;
mod session;
mod state;
mod storage;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::chat::ChatArea;
use components::toolbar::Toolbar;
use state::AppState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide();

    // Resume the previous session, if the browser remembers one
    state.restore_session();

    view! {
        <div class="container">
            <header>
                <h2>"🤖 AI Assistant"</h2>
                <p class="subtitle">"Powered by Rust & Leptos"</p>
            </header>
            <Toolbar />
            <ChatArea />
        </div>
    }
}

fn main() {
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
    }
    mount_to_body(App);
}
