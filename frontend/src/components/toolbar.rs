use leptos::prelude::*;

use crate::models::{CodeLanguage, TargetLanguage, Tool};
use crate::state::AppState;

/// "New Chat" button plus the tool and language selectors.
#[component]
pub fn Toolbar() -> impl IntoView {
    let state = expect_context::<AppState>();

    let on_new = move |_| state.start_new_session();

    view! {
        <div class="toolbar">
            <button class="button new-chat-btn" type="button" on:click=on_new>
                "🗨️ New Chat"
            </button>

            <label class="label">
                "Tools:"
                <select
                    class="select"
                    prop:value=move || state.tool.get().as_str()
                    on:change=move |ev| {
                        state.set_tool.set(Tool::from_wire(&event_target_value(&ev)));
                    }
                >
                    {Tool::ALL
                        .into_iter()
                        .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                        .collect_view()}
                </select>
            </label>

            <Show when=move || state.tool.get() == Tool::Translate>
                <label class="label">
                    "Target Language:"
                    <select
                        class="select"
                        prop:value=move || state.target_language.get().as_str()
                        on:change=move |ev| {
                            state
                                .set_target_language
                                .set(TargetLanguage::from_wire(&event_target_value(&ev)));
                        }
                    >
                        {TargetLanguage::ALL
                            .into_iter()
                            .map(|l| view! { <option value=l.as_str()>{l.label()}</option> })
                            .collect_view()}
                    </select>
                </label>
            </Show>

            <Show when=move || state.tool.get() == Tool::Code>
                <label class="label">
                    "Language:"
                    <select
                        class="select"
                        prop:value=move || state.code_language.get().as_str()
                        on:change=move |ev| {
                            state
                                .set_code_language
                                .set(CodeLanguage::from_wire(&event_target_value(&ev)));
                        }
                    >
                        {CodeLanguage::ALL
                            .into_iter()
                            .map(|l| view! { <option value=l.as_str()>{l.label()}</option> })
                            .collect_view()}
                    </select>
                </label>
            </Show>
        </div>
    }
}
