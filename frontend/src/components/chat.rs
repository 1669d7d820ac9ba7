use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;

use crate::models::{Message, Role};
use crate::state::AppState;

/// Message history, "thinking" indicator and input.
#[component]
pub fn ChatArea() -> impl IntoView {
    let state = expect_context::<AppState>();
    let end_ref = NodeRef::<Div>::new();

    // Keep the newest message in view.
    Effect::new(move |_| {
        state.chat.track();
        if let Some(end) = end_ref.get() {
            let opts = web_sys::ScrollIntoViewOptions::new();
            opts.set_behavior(web_sys::ScrollBehavior::Smooth);
            end.scroll_into_view_with_scroll_into_view_options(&opts);
        }
    });

    view! {
        <div class="messages markdown-body">
            <For
                each=move || state.messages().into_iter().enumerate()
                key=|(i, m)| (*i, m.id.clone())
                let:entry
            >
                <MessageBubble message=entry.1 />
            </For>

            <Show when=move || state.is_pending()>
                <div class="message ai-message loading">"🤖 AI is thinking..."</div>
            </Show>
            <div node_ref=end_ref></div>
        </div>

        <ChatInput />
    }
}

/// A single chat message. Assistant replies arrive as rendered markdown.
#[component]
fn MessageBubble(message: Message) -> impl IntoView {
    match message.role {
        Role::User => view! {
            <div class="message user-message">"You: " {message.content}</div>
        }
        .into_any(),
        Role::Assistant => view! {
            <div class="message ai-message" inner_html=format!("AI: {}", message.content)></div>
        }
        .into_any(),
    }
}

/// Textarea, send button and session badge.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (input, set_input) = signal(String::new());

    let is_sending = move || state.is_pending();

    let send = move || {
        if state.send_message(&input.get_untracked()) {
            set_input.set(String::new());
        }
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.ctrl_key() && ev.key() == "Enter" {
            ev.prevent_default();
            send();
        }
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        send();
    };

    view! {
        <form class="input-area" on:submit=on_submit>
            <textarea
                class="textarea"
                rows="3"
                placeholder="💭 Enter your message... (Ctrl + Enter to send)"
                aria-label="Chat message input"
                prop:value=input
                on:input=move |ev| {
                    set_input.set(event_target_value(&ev));
                }
                on:keydown=on_keydown
                disabled=is_sending
            />

            <div class="button-group">
                <button
                    type="submit"
                    class="button"
                    aria-label="Send message"
                    disabled=move || is_sending() || input.get().trim().is_empty()
                >
                    {move || if is_sending() { "🤔 Thinking..." } else { "🚀 Send" }}
                </button>

                {move || {
                    state.short_session_id().map(|id| {
                        view! { <span class="session-info">"Session: " {id} "..."</span> }
                    })
                }}
            </div>
        </form>
    }
}
