use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::{CodeLanguage, Message, TargetLanguage, Tool, ToolSelection};
use crate::session::ChatSession;
use crate::storage::LocalSessionStore;

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Shared application state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    pub chat: RwSignal<ChatSession<LocalSessionStore>>,

    // --- Read signals (for components to subscribe to) ---
    pub tool: ReadSignal<Tool>,
    pub target_language: ReadSignal<TargetLanguage>,
    pub code_language: ReadSignal<CodeLanguage>,

    // --- Write signals (for mutating state) ---
    pub set_tool: WriteSignal<Tool>,
    pub set_target_language: WriteSignal<TargetLanguage>,
    pub set_code_language: WriteSignal<CodeLanguage>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let chat = RwSignal::new(ChatSession::new(LocalSessionStore));
        let (tool, set_tool) = signal(Tool::default());
        let (target_language, set_target_language) = signal(TargetLanguage::default());
        let (code_language, set_code_language) = signal(CodeLanguage::default());

        let state = Self {
            chat,
            tool,
            target_language,
            code_language,
            set_tool,
            set_target_language,
            set_code_language,
        };

        provide_context(state);
        state
    }

    pub fn messages(&self) -> Vec<Message> {
        self.chat.with(|c| c.messages().to_vec())
    }

    pub fn is_pending(&self) -> bool {
        self.chat.with(|c| c.is_pending())
    }

    pub fn short_session_id(&self) -> Option<String> {
        self.chat.with(|c| c.short_session_id())
    }

    fn selection(&self) -> ToolSelection {
        ToolSelection {
            tool: self.tool.get_untracked(),
            target_language: self.target_language.get_untracked(),
            code_language: self.code_language.get_untracked(),
        }
    }

    /// Pick up the session saved by a previous visit and load its history.
    pub fn restore_session(&self) {
        let Some((ticket, id)) = self.chat.try_update(|c| c.restore()).flatten() else {
            return;
        };
        log::debug!("Restoring session {id}");

        let chat = self.chat;
        spawn_local(async move {
            let result = api::load_history(&id).await;
            match &result {
                Ok(history) => log::debug!("Loaded {} messages", history.len()),
                Err(e) if e.is_status() => log::info!("Session {id} no longer available: {e}"),
                Err(e) => log::warn!("Failed to restore session: {e}"),
            }
            chat.update(|c| c.apply_history(ticket, result));
        });
    }

    /// Send one message. Returns `false` when nothing was sent (blank input
    /// or a reply still pending), so the caller can keep the input text.
    pub fn send_message(&self, text: &str) -> bool {
        let selection = self.selection();
        let Some((ticket, params)) = self
            .chat
            .try_update(|c| c.begin_submit(text, &selection, now_ms()))
            .flatten()
        else {
            return false;
        };

        let chat = self.chat;
        spawn_local(async move {
            let result = api::send_chat(&params).await;
            if let Err(e) = &result {
                log::error!("Chat request failed: {e}");
            }
            chat.update(|c| c.finish_submit(ticket, result, now_ms()));
        });
        true
    }

    pub fn start_new_session(&self) {
        log::debug!("Starting a new session");
        self.chat.update(|c| c.start_new());
    }
}
