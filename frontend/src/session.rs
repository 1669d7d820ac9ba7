//! Chat state without any I/O: the network calls happen in `state`, which
//! feeds their results back in here.

use crate::errors::ApiError;
use crate::models::{ChatParams, ChatReply, Message, ToolSelection};
use crate::storage::SessionStore;

/// Identifies the state a request was issued from. A result whose ticket no
/// longer matches is stale and gets dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Conversation shown on screen plus the session it belongs to.
#[derive(Clone, Debug)]
pub struct ChatSession<S> {
    messages: Vec<Message>,
    session_id: Option<String>,
    pending: bool,
    /// Bumped by every submission and by "new chat".
    generation: u64,
    store: S,
}

impl<S: SessionStore> ChatSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            messages: Vec::new(),
            session_id: None,
            pending: false,
            generation: 0,
            store,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// First eight characters of the session id, for the status badge.
    pub fn short_session_id(&self) -> Option<String> {
        self.session_id().map(|id| id.chars().take(8).collect())
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn ticket(&self) -> Ticket {
        Ticket(self.generation)
    }

    fn advance(&mut self) -> Ticket {
        self.generation += 1;
        self.ticket()
    }

    /// Adopts the stored session id, if any. The caller fetches its history
    /// and hands the outcome to [`ChatSession::apply_history`].
    pub fn restore(&mut self) -> Option<(Ticket, String)> {
        let id = self.store.load()?;
        self.session_id = Some(id.clone());
        Some((self.ticket(), id))
    }

    /// Ignored once the user has sent a message or started a new chat since
    /// the matching [`ChatSession::restore`].
    pub fn apply_history(&mut self, ticket: Ticket, result: Result<Vec<Message>, ApiError>) {
        if ticket != self.ticket() {
            log::debug!("Dropping history that arrived after the conversation moved on");
            return;
        }
        match result {
            Ok(history) => self.messages = history,
            Err(_) => {
                self.store.clear();
                self.session_id = None;
                self.messages.clear();
            }
        }
    }

    /// Validates the input and records the user message. Returns the request
    /// to send, or `None` when there is nothing to do.
    pub fn begin_submit(
        &mut self,
        input: &str,
        selection: &ToolSelection,
        now_ms: u64,
    ) -> Option<(Ticket, ChatParams)> {
        let text = input.trim();
        if text.is_empty() || self.pending {
            return None;
        }

        self.messages.push(Message::user(text, now_ms));
        self.pending = true;
        let params = selection.request(text.to_string(), self.session_id.clone());
        Some((self.advance(), params))
    }

    /// A result for a request issued before "new chat" is dropped.
    pub fn finish_submit(
        &mut self,
        ticket: Ticket,
        result: Result<ChatReply, ApiError>,
        now_ms: u64,
    ) {
        if ticket != self.ticket() {
            log::debug!("Dropping reply for an abandoned conversation");
            return;
        }
        self.pending = false;
        match result {
            Ok(reply) => {
                if !reply.session_id.is_empty()
                    && self.session_id.as_deref() != Some(reply.session_id.as_str())
                {
                    self.store.save(&reply.session_id);
                    self.session_id = Some(reply.session_id);
                }
                self.messages.push(Message::assistant(reply.reply, now_ms));
            }
            Err(e) => {
                self.messages
                    .push(Message::assistant(format!("Error: {e}"), now_ms));
            }
        }
    }

    /// Forgets the current conversation, locally and in storage. Requests
    /// still in flight no longer count.
    pub fn start_new(&mut self) {
        self.advance();
        self.pending = false;
        self.messages.clear();
        self.session_id = None;
        self.store.clear();
    }
}
