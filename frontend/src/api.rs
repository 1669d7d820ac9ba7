use gloo_net::http::Request;

use crate::errors::ApiError;
use crate::models::{ChatParams, ChatReply, HistoryResponse, Message};

/// Base URL of the chat API. Empty means same origin as the page.
const API_BASE: &str = match option_env!("CHAT_API_BASE") {
    Some(base) => base,
    None => "",
};

fn chat_url() -> String {
    format!("{API_BASE}/api/chat")
}

fn history_url(session_id: &str) -> String {
    format!(
        "{API_BASE}/api/session/{}/history",
        urlencoding::encode(session_id)
    )
}

/// Sends one chat turn to the backend.
pub async fn send_chat(params: &ChatParams) -> Result<ChatReply, ApiError> {
    let resp = Request::post(&chat_url())
        .json(params)
        .map_err(|e| ApiError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(ApiError::Status(resp.status()));
    }

    resp.json::<ChatReply>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Fetches the stored conversation for a session.
pub async fn load_history(session_id: &str) -> Result<Vec<Message>, ApiError> {
    let resp = Request::get(&history_url(session_id))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(ApiError::Status(resp.status()));
    }

    resp.json::<HistoryResponse>()
        .await
        .map(|body| body.history)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_url_escapes_session_id() {
        assert!(history_url("a/b c").ends_with("/api/session/a%2Fb%20c/history"));
    }

    #[test]
    fn chat_url_targets_chat_endpoint() {
        assert!(chat_url().ends_with("/api/chat"));
    }
}
