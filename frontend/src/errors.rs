use thiserror::Error;

/// Failure of a call to the chat backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Decode(String),

    #[error("Serialize error: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::Status(_))
    }
}
