use serde::{Deserialize, Serialize};

/// Who authored a message. The backend calls the assistant side `"ai"`.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "ai", alias = "assistant")]
    Assistant,
}

/// A single entry in the conversation, as displayed and as returned by the
/// history endpoint.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Message {
    #[serde(rename = "type")]
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl Message {
    pub fn user(content: impl Into<String>, now_ms: u64) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            id: Some(now_ms.to_string()),
            timestamp: Some(now_ms),
        }
    }

    /// Assistant messages created locally get `now + 1` as id so they never
    /// collide with the user message sent in the same millisecond.
    pub fn assistant(content: impl Into<String>, now_ms: u64) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            id: Some((now_ms + 1).to_string()),
            timestamp: Some(now_ms),
        }
    }
}

/// Processing mode selected in the toolbar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    #[default]
    General,
    Summarize,
    Translate,
    Code,
    Explain,
    Flirt,
    Funny,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::General,
        Tool::Summarize,
        Tool::Translate,
        Tool::Code,
        Tool::Explain,
        Tool::Flirt,
        Tool::Funny,
    ];

    /// Value sent in the `tool` field. General chat is the empty string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::General => "",
            Tool::Summarize => "summarize",
            Tool::Translate => "translate",
            Tool::Code => "code",
            Tool::Explain => "explain",
            Tool::Flirt => "flirt",
            Tool::Funny => "funny",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tool::General => "💬 General Chat",
            Tool::Summarize => "📄 Text Summary",
            Tool::Translate => "🌍 Translation",
            Tool::Code => "💻 Code Generation",
            Tool::Explain => "💡 Explanation",
            Tool::Flirt => "💘 Flirty Reply",
            Tool::Funny => "😂 Funny Reply",
        }
    }

    /// Inverse of [`Tool::as_str`]; unknown values fall back to general chat.
    pub fn from_wire(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == value)
            .unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetLanguage {
    #[default]
    Chinese,
    English,
    Japanese,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 3] = [
        TargetLanguage::Chinese,
        TargetLanguage::English,
        TargetLanguage::Japanese,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLanguage::Chinese => "Chinese",
            TargetLanguage::English => "English",
            TargetLanguage::Japanese => "Japanese",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TargetLanguage::Chinese => "🇨🇳 Chinese",
            TargetLanguage::English => "🇺🇸 English",
            TargetLanguage::Japanese => "🇯🇵 Japanese",
        }
    }

    pub fn from_wire(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == value)
            .unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CodeLanguage {
    #[default]
    Python,
    JavaScript,
    Java,
}

impl CodeLanguage {
    pub const ALL: [CodeLanguage; 3] = [
        CodeLanguage::Python,
        CodeLanguage::JavaScript,
        CodeLanguage::Java,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CodeLanguage::Python => "Python",
            CodeLanguage::JavaScript => "JavaScript",
            CodeLanguage::Java => "Java",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CodeLanguage::Python => "🐍 Python",
            CodeLanguage::JavaScript => "⚡ JavaScript",
            CodeLanguage::Java => "☕ Java",
        }
    }

    pub fn from_wire(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == value)
            .unwrap_or_default()
    }
}

/// Toolbar state at the moment a message is sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToolSelection {
    pub tool: Tool,
    pub target_language: TargetLanguage,
    pub code_language: CodeLanguage,
}

impl ToolSelection {
    /// Builds the request body. Language fields only ride along with the tool
    /// that uses them.
    pub fn request(&self, message: String, session_id: Option<String>) -> ChatParams {
        ChatParams {
            message,
            tool: self.tool.as_str().to_string(),
            target_language: (self.tool == Tool::Translate)
                .then(|| self.target_language.as_str().to_string()),
            language: (self.tool == Tool::Code).then(|| self.code_language.as_str().to_string()),
            session_id: session_id.filter(|id| !id.is_empty()),
        }
    }
}

/// Request body for `POST /api/chat`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChatParams {
    pub message: String,
    pub tool: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Response from `POST /api/chat`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChatReply {
    pub reply: String,
    #[serde(default)]
    pub session_id: String,
}

/// Response from `GET /api/session/{id}/history`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<Message>,
}
