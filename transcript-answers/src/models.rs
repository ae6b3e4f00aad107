use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const COMPLETION_ID: &str = "chatcmpl-local-001";
pub const MODEL_CREATED: i64 = 1_715_200_000;
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

const FALLBACK_TITLE: &str = "Video Link";

// Chat-completion wire models

/// Message author. Roles outside the common four (`developer`, `function`,
/// ...) are kept verbatim and forwarded to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
    Other(String),
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            "tool" => Role::Tool,
            _ => Role::Other(role),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::System => "system".to_string(),
            Role::User => "user".to_string(),
            Role::Assistant => "assistant".to_string(),
            Role::Tool => "tool".to_string(),
            Role::Other(role) => role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Content of the last `user` turn, the active query. `None` when there is
/// no user turn or the last one is empty; earlier turns are never consulted.
pub fn last_user_message(messages: &[ChatMessage]) -> Option<&str> {
    messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
        .filter(|content| !content.is_empty())
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

impl ChatCompletionResponse {
    pub fn from_answer(model: String, answer: String) -> Self {
        Self {
            id: COMPLETION_ID.to_string(),
            object: "chat.completion".to_string(),
            created: 0,
            model,
            choices: vec![Choice {
                index: 0,
                message: ChatMessage::assistant(answer),
                finish_reason: "stop".to_string(),
            }],
            usage: Usage::default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Choice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: String,
}

#[derive(Debug, Default, Serialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ModelList {
    pub object: String,
    pub data: Vec<ModelCard>,
}

impl ModelList {
    pub fn single(model_id: &str) -> Self {
        Self {
            object: "list".to_string(),
            data: vec![ModelCard {
                id: model_id.to_string(),
                object: "model".to_string(),
                created: MODEL_CREATED,
                owned_by: "local".to_string(),
                permission: vec![],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ModelCard {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub owned_by: String,
    pub permission: Vec<Value>,
}

// Retrieval models

/// One search hit, read from the vector index metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedPassage {
    pub text: String,
    pub title: String,
    pub link: Option<String>,
}

impl RetrievedPassage {
    /// Builds a passage from match metadata keyed `text`, `Title` and `Link`.
    pub fn from_metadata(metadata: &Value) -> Self {
        let text = metadata["text"].as_str().unwrap_or_default().to_string();
        let title = metadata["Title"]
            .as_str()
            .unwrap_or(FALLBACK_TITLE)
            .to_string();
        let link = metadata["Link"]
            .as_str()
            .filter(|link| !link.is_empty())
            .map(str::to_string);

        Self { text, title, link }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationEntry {
    pub link: String,
    pub title: String,
    pub timestamp_seconds: u64,
}

impl CitationEntry {
    pub fn to_markdown(&self) -> String {
        format!("[{}]({}&t={})", self.title, self.link, self.timestamp_seconds)
    }
}
