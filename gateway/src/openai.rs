//! OpenAI-compatible chat-completion wire shapes.
//!
//! Deliberately narrow: only the fields this gateway consumes are modeled.
//! The full OpenAI API carries many more (tools, multi-modal content,
//! streaming options, penalties) which are not part of this surface.

use serde::{Deserialize, Serialize};

/// One turn of an OpenAI-style conversation. Also the shape of the
/// `choices[].message` object in the response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// An incoming `POST /chat/completions` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionRequest {
    /// The agent identity to route to. Required; validated by the router.
    #[serde(default)]
    pub model: String,
    /// The conversation, oldest first. Required and non-empty; only the last
    /// entry is forwarded to the agent.
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Accepted for compatibility; not forwarded to the agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Streaming is not offered by this gateway; `true` rejects the request.
    #[serde(default)]
    pub stream: bool,
}

/// A single completion choice. This gateway always emits exactly one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: String,
}

/// The `POST /chat/completions` response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionResponse {
    /// Fresh unique identifier for this completion.
    pub id: String,
    /// Always `"chat.completion"`.
    pub object: String,
    /// Epoch seconds at translation time.
    pub created: i64,
    /// Echo of the requested model.
    pub model: String,
    pub choices: Vec<ChatChoice>,
}

/// One entry of the `GET /models` listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelEntry {
    pub id: String,
    /// Always `"model"`.
    pub object: String,
    pub created: i64,
    pub owned_by: String,
}

/// The `GET /models` response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelList {
    /// Always `"list"`.
    pub object: String,
    pub data: Vec<ModelEntry>,
}
