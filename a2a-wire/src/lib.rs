//! # A2A (Agent2Agent) wire types
//!
//! This crate provides the Rust data structures for the slice of the
//! Agent2Agent (A2A) protocol spoken by the egress gateway: the JSON-RPC 2.0
//! `message/send` request, the task/message result envelope it returns, and
//! the content `Part` union carried by both. The types are derived from the
//! official A2A JSON Schema and are designed for serialization and
//! deserialization with `serde`.
//!
//! Response-side types are deliberately lenient: agents in the wild omit
//! optional fields, add vendor extensions, and emit content parts of kinds
//! this gateway does not know. Decoding must survive all of that, which is
//! why [`Part`] accepts raw JSON objects alongside the typed variants and
//! why [`SendMessageResult`] defaults every field it can.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// The JSON-RPC protocol version. MUST be exactly "2.0".
pub const JSONRPC_VERSION: &str = "2.0";

/// The A2A method for a non-streaming message exchange.
pub const MESSAGE_SEND_METHOD: &str = "message/send";

/// Discriminator value for message objects.
pub const MESSAGE_KIND: &str = "message";

/// Discriminator value for task objects.
pub const TASK_KIND: &str = "task";

/// Well-known path at which every agent serves its self-description card.
pub const AGENT_CARD_PATH: &str = "/.well-known/agent-card.json";

/// Represents a JSON-RPC 2.0 identifier, which can be a string, number, or null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum JsonRpcId {
    String(String),
    Integer(i64),
    Null,
}

/// Supported A2A transport protocols.
///
/// These are the only transport labels the gateway recognizes in an agent
/// card's `additionalInterfaces`; interfaces carrying any other label are
/// not representable through the gateway and get filtered out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransportProtocol {
    /// JSON-RPC 2.0 over HTTP
    #[serde(rename = "JSONRPC")]
    JsonRpc,
    /// gRPC over HTTP/2
    #[serde(rename = "GRPC")]
    Grpc,
    /// REST-style HTTP with JSON
    #[serde(rename = "HTTP+JSON")]
    HttpJson,
}

impl TransportProtocol {
    /// Parse a free-form transport label, case-insensitively.
    ///
    /// Returns `None` for labels outside the recognized set ("websocket",
    /// "sse", vendor strings, ...).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "jsonrpc" => Some(TransportProtocol::JsonRpc),
            "grpc" => Some(TransportProtocol::Grpc),
            "http+json" => Some(TransportProtocol::HttpJson),
            _ => None,
        }
    }
}

/// Identifies the sender of a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// For messages sent by the client/user.
    User,
    /// For messages sent by the agent/service.
    Agent,
}

impl PartialEq<&str> for MessageRole {
    fn eq(&self, other: &&str) -> bool {
        matches!(
            (self, *other),
            (MessageRole::User, "user")
                | (MessageRole::Agent, "agent")
                | (MessageRole::Agent, "assistant")
        )
    }
}

/// A content part whose `kind` the gateway understands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypedPart {
    /// Represents a text segment.
    Text {
        /// The string content of the text part.
        text: String,
        /// Optional metadata associated with this part.
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<HashMap<String, Value>>,
    },
    /// Represents a structured data segment (e.g., JSON).
    Data {
        /// The structured data content.
        data: Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<HashMap<String, Value>>,
    },
    /// Represents a file segment, as a URI or inline base64 bytes.
    File {
        file: Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<HashMap<String, Value>>,
    },
}

/// A discriminated union representing a part of a message or artifact.
///
/// Decoders upstream of the gateway may deliver either a properly typed
/// variant or a raw JSON object (for instance when a response passed through
/// a generic decode layer, or when the `kind` is one this crate does not
/// model). Both shapes are accepted; [`Part::as_text`] reads text content
/// out of either.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    Typed(TypedPart),
    Raw(Map<String, Value>),
}

impl Part {
    /// Build a plain text part.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Typed(TypedPart::Text {
            text: text.into(),
            metadata: None,
        })
    }

    /// The text content of this part, if it is a text part.
    ///
    /// Handles both the typed variant and a raw `{"kind":"text","text":...}`
    /// map; every other shape yields `None`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Typed(TypedPart::Text { text, .. }) => Some(text),
            Part::Typed(_) => None,
            Part::Raw(map) => {
                if map.get("kind").and_then(Value::as_str) == Some("text") {
                    map.get("text").and_then(Value::as_str)
                } else {
                    None
                }
            }
        }
    }
}

/// Represents a single message in the conversation between a user and an agent.
///
/// Doubles as the history-entry shape inside [`SendMessageResult`], where
/// agents routinely omit everything but `role` and `parts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// The type of this object, used as a discriminator. Always 'message'.
    #[serde(default = "default_message_kind")]
    pub kind: String,
    /// A unique identifier for the message, typically a UUID, generated by the sender.
    #[serde(rename = "messageId", default)]
    pub message_id: String,
    /// Identifies the sender of the message. `user` for the client, `agent` for the service.
    pub role: MessageRole,
    /// An array of content parts that form the message body.
    #[serde(default)]
    pub parts: Vec<Part>,
    /// The context identifier for this message, used to group related interactions.
    #[serde(skip_serializing_if = "Option::is_none", rename = "contextId")]
    pub context_id: Option<String>,
    /// The identifier of the task this message is part of.
    #[serde(skip_serializing_if = "Option::is_none", rename = "taskId")]
    pub task_id: Option<String>,
    /// Optional metadata for extensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

fn default_message_kind() -> String {
    MESSAGE_KIND.to_string()
}

/// Defines the parameters for a request to send a message to an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageSendParams {
    /// The message object being sent to the agent.
    pub message: Message,
    /// Optional metadata for extensions. Always present on the wire, even
    /// when empty.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// A complete A2A `message/send` JSON-RPC request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendMessageRequest {
    /// The version of the JSON-RPC protocol. MUST be exactly "2.0".
    pub jsonrpc: String,
    /// A unique identifier established by the client.
    pub id: i64,
    /// A string containing the name of the method to be invoked.
    pub method: String,
    /// The parameter values to be used during the method invocation.
    pub params: MessageSendParams,
}

impl SendMessageRequest {
    /// Wrap `params` in a `message/send` envelope.
    pub fn new(params: MessageSendParams) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: 1,
            method: MESSAGE_SEND_METHOD.to_string(),
            params,
        }
    }
}

/// Defines the lifecycle states of a Task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Submitted,
    Working,
    InputRequired,
    Completed,
    Canceled,
    Failed,
    Rejected,
    AuthRequired,
    /// Any state this crate does not model.
    #[serde(other)]
    Unknown,
}

/// Represents the status of a task at a specific point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatus {
    /// The current state of the task's lifecycle.
    pub state: TaskState,
    /// An ISO 8601 datetime string indicating when this status was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A resource generated by an agent during a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    /// A unique identifier for the artifact within the scope of the task.
    #[serde(rename = "artifactId", default)]
    pub artifact_id: String,
    /// An array of content parts that make up the artifact.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// The result of a `message/send` call.
///
/// Either a task envelope (`kind: "task"`, with `id`, `status`, optionally
/// `artifacts` and `history`) or a direct message reply (`kind: "message"`).
/// Rather than an untagged two-armed union, this is a single struct with
/// defaults: the shapes overlap heavily and the gateway only ever reads the
/// fields common to both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SendMessageResult {
    /// "task" or "message".
    #[serde(default)]
    pub kind: String,
    /// The task identifier, when the result is a task.
    #[serde(default)]
    pub id: String,
    /// Identifier grouping related tasks and messages.
    #[serde(rename = "contextId", default)]
    pub context_id: String,
    /// Artifacts generated by the agent, in generation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
    /// The conversation so far, oldest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<Message>,
    /// Current task status, when the result is a task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

/// Represents a successful JSON-RPC response for the `message/send` method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendMessageSuccessResponse {
    pub jsonrpc: String,
    pub result: SendMessageResult,
    pub id: Option<JsonRpcId>,
}

impl SendMessageSuccessResponse {
    /// Wrap `result` in a success envelope echoing request id 1.
    pub fn new(result: SendMessageResult) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result,
            id: Some(JsonRpcId::Integer(1)),
        }
    }
}
