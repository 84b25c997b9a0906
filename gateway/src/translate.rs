//! Pure translation between the OpenAI chat surface and A2A `message/send`.
//!
//! Both directions are free of I/O so the mapping laws can be tested without
//! a server in the loop.

use std::time::{SystemTime, UNIX_EPOCH};

use a2a_wire::{
    Message, MessageRole, MessageSendParams, Part, SendMessageRequest, SendMessageResult,
    SendMessageSuccessResponse, MESSAGE_KIND,
};
use serde_json::Map;
use uuid::Uuid;

use crate::openai::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Map an OpenAI chat request onto an A2A `message/send` envelope.
///
/// Only the last element of `messages` is carried to the agent; the wider
/// history is represented by `conversation_id` (which becomes the message's
/// `contextId`), not re-played into the envelope. Returns `None` when
/// `messages` is empty.
pub fn openai_to_a2a(
    request: &ChatCompletionRequest,
    conversation_id: &str,
) -> Option<SendMessageRequest> {
    let last = request.messages.last()?;

    let message = Message {
        kind: MESSAGE_KIND.to_string(),
        message_id: Uuid::new_v4().to_string(),
        role: MessageRole::User,
        parts: vec![Part::text(last.content.clone())],
        context_id: Some(conversation_id.to_string()),
        task_id: None,
        metadata: None,
    };

    Some(SendMessageRequest::new(MessageSendParams {
        message,
        metadata: Map::new(),
    }))
}

/// Map an A2A `message/send` success envelope back onto an OpenAI chat
/// completion, echoing the originally requested `model`.
pub fn a2a_to_openai(
    response: &SendMessageSuccessResponse,
    model: &str,
) -> ChatCompletionResponse {
    let content = extract_content(&response.result);

    ChatCompletionResponse {
        id: Uuid::new_v4().to_string(),
        object: "chat.completion".to_string(),
        created: epoch_seconds(),
        model: model.to_string(),
        choices: vec![ChatChoice {
            index: 0,
            message: ChatMessage {
                role: "assistant".to_string(),
                content,
            },
            finish_reason: "stop".to_string(),
        }],
    }
}

/// Pull the chat content out of a `message/send` result.
///
/// Artifacts are preferred: every text part of every artifact, in order.
/// Without artifacts, the history is walked from the end and the most recent
/// agent message supplies its text parts. Non-text parts are skipped in both
/// passes. If neither yields anything the content is the empty string.
fn extract_content(result: &SendMessageResult) -> String {
    let mut content = String::new();

    for artifact in &result.artifacts {
        for part in &artifact.parts {
            if let Some(text) = part.as_text() {
                content.push_str(text);
            }
        }
    }
    if !content.is_empty() {
        return content;
    }

    for message in result.history.iter().rev() {
        if message.role != MessageRole::Agent {
            continue;
        }
        for part in &message.parts {
            if let Some(text) = part.as_text() {
                content.push_str(text);
            }
        }
        break;
    }

    content
}

fn epoch_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or_default()
}
