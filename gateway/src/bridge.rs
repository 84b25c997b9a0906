//! OpenAI ↔ A2A protocol bridge interceptor.
//!
//! Exposes the OpenAI-compatible surface (`POST /chat/completions`,
//! `GET /models`) and translates each chat call, bidirectionally and in
//! full, into the A2A `message/send` exchange understood by the backing
//! agents. The `model` parameter selects the agent; routing happens by
//! swapping the request path to the resolved agent path before handing the
//! request back to the host.
//!
//! Per-request and purely functional: no state survives a call, and nothing
//! here retries or streams.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use a2a_wire::SendMessageSuccessResponse;

use crate::capture::CapturedResponse;
use crate::config::AgentRegistry;
use crate::error::{GatewayError, Result};
use crate::openai::ChatCompletionRequest;
use crate::router::resolve_backend;
use crate::{paths, translate};

/// Request header carrying the caller's conversation identifier. Becomes the
/// A2A `contextId`; a fresh UUID is generated when absent.
pub const CONVERSATION_ID_HEADER: &str = "x-conversation-id";

/// Middleware entry point.
///
/// `/models` is answered locally from the registry; `/chat/completions` is
/// bridged to the resolved agent; every other path passes through untouched.
pub async fn openai_bridge(
    State(registry): State<Arc<AgentRegistry>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();

    if paths::is_models_list(path) {
        return crate::models_list::list_models(&registry, request.method());
    }

    if !paths::is_chat_completions(path) {
        return next.run(request).await;
    }

    if request.method() != Method::POST {
        tracing::debug!("invalid method for /chat/completions: {}", request.method());
        return GatewayError::MethodNotAllowed.into_response();
    }

    match chat_completions(&registry, request, next).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// The chat-completions splice: validate, translate, reroute, forward,
/// translate back.
async fn chat_completions(
    registry: &AgentRegistry,
    request: Request,
    next: Next,
) -> Result<Response> {
    let (mut parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX)
        .await
        .map_err(GatewayError::ReadRequestBody)?;

    let chat_request: ChatCompletionRequest =
        serde_json::from_slice(&body).map_err(GatewayError::InvalidChatRequest)?;

    if chat_request.messages.is_empty() {
        return Err(GatewayError::EmptyMessages);
    }
    // Streaming is rejected before any backend contact.
    if chat_request.stream {
        return Err(GatewayError::StreamingUnsupported);
    }

    let backend = resolve_backend(registry, &chat_request.model)?;
    tracing::debug!(
        "resolved model {} with backend {}",
        backend.model_id,
        backend.base_url
    );

    let conversation_id = parts
        .headers
        .get(CONVERSATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            let generated = Uuid::new_v4().to_string();
            tracing::debug!("no conversation id header, generated {generated}");
            generated
        });

    let a2a_request = translate::openai_to_a2a(&chat_request, &conversation_id)
        .ok_or(GatewayError::EmptyMessages)?;
    let a2a_body =
        serde_json::to_vec(&a2a_request).map_err(|err| GatewayError::serialize("A2A request", err))?;

    // Reroute: the host proxies on the path, so the resolved agent path
    // replaces the OpenAI endpoint, and the body/framing headers are swapped
    // for the A2A envelope.
    parts.uri = backend
        .path
        .parse::<Uri>()
        .map_err(|err| GatewayError::Internal(format!("invalid backend path: {err}")))?;
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts
        .headers
        .insert(header::CONTENT_LENGTH, HeaderValue::from(a2a_body.len()));
    let request = Request::from_parts(parts, Body::from(a2a_body));

    tracing::debug!("forwarding message/send for {} to {}", backend.model_id, backend.path);
    let response = next.run(request).await;
    let captured = CapturedResponse::capture(response)
        .await
        .map_err(GatewayError::UpstreamBody)?;

    if captured.status != StatusCode::OK {
        tracing::info!(
            "backend returned non-OK status: {} - passing through",
            captured.status
        );
        return Ok(captured.into_response());
    }

    let a2a_response: SendMessageSuccessResponse =
        serde_json::from_slice(&captured.body).map_err(GatewayError::BackendDecode)?;

    let chat_response = translate::a2a_to_openai(&a2a_response, &chat_request.model);
    let body = serde_json::to_vec(&chat_response)
        .map_err(|err| GatewayError::serialize("chat completion response", err))?;

    tracing::debug!("transformed message/send result back to chat completion format");
    Ok(captured.into_json_response(body))
}
