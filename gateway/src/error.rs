//! Error taxonomy for both interceptors.
//!
//! Every branch logs its detailed context; what reaches the wire is only the
//! generic client message. Nothing here is retried — backend failures and bad
//! requests alike surface immediately.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::router::ResolveError;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("failed to read request body: {0}")]
    ReadRequestBody(axum::Error),

    #[error("failed to parse chat completion request: {0}")]
    InvalidChatRequest(serde_json::Error),

    #[error("chat completion request has no messages")]
    EmptyMessages,

    #[error("streaming request detected, but streaming is not supported")]
    StreamingUnsupported,

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("unexpected agent card content-type: {content_type}")]
    UnsupportedCardMediaType { content_type: String },

    #[error("Host header is required for agent card URL rewriting")]
    MissingHost,

    #[error("failed to parse agent card: {0}")]
    CardParse(serde_json::Error),

    #[error("failed to read backend response: {0}")]
    UpstreamBody(axum::Error),

    #[error("failed to parse backend response: {0}")]
    BackendDecode(serde_json::Error),

    #[error("failed to create {what}: {source}")]
    Serialize {
        what: &'static str,
        source: serde_json::Error,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub(crate) fn serialize(what: &'static str, source: serde_json::Error) -> Self {
        GatewayError::Serialize { what, source }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        // The streaming rejection is the one branch with a contractual body
        // shape: OpenAI clients expect their own error envelope.
        if matches!(self, GatewayError::StreamingUnsupported) {
            tracing::warn!("{self}");
            let body = json!({
                "error": {
                    "message": "Streaming is not currently supported by the Agent Gateway",
                    "type": "invalid_request_error",
                    "code": null,
                }
            });
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }

        let (status, client_message) = match &self {
            GatewayError::ReadRequestBody(_) => {
                (StatusCode::BAD_REQUEST, "failed to read request body")
            }
            GatewayError::InvalidChatRequest(_) => {
                (StatusCode::BAD_REQUEST, "invalid chat completion request format")
            }
            GatewayError::EmptyMessages => {
                (StatusCode::BAD_REQUEST, "messages must not be empty")
            }
            GatewayError::Resolve(err) => (err.status(), err.client_message()),
            GatewayError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
            }
            GatewayError::UnsupportedCardMediaType { .. } => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Expected application/json content type",
            ),
            GatewayError::MissingHost => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Host header is required for agent card URL rewriting",
            ),
            GatewayError::CardParse(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to parse agent card JSON",
            ),
            GatewayError::UpstreamBody(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to read backend response",
            ),
            GatewayError::BackendDecode(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to parse backend response",
            ),
            GatewayError::Serialize { .. } | GatewayError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
            GatewayError::StreamingUnsupported => unreachable!("handled above"),
        };

        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::warn!("{self}");
        }

        (status, client_message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn streaming_rejection_carries_the_openai_error_envelope() {
        let response = GatewayError::StreamingUnsupported.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!({
                "error": {
                    "message": "Streaming is not currently supported by the Agent Gateway",
                    "type": "invalid_request_error",
                    "code": null,
                }
            })
        );
    }

    #[tokio::test]
    async fn resolve_errors_surface_only_the_client_message() {
        let response = GatewayError::Resolve(ResolveError::NotFound {
            model: "secret-internal-agent".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(body, "model not found");
        assert!(!body.contains("secret-internal-agent"));
    }

    #[tokio::test]
    async fn card_media_type_rejection_is_415() {
        let response = GatewayError::UnsupportedCardMediaType {
            content_type: "text/html".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn missing_host_is_a_server_error() {
        let response = GatewayError::MissingHost.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
