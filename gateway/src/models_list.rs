//! The OpenAI-compatible `GET /models` listing.

use axum::http::Method;
use axum::response::{IntoResponse, Json, Response};

use crate::config::AgentRegistry;
use crate::error::GatewayError;
use crate::openai::{ModelEntry, ModelList};

/// Answer a `/models` request from the registry, in configuration order.
/// Never touches the upstream. Methods other than GET get a 405.
pub(crate) fn list_models(registry: &AgentRegistry, method: &Method) -> Response {
    if method != Method::GET {
        tracing::debug!("invalid method for /models: {method}");
        return GatewayError::MethodNotAllowed.into_response();
    }

    tracing::debug!("listing {} configured models", registry.len());

    let list = ModelList {
        object: "list".to_string(),
        data: registry
            .agents()
            .iter()
            .map(|agent| ModelEntry {
                id: agent.model_id.clone(),
                object: "model".to_string(),
                created: agent.created_at,
                owned_by: agent.owned_by.clone(),
            })
            .collect(),
    };

    Json(list).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentInfo;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use serde_json::json;

    fn registry() -> AgentRegistry {
        AgentRegistry::from_agents(vec![
            AgentInfo {
                model_id: "weather-agent".to_string(),
                url: "http://weather-agent:8080".to_string(),
                owned_by: "agentic-layer".to_string(),
                created_at: 1719846000,
            },
            AgentInfo {
                model_id: "local/mock-agent".to_string(),
                url: "http://mock:8080".to_string(),
                owned_by: "tests".to_string(),
                created_at: 1719847000,
            },
        ])
    }

    #[tokio::test]
    async fn listing_matches_registry_order() {
        let response = list_models(&registry(), &Method::GET);
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!({
                "object": "list",
                "data": [
                    {"id": "weather-agent", "object": "model",
                     "created": 1719846000i64, "owned_by": "agentic-layer"},
                    {"id": "local/mock-agent", "object": "model",
                     "created": 1719847000i64, "owned_by": "tests"}
                ]
            })
        );
    }

    #[tokio::test]
    async fn empty_registry_lists_nothing() {
        let response = list_models(&AgentRegistry::from_agents(vec![]), &Method::GET);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"object": "list", "data": []}));
    }

    #[tokio::test]
    async fn non_get_methods_are_rejected() {
        for method in [Method::POST, Method::PUT, Method::DELETE] {
            let response = list_models(&registry(), &method);
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        }
    }
}
