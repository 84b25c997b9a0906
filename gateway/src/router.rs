//! Model routing: OpenAI `model` → backend agent.
//!
//! The `model` parameter doubles as the routing key: it selects a registry
//! entry and becomes the path the host proxies to. Because it ends up in a
//! request target, it is validated against path traversal and URL-reserved
//! characters before any lookup happens.

use axum::http::StatusCode;
use url::Url;

use crate::config::AgentRegistry;

/// URL-reserved characters that must never appear in a routing key.
const RESERVED_MODEL_CHARS: &[char] = &[
    '?', '#', '[', ']', '@', '!', '$', '&', '\'', '(', ')', '*', '+', ',', ';', '=',
];

/// The routing decision for a chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBackend {
    /// The matched registry model id.
    pub model_id: String,
    /// The path the host routes on: `/` + model id.
    pub path: String,
    /// scheme://authority of the backend, extracted from the registry URL.
    pub base_url: String,
}

/// Why a `model` could not be resolved.
///
/// The `Display` form carries the detailed internal message and is what gets
/// logged; [`ResolveError::client_message`] is the only thing that reaches
/// the wire.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("model parameter cannot be empty")]
    EmptyModel,

    #[error("invalid model parameter '{model}': contains invalid pattern '..'")]
    TraversalPattern { model: String },

    #[error("invalid model parameter '{model}': contains invalid characters")]
    ReservedCharacters { model: String },

    #[error("agent {model} has no URL configured")]
    MissingUrl { model: String },

    #[error("failed to parse agent URL for {model}: {source}")]
    UnparseableUrl {
        model: String,
        source: url::ParseError,
    },

    #[error("agent URL for {model} has no host")]
    UrlMissingHost { model: String },

    #[error("model {model} not found in configuration")]
    NotFound { model: String },
}

impl ResolveError {
    /// HTTP status the bridge answers with.
    pub fn status(&self) -> StatusCode {
        match self {
            ResolveError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// The generic message sent to the client. Detail stays in the logs.
    pub fn client_message(&self) -> &'static str {
        match self {
            ResolveError::EmptyModel => "model parameter is required",
            ResolveError::TraversalPattern { .. } | ResolveError::ReservedCharacters { .. } => {
                "invalid model parameter format"
            }
            ResolveError::MissingUrl { .. }
            | ResolveError::UnparseableUrl { .. }
            | ResolveError::UrlMissingHost { .. } => "model is not available",
            ResolveError::NotFound { .. } => "model not found",
        }
    }
}

/// Resolve `model` against the registry.
///
/// The first entry whose `model_id` equals `model` byte-for-byte wins.
pub fn resolve_backend(
    registry: &AgentRegistry,
    model: &str,
) -> Result<ResolvedBackend, ResolveError> {
    if model.is_empty() {
        return Err(ResolveError::EmptyModel);
    }
    if model.contains("..") {
        return Err(ResolveError::TraversalPattern {
            model: model.to_string(),
        });
    }
    if model.contains(RESERVED_MODEL_CHARS) {
        return Err(ResolveError::ReservedCharacters {
            model: model.to_string(),
        });
    }

    for agent in registry.agents() {
        if agent.model_id != model {
            continue;
        }

        if agent.url.is_empty() {
            return Err(ResolveError::MissingUrl {
                model: model.to_string(),
            });
        }
        let parsed = Url::parse(&agent.url).map_err(|source| ResolveError::UnparseableUrl {
            model: model.to_string(),
            source,
        })?;
        let host = parsed.host_str().ok_or_else(|| ResolveError::UrlMissingHost {
            model: model.to_string(),
        })?;
        let base_url = match parsed.port() {
            Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
            None => format!("{}://{}", parsed.scheme(), host),
        };

        return Ok(ResolvedBackend {
            model_id: agent.model_id.clone(),
            path: format!("/{model}"),
            base_url,
        });
    }

    Err(ResolveError::NotFound {
        model: model.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentInfo;

    fn registry() -> AgentRegistry {
        AgentRegistry::from_agents(vec![
            AgentInfo {
                model_id: "weather-agent".to_string(),
                url: "http://weather-agent.agents.svc.cluster.local:8080/".to_string(),
                owned_by: "agentic-layer".to_string(),
                created_at: 1,
            },
            AgentInfo {
                model_id: "local/mock-agent".to_string(),
                url: "https://mock.example.com".to_string(),
                owned_by: "tests".to_string(),
                created_at: 2,
            },
            AgentInfo {
                model_id: "broken-agent".to_string(),
                url: String::new(),
                owned_by: String::new(),
                created_at: 3,
            },
        ])
    }

    #[test]
    fn resolves_path_and_base_url() {
        let backend = resolve_backend(&registry(), "weather-agent").unwrap();
        assert_eq!(backend.model_id, "weather-agent");
        assert_eq!(backend.path, "/weather-agent");
        assert_eq!(
            backend.base_url,
            "http://weather-agent.agents.svc.cluster.local:8080"
        );
    }

    #[test]
    fn slash_in_model_id_is_preserved_in_path() {
        let backend = resolve_backend(&registry(), "local/mock-agent").unwrap();
        assert_eq!(backend.path, "/local/mock-agent");
        assert_eq!(backend.base_url, "https://mock.example.com");
    }

    #[test]
    fn resolution_is_idempotent() {
        let registry = registry();
        let first = resolve_backend(&registry, "weather-agent").unwrap();
        let second = resolve_backend(&registry, "weather-agent").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_model_is_invalid_format() {
        let err = resolve_backend(&registry(), "").unwrap_err();
        assert!(matches!(err, ResolveError::EmptyModel));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "model parameter is required");
    }

    #[test]
    fn traversal_pattern_is_rejected_before_lookup() {
        let err = resolve_backend(&registry(), "../weather-agent").unwrap_err();
        assert!(matches!(err, ResolveError::TraversalPattern { .. }));
        assert_eq!(err.client_message(), "invalid model parameter format");
    }

    #[test]
    fn url_reserved_characters_are_rejected() {
        for model in ["agent?x=1", "agent#frag", "agent[0]", "a@b", "a&b", "a;b"] {
            let err = resolve_backend(&registry(), model).unwrap_err();
            assert!(
                matches!(err, ResolveError::ReservedCharacters { .. }),
                "expected rejection for {model}"
            );
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn unknown_model_is_not_found() {
        let err = resolve_backend(&registry(), "does-not-exist").unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.client_message(), "model not found");
    }

    #[test]
    fn missing_backend_url_is_a_configuration_error() {
        let err = resolve_backend(&registry(), "broken-agent").unwrap_err();
        assert!(matches!(err, ResolveError::MissingUrl { .. }));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "model is not available");
    }

    #[test]
    fn first_matching_entry_wins() {
        let registry = AgentRegistry::from_agents(vec![
            AgentInfo {
                model_id: "dup".to_string(),
                url: "http://first:1".to_string(),
                owned_by: String::new(),
                created_at: 0,
            },
            AgentInfo {
                model_id: "dup".to_string(),
                url: "http://second:2".to_string(),
                owned_by: String::new(),
                created_at: 0,
            },
        ]);
        let backend = resolve_backend(&registry, "dup").unwrap();
        assert_eq!(backend.base_url, "http://first:1");
    }
}
