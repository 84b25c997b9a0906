//! Static agent registry configuration.
//!
//! The registry is the process-scoped table mapping OpenAI `model` ids onto
//! backend agents. It is built once from JSON configuration at startup,
//! validated, and immutable afterwards — requests share it without
//! synchronization.

use serde::{Deserialize, Serialize};
use url::Url;

/// A single registered agent.
///
/// Configuration shape:
///
/// ```json
/// { "model_id": "weather-agent",
///   "url": "http://weather-agent.agents.svc.cluster.local:8080",
///   "owned_by": "agentic-layer",
///   "createdAt": 1719846000 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentInfo {
    /// The model id clients use to address this agent. Unique, non-empty.
    pub model_id: String,
    /// Absolute base URL of the agent backend (scheme + authority required).
    pub url: String,
    /// Owner shown in the `/models` listing.
    #[serde(default)]
    pub owned_by: String,
    /// Registration time in epoch seconds, echoed in the `/models` listing.
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
}

/// Process-level gateway configuration, interpreted once at startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub agents: Vec<AgentInfo>,
}

impl GatewayConfig {
    /// Parse a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Fatal startup errors. There is no recovery path: a gateway with a broken
/// registry would misroute every chat request.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot parse gateway configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("agent at index {index} has an empty model_id")]
    EmptyModelId { index: usize },

    #[error("duplicate model_id '{model_id}' in agent configuration")]
    DuplicateModelId { model_id: String },

    #[error("agent '{model_id}' has no URL configured")]
    MissingUrl { model_id: String },

    #[error("agent '{model_id}' has an invalid URL '{url}': {source}")]
    InvalidUrl {
        model_id: String,
        url: String,
        source: url::ParseError,
    },

    #[error("agent '{model_id}' URL '{url}' has no host")]
    UrlMissingHost { model_id: String, url: String },
}

/// The static, ordered agent registry.
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: Vec<AgentInfo>,
}

impl AgentRegistry {
    /// Build and validate a registry from configuration.
    ///
    /// Enforces the startup invariants: every `model_id` non-empty and
    /// unique, every `url` an absolute URL with a host.
    pub fn from_config(config: GatewayConfig) -> Result<Self, ConfigError> {
        for (index, agent) in config.agents.iter().enumerate() {
            if agent.model_id.is_empty() {
                return Err(ConfigError::EmptyModelId { index });
            }
            if config.agents[..index]
                .iter()
                .any(|earlier| earlier.model_id == agent.model_id)
            {
                return Err(ConfigError::DuplicateModelId {
                    model_id: agent.model_id.clone(),
                });
            }
            if agent.url.is_empty() {
                return Err(ConfigError::MissingUrl {
                    model_id: agent.model_id.clone(),
                });
            }
            let parsed = Url::parse(&agent.url).map_err(|source| ConfigError::InvalidUrl {
                model_id: agent.model_id.clone(),
                url: agent.url.clone(),
                source,
            })?;
            if parsed.host_str().is_none() {
                return Err(ConfigError::UrlMissingHost {
                    model_id: agent.model_id.clone(),
                    url: agent.url.clone(),
                });
            }
        }

        Ok(Self {
            agents: config.agents,
        })
    }

    /// Build a registry directly, skipping startup validation.
    ///
    /// For programmatic construction (tests, embedders with their own
    /// validation). Resolution still guards against broken entries at
    /// request time.
    pub fn from_agents(agents: Vec<AgentInfo>) -> Self {
        Self { agents }
    }

    /// The registered agents, in configuration order.
    pub fn agents(&self) -> &[AgentInfo] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
