//! # Egress agent gateway
//!
//! Interceptors for brokering between external OpenAI-compatible clients and
//! a fleet of internal agents speaking the A2A (Agent2Agent) JSON-RPC 2.0
//! protocol. Two cooperating, independently composable middleware stages
//! form the core:
//!
//! - **Agent-card rewriter** ([`card_rewriter`]) — rewrites agent
//!   self-description documents served at `/.well-known/agent-card.json` so
//!   that internal cluster URLs are replaced with the externally reachable
//!   gateway URL, filtering the advertised interfaces down to the transports
//!   the gateway carries. Unknown card fields round-trip untouched.
//! - **OpenAI ↔ A2A bridge** ([`bridge`]) — exposes `POST /chat/completions`
//!   and `GET /models`, translating each chat call into the A2A
//!   `message/send` exchange and routing it to the agent selected by the
//!   `model` parameter.
//!
//! The host reverse-proxy owns transport, TLS, retries, and authentication;
//! both interceptors are purely functional per request and hold no state
//! beyond the immutable [`AgentRegistry`] built from configuration at
//! startup. [`EgressGateway`] layers them over an upstream
//! [`axum::Router`]:
//!
//! ```no_run
//! use agent_gateway::{AgentRegistry, EgressGateway, GatewayConfig};
//! use axum::Router;
//!
//! # async fn run(upstream: Router) -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::from_json(
//!     r#"{ "agents": [ { "model_id": "weather-agent",
//!                        "url": "http://weather-agent:8080",
//!                        "owned_by": "agentic-layer",
//!                        "createdAt": 1719846000 } ] }"#,
//! )?;
//! let gateway = EgressGateway::new(AgentRegistry::from_config(config)?);
//! gateway.serve("0.0.0.0:8080", upstream).await?;
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod capture;
pub mod card_rewriter;
pub mod config;
pub mod error;
pub(crate) mod models_list;
pub mod openai;
pub mod paths;
pub mod router;
pub mod server;
pub mod translate;

pub use config::{AgentInfo, AgentRegistry, ConfigError, GatewayConfig};
pub use error::GatewayError;
pub use router::{resolve_backend, ResolveError, ResolvedBackend};
pub use server::EgressGateway;
