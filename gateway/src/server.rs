//! Gateway assembly.
//!
//! The host runtime owns routing, load balancing, and transport; this module
//! only layers the two interceptors around whatever upstream router the
//! embedder provides. The interceptors are independent and composable in
//! either order — each owns a disjoint set of paths and passes everything
//! else through.

use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::bridge;
use crate::card_rewriter;
use crate::config::AgentRegistry;

/// The egress gateway: a validated agent registry plus the two interceptors.
pub struct EgressGateway {
    registry: Arc<AgentRegistry>,
}

impl EgressGateway {
    pub fn new(registry: AgentRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Layer the interceptors around `upstream`.
    ///
    /// `upstream` stands in for the host's proxying core: anything not owned
    /// by an interceptor reaches it with unchanged bytes, and bridged chat
    /// requests reach it rewritten onto the resolved agent path.
    pub fn into_router(self, upstream: Router) -> Router {
        upstream
            .layer(middleware::from_fn(card_rewriter::rewrite_agent_card))
            .layer(middleware::from_fn_with_state(
                self.registry,
                bridge::openai_bridge,
            ))
            .layer(CorsLayer::permissive())
    }

    /// Bind `addr` and serve the assembled router.
    pub async fn serve(
        self,
        addr: impl tokio::net::ToSocketAddrs,
        upstream: Router,
    ) -> Result<(), std::io::Error> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("egress gateway listening at http://{local_addr}");
        tracing::info!("OpenAI-compatible surface: POST /chat/completions, GET /models");
        if self.registry.is_empty() {
            tracing::warn!("no agents registered - every chat request will fail to resolve");
        }
        for agent in self.registry.agents() {
            tracing::info!("  model {} -> {}", agent.model_id, agent.url);
        }

        let app = self.into_router(upstream);
        axum::serve(listener, app).await
    }
}
