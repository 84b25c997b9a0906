//! Basic egress gateway example with an in-process mock A2A agent.
//!
//! Run with `cargo run --example basic_gateway`, then:
//!
//! ```bash
//! curl http://localhost:8080/models
//! curl -X POST http://localhost:8080/chat/completions \
//!   -H 'Content-Type: application/json' \
//!   -H 'X-Conversation-ID: demo' \
//!   -d '{"model":"echo-agent","messages":[{"role":"user","content":"Hello"}]}'
//! curl http://localhost:8080/echo-agent/.well-known/agent-card.json
//! ```

use agent_gateway::{AgentRegistry, EgressGateway, GatewayConfig};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};

const CONFIG: &str = r#"{
    "agents": [
        { "model_id": "echo-agent",
          "url": "http://localhost:8080",
          "owned_by": "example",
          "createdAt": 1719846000 }
    ]
}"#;

/// A minimal A2A echo agent: repeats the text part it was sent back as a
/// single artifact. Stands in for the host's proxying core.
fn echo_agent() -> Router {
    Router::new()
        .route(
            "/echo-agent",
            post(|Json(request): Json<Value>| async move {
                let text = request["params"]["message"]["parts"][0]["text"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                Json(json!({
                    "jsonrpc": "2.0",
                    "id": request["id"],
                    "result": {
                        "kind": "task",
                        "id": "task-1",
                        "contextId": request["params"]["message"]["contextId"],
                        "artifacts": [
                            {"artifactId": "a-1",
                             "parts": [{"kind": "text", "text": format!("echo: {text}")}]}
                        ],
                        "history": [],
                        "status": {"state": "completed"}
                    }
                }))
            }),
        )
        .route(
            "/echo-agent/.well-known/agent-card.json",
            get(|| async {
                Json(json!({
                    "name": "Echo Agent",
                    "description": "Repeats whatever it is told",
                    "version": "0.1.0",
                    "protocolVersion": "0.3.0",
                    "url": "http://echo-agent.agents.svc.cluster.local:8080",
                    "additionalInterfaces": [
                        {"transport": "JSONRPC",
                         "url": "http://echo-agent.agents.svc.cluster.local:8080"}
                    ],
                    "provider": {"organization": "Example Org", "url": "https://example.org"}
                }))
            }),
        )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_json(CONFIG)?;
    let registry = AgentRegistry::from_config(config)?;

    let gateway = EgressGateway::new(registry);
    gateway.serve("0.0.0.0:8080", echo_agent()).await?;
    Ok(())
}
