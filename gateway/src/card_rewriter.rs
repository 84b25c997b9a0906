//! Agent-card rewriting interceptor.
//!
//! Agents describe themselves at `/.well-known/agent-card.json` using the
//! URLs they know — cluster-internal service names, pod IPs, localhost. A
//! client on the outside can only reach them through the gateway, so this
//! interceptor rewrites the card's endpoint URLs to the externally reachable
//! gateway URL and filters the advertised interfaces down to the transports
//! the gateway can actually carry.
//!
//! The card is handled as a generic JSON object so that every field the
//! gateway does not understand round-trips untouched. `provider.url` in
//! particular is organizational metadata, never an agent endpoint, and is
//! left alone.

use axum::extract::Request;
use axum::http::{header, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

use a2a_wire::TransportProtocol;

use crate::capture::CapturedResponse;
use crate::error::GatewayError;
use crate::paths;

/// Middleware entry point.
///
/// Owns `GET <prefix>/.well-known/agent-card.json` requests with a non-empty
/// prefix; everything else passes through unchanged. The root well-known
/// document is not owned either — without a prefix there is no agent path to
/// rewrite onto.
pub async fn rewrite_agent_card(request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if request.method() != Method::GET || !paths::is_agent_card(path) {
        return next.run(request).await;
    }

    let agent_path = paths::extract_agent_path(path).to_string();
    if agent_path.is_empty() {
        tracing::warn!("cannot extract agent path from: {path} - passing through");
        return next.run(request).await;
    }

    let gateway_url = match gateway_base_url(&request) {
        Ok(url) => url,
        Err(err) => return err.into_response(),
    };

    tracing::debug!("rewriting agent card for path {agent_path}, gateway {gateway_url}");

    let response = next.run(request).await;
    let captured = match CapturedResponse::capture(response).await {
        Ok(captured) => captured,
        Err(err) => return GatewayError::UpstreamBody(err).into_response(),
    };

    if captured.status != StatusCode::OK {
        tracing::info!(
            "backend returned non-OK status {} for agent card - returning error",
            captured.status
        );
        return (captured.status, "Backend service returned an error").into_response();
    }

    if !captured.is_json() {
        return GatewayError::UnsupportedCardMediaType {
            content_type: captured.content_type().to_string(),
        }
        .into_response();
    }

    let mut card: Map<String, Value> = match serde_json::from_slice(&captured.body) {
        Ok(card) => card,
        Err(err) => return GatewayError::CardParse(err).into_response(),
    };

    rewrite_card(&mut card, &external_url(&gateway_url, &agent_path));

    match serde_json::to_vec(&card) {
        Ok(body) => {
            tracing::debug!("transformed agent card URLs to external gateway format");
            captured.into_json_response(body)
        }
        Err(err) => GatewayError::serialize("rewritten agent card", err).into_response(),
    }
}

/// The externally visible base URL of the gateway, as seen by this request.
///
/// The authority is the request's `Host` verbatim (including any port); the
/// scheme comes from `X-Forwarded-Proto` when the TLS terminator set it, and
/// defaults to plain `http` otherwise.
fn gateway_base_url(request: &Request) -> Result<String, GatewayError> {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .filter(|host| !host.is_empty())
        // HTTP/2 carries the authority in the request target instead
        .or_else(|| request.uri().authority().map(|authority| authority.as_str()))
        .ok_or(GatewayError::MissingHost)?;

    let scheme = request
        .headers()
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .filter(|proto| !proto.is_empty())
        .unwrap_or("http");

    Ok(format!("{scheme}://{host}"))
}

/// `trim(gateway_url) + trim(agent_path)`, trailing slashes removed from both.
fn external_url(gateway_url: &str, agent_path: &str) -> String {
    format!(
        "{}{}",
        gateway_url.trim_end_matches('/'),
        agent_path.trim_end_matches('/')
    )
}

/// Rewrite the card in place.
///
/// - A string-valued top-level `url` becomes `external_url`.
/// - `additionalInterfaces` is filtered to the recognized transports
///   (case-insensitive); surviving entries get their `url` rewritten, keep
///   every other field, and keep their relative order. Entries that are not
///   objects, lack a `transport`, or carry an unrecognized one are dropped.
/// - Everything else is left byte-for-byte as delivered.
fn rewrite_card(card: &mut Map<String, Value>, external_url: &str) {
    if let Some(url) = card.get_mut("url") {
        if url.is_string() {
            *url = Value::String(external_url.to_string());
        }
    }

    if let Some(Value::Array(interfaces)) = card.get_mut("additionalInterfaces") {
        *interfaces = std::mem::take(interfaces)
            .into_iter()
            .filter_map(|interface| rewrite_interface(interface, external_url))
            .collect();
    }
}

fn rewrite_interface(interface: Value, external_url: &str) -> Option<Value> {
    let Value::Object(mut interface) = interface else {
        return None;
    };

    let transport = interface.get("transport")?.as_str()?;
    TransportProtocol::from_label(transport)?;

    if interface.get("url").map(Value::is_string).unwrap_or(false) {
        interface.insert(
            "url".to_string(),
            Value::String(external_url.to_string()),
        );
    }

    Some(Value::Object(interface))
}
