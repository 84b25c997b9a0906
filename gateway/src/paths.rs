//! Request-target classification.
//!
//! Pure predicates deciding which interceptor owns a request. All comparisons
//! are byte-wise on the raw path segment; no percent-decoding or
//! normalization happens here beyond what the HTTP stack already did.

use a2a_wire::AGENT_CARD_PATH;

/// Path owned by the chat-completions half of the bridge.
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Path owned by the model-listing half of the bridge.
pub const MODELS_PATH: &str = "/models";

/// True iff `path` ends with the well-known agent card suffix.
pub fn is_agent_card(path: &str) -> bool {
    path.ends_with(AGENT_CARD_PATH)
}

/// The agent prefix of an agent card request: everything before the first
/// occurrence of the well-known suffix, leading slash retained.
///
/// Returns the empty string when the suffix sits at position zero (a request
/// against the root well-known document) or is absent — in both cases the
/// request is not owned by the rewriter.
///
/// ```
/// use agent_gateway::paths::extract_agent_path;
///
/// assert_eq!(extract_agent_path("/weather-agent/.well-known/agent-card.json"), "/weather-agent");
/// assert_eq!(extract_agent_path("/agents/weather-agent/.well-known/agent-card.json"), "/agents/weather-agent");
/// assert_eq!(extract_agent_path("/.well-known/agent-card.json"), "");
/// ```
pub fn extract_agent_path(path: &str) -> &str {
    match path.find(AGENT_CARD_PATH) {
        Some(idx) if idx > 0 => &path[..idx],
        _ => "",
    }
}

/// True iff `path` is exactly the chat completions endpoint.
pub fn is_chat_completions(path: &str) -> bool {
    path == CHAT_COMPLETIONS_PATH
}

/// True iff `path` is exactly the model listing endpoint.
pub fn is_models_list(path: &str) -> bool {
    path == MODELS_PATH
}
