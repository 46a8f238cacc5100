use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{faq::matcher, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// GET /chatbot-response?message=..&lang=..
///
/// Matching is recomputed on every call; nothing is cached between requests.
#[instrument(skip(state, query))]
pub async fn chatbot_response(
    State(state): State<AppState>,
    Query(query): Query<ChatQuery>,
) -> Json<ChatResponse> {
    let lang = query
        .lang
        .as_deref()
        .unwrap_or(&state.config.default_language);
    let entries = state.faq.entries(lang);
    let response = matcher::respond(entries, &query.message);
    debug!(lang, entries = entries.len(), "chatbot match computed");
    Json(ChatResponse { response })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_response_serializes_response_field() {
        let json = serde_json::to_string(&ChatResponse {
            response: "hello".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"response":"hello"}"#);
    }

    #[test]
    fn chat_query_tolerates_missing_fields() {
        let q: ChatQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.message, "");
        assert!(q.lang.is_none());
    }
}
