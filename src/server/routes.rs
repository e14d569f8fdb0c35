//! HTTP route handlers for the Echo agent API.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::services::ServeDir;

use crate::chat::{ChatError, ChatResult, Conversation, Message, Role, Topic, suggestion_list};

use super::state::AppState;

/// Reply sent when a request cannot be handled.
pub const FALLBACK_REPLY: &str =
    "Sorry, I lost my train of thought for a moment. Could you try that again?";

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat))
        .fallback_service(static_files)
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "echo-agent",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Conversation so far. Anything other than an array counts as empty.
    #[serde(default)]
    pub messages: Value,
}

/// A message as posted by the UI. Extra fields (e.g. `timestamp`) are ignored.
#[derive(Debug, Deserialize)]
struct WireMessage {
    role: Role,
    content: String,
}

impl ChatRequest {
    /// Coerce the posted messages into a conversation.
    ///
    /// Elements that are not well-formed messages are skipped.
    #[must_use]
    pub fn into_conversation(self) -> Conversation {
        let Value::Array(items) = self.messages else {
            return Conversation::new();
        };

        items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<WireMessage>(item).ok())
            .map(|wire| Message::new(wire.role, wire.content))
            .collect()
    }
}

/// Chat response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The assistant's reply.
    pub reply: String,
    /// Follow-up prompts for the UI buttons.
    pub suggestions: Vec<String>,
}

impl ChatResponse {
    /// Response used when the request could not be handled.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            reply: FALLBACK_REPLY.to_string(),
            suggestions: suggestion_list(Topic::General),
        }
    }
}

/// Handle chat requests.
///
/// The body is parsed by hand so a bad payload still gets a JSON fallback reply.
/// Body extraction failures (e.g. over the size limit) take the same path.
async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let result = body
        .map_err(|rejection| ChatError::InvalidBody(rejection.body_text()))
        .and_then(|body| respond(&state, &body));

    match result {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            tracing::error!("Chat request failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ChatResponse::fallback())).into_response()
        }
    }
}

fn respond(state: &AppState, body: &[u8]) -> ChatResult<ChatResponse> {
    let request: ChatRequest = serde_json::from_slice(body)?;
    let conversation = request.into_conversation();

    let composed = state.composer.compose(
        &conversation,
        Local::now().naive_local(),
        &mut rand::thread_rng(),
    );

    Ok(ChatResponse {
        reply: composed.reply,
        suggestions: suggestion_list(composed.topic),
    })
}
