//! Natural-language chat handler.
//!
//! The configured resolver turns the message into an operation call, which
//! runs through the same dispatcher as `/query`. The reply keeps the shape the
//! chat UI renders: plain text for counts and empty results, the ticket rows
//! for lists, and the group map for grouping.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use ticketdesk_core::{GroupValue, QueryOutcome, Ticket};
use tracing::{debug, warn};

use super::query::{execute, QueryErrorResponse};
use crate::state::AppState;

/// Reply when the model does not pick any operation.
pub const OUT_OF_SCOPE_REPLY: &str = "I can answer questions related to incident tickets only.";

/// Request body for a chat message
#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub message: String,
}

/// The reply payload.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ChatReply {
    Text(String),
    Tickets(Vec<Ticket>),
    Groups(BTreeMap<GroupValue, usize>),
}

impl From<QueryOutcome> for ChatReply {
    fn from(outcome: QueryOutcome) -> Self {
        match outcome {
            QueryOutcome::Count { count } => ChatReply::Text(format!("Total tickets: {count}")),
            QueryOutcome::Tickets { tickets } => ChatReply::Tickets(tickets),
            QueryOutcome::Groups { groups, .. } => ChatReply::Groups(groups),
            QueryOutcome::Empty { message, .. } => ChatReply::Text(message),
        }
    }
}

/// Response for a chat message
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: ChatReply,
    /// Error code when the requested operation was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

/// Answer a free-text question about the tickets
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatBody>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<QueryErrorResponse>)> {
    let Some(resolver) = state.resolver() else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(QueryErrorResponse {
                error: "Intent resolver not configured".to_string(),
                code: "resolver_unavailable",
            }),
        ));
    };

    let resolved = resolver.resolve(&body.message).await.map_err(|e| {
        warn!(resolver = resolver.name(), error = %e, "Intent resolution failed");
        (
            StatusCode::BAD_GATEWAY,
            Json(QueryErrorResponse {
                error: e.to_string(),
                code: "resolver_error",
            }),
        )
    })?;

    let Some(intent) = resolved else {
        debug!("No operation selected for message");
        return Ok(Json(ChatResponse {
            reply: ChatReply::Text(OUT_OF_SCOPE_REPLY.to_string()),
            error: None,
        }));
    };

    debug!(operation = %intent.operation, "Resolved chat message");

    let response = match execute(&state, &intent.operation, &intent.arguments) {
        Ok(outcome) => ChatResponse {
            reply: outcome.into(),
            error: None,
        },
        Err(e) => ChatResponse {
            reply: ChatReply::Text(e.to_string()),
            error: Some(e.code()),
        },
    };
    Ok(Json(response))
}
