//! Structured query API handler.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use ticketdesk_core::{OperationKind, QueryError, QueryOutcome};

use crate::metrics::record_query;
use crate::state::AppState;

/// Request body for running a query
#[derive(Debug, Deserialize)]
pub struct QueryBody {
    /// Canonical (`count`, `list`, `group_by`) or tool name
    pub operation_name: String,
    /// Operation arguments; absent or null means no filters
    #[serde(default)]
    pub arguments: Value,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct QueryErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl From<&QueryError> for QueryErrorResponse {
    fn from(e: &QueryError) -> Self {
        Self {
            error: e.to_string(),
            code: e.code(),
        }
    }
}

/// Dispatch an operation and record it in the query metrics.
pub(crate) fn execute(
    state: &AppState,
    operation_name: &str,
    arguments: &Value,
) -> Result<QueryOutcome, QueryError> {
    let operation = OperationKind::from_name(operation_name)
        .ok()
        .map(|kind| kind.as_str());

    let result = state.dispatcher().dispatch(operation_name, arguments);
    match &result {
        Ok(outcome) => record_query(operation, outcome.kind()),
        Err(_) => record_query(operation, "error"),
    }
    result
}

/// Run a query operation
pub async fn run_query(
    State(state): State<Arc<AppState>>,
    Json(body): Json<QueryBody>,
) -> Result<Json<QueryOutcome>, (StatusCode, Json<QueryErrorResponse>)> {
    execute(&state, &body.operation_name, &body.arguments)
        .map(Json)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(QueryErrorResponse::from(&e))))
}
