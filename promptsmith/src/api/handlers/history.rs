//! Execution history endpoints: list, delete one, clear all.

use axum::extract::{Path, State};
use axum::Json;

use crate::api::dto::{DeleteHistoryResponse, HistoryListResponse};
use crate::api::state::AppState;
use crate::error::{PromptsmithError, Result};

/// Past executions, newest first.
#[utoipa::path(
    get,
    path = "/api/history",
    responses(
        (status = 200, description = "Execution history", body = HistoryListResponse),
    ),
    tag = "history"
)]
pub async fn list_history(State(state): State<AppState>) -> Json<HistoryListResponse> {
    let entries = state.history.list();
    let total = entries.len();
    Json(HistoryListResponse { entries, total })
}

/// Delete a single history entry.
#[utoipa::path(
    delete,
    path = "/api/history/{id}",
    params(("id" = String, Path, description = "History entry id")),
    responses(
        (status = 200, description = "Entry deleted", body = DeleteHistoryResponse),
        (status = 404, description = "No entry with that id"),
    ),
    tag = "history"
)]
pub async fn delete_history_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteHistoryResponse>> {
    if !state.history.delete(&id)? {
        return Err(PromptsmithError::NotFound(format!(
            "History entry {id} not found"
        )));
    }

    Ok(Json(DeleteHistoryResponse { deleted: true }))
}

/// Clear the whole history.
#[utoipa::path(
    delete,
    path = "/api/history",
    responses(
        (status = 200, description = "History cleared", body = DeleteHistoryResponse),
    ),
    tag = "history"
)]
pub async fn clear_history(
    State(state): State<AppState>,
) -> Result<Json<DeleteHistoryResponse>> {
    state.history.clear()?;
    Ok(Json(DeleteHistoryResponse { deleted: true }))
}
