//! Student-facing suggestion endpoints.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use suggestbox_common::AppResult;
use suggestbox_core::{CreateSuggestionInput, UpdateSuggestionInput};
use suggestbox_db::entities::suggestion;

use crate::extractors::StudentKey;
use crate::middleware::AppState;
use crate::response::{ApiResponse, ok};

/// Query parameters for listing own suggestions.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Only return suggestions answered after this instant (RFC 3339).
    pub since_answered_at: Option<DateTime<Utc>>,
}

/// Create a new suggestion.
async fn create(
    StudentKey(student_key): StudentKey,
    State(state): State<AppState>,
    Json(input): Json<CreateSuggestionInput>,
) -> AppResult<ApiResponse<suggestion::Model>> {
    let created = state.suggestion_service.create(&student_key, input).await?;
    Ok(ApiResponse::ok(created))
}

/// List the calling student's suggestions, newest first.
async fn list_mine(
    StudentKey(student_key): StudentKey,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<suggestion::Model>>> {
    let suggestions = state
        .suggestion_service
        .list_for_student(&student_key, query.since_answered_at)
        .await?;
    Ok(ApiResponse::ok(suggestions))
}

/// Edit the calling student's pending suggestion.
async fn update_mine(
    StudentKey(student_key): StudentKey,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateSuggestionInput>,
) -> AppResult<ApiResponse<suggestion::Model>> {
    let updated = state
        .suggestion_service
        .update_for_student(&student_key, &id, input)
        .await?;
    Ok(ApiResponse::ok(updated))
}

/// Delete the calling student's pending suggestion.
async fn delete_mine(
    StudentKey(student_key): StudentKey,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state
        .suggestion_service
        .delete_for_student(&student_key, &id)
        .await?;
    Ok(ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/suggestions", post(create))
        .route("/me/suggestions", get(list_mine))
        .route("/me/suggestions/{id}", patch(update_mine).delete(delete_mine))
}
