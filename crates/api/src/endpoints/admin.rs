//! Admin endpoints.

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use validator::Validate;

use suggestbox_common::AppResult;
use suggestbox_core::{AdminResponse, AnswerSuggestionInput, LoginInput};
use suggestbox_db::entities::suggestion::{self, SuggestionStatus};
use suggestbox_db::repositories::SuggestionFilter;

use crate::extractors::AuthAdmin;
use crate::middleware::AppState;
use crate::response::ApiResponse;

/// Login response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Bearer session token
    pub access_token: String,
    /// Always `bearer`
    pub token_type: &'static str,
}

/// Query parameters for the admin suggestion listing.
#[derive(Debug, Deserialize, Validate)]
pub struct ListQuery {
    /// Restrict to a school grade.
    #[validate(range(min = 1, max = 3))]
    pub grade: Option<i32>,
    /// Restrict to a lifecycle status; unknown values are ignored.
    pub status: Option<String>,
    /// Case-insensitive substring search over title and content.
    #[validate(length(max = 80))]
    pub q: Option<String>,
}

/// Exchange credentials for a session token.
async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<ApiResponse<TokenResponse>> {
    let access_token = state.admin_service.login(input).await?;
    Ok(ApiResponse::ok(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

/// Current admin account.
async fn me(AuthAdmin(admin): AuthAdmin) -> ApiResponse<AdminResponse> {
    ApiResponse::ok(admin.into())
}

/// List suggestions with optional filters, newest first.
async fn list_suggestions(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<suggestion::Model>>> {
    query.validate()?;

    let filter = SuggestionFilter {
        grade: query.grade,
        status: query.status.as_deref().and_then(SuggestionStatus::parse),
        q: query.q,
    };

    let suggestions = state.suggestion_service.list_all(&filter).await?;
    Ok(ApiResponse::ok(suggestions))
}

/// Answer a suggestion.
async fn answer_suggestion(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<AnswerSuggestionInput>,
) -> AppResult<ApiResponse<suggestion::Model>> {
    let answered = state.suggestion_service.answer(&id, input).await?;
    Ok(ApiResponse::ok(answered))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/suggestions", get(list_suggestions))
        .route("/suggestions/{id}/answer", patch(answer_suggestion))
}
