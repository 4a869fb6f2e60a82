//! Push subscription endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use suggestbox_common::AppResult;
use suggestbox_core::{PushConfigResponse, PushSubscriptionResponse, SubscribeInput};
use suggestbox_db::entities::push_subscription::SubscriptionOwner;

use crate::extractors::{AuthAdmin, StudentKey};
use crate::middleware::AppState;
use crate::response::{ApiResponse, ok};

/// Save the calling student's push subscription.
async fn subscribe(
    StudentKey(student_key): StudentKey,
    State(state): State<AppState>,
    Json(input): Json<SubscribeInput>,
) -> AppResult<ApiResponse<PushSubscriptionResponse>> {
    let subscription = state
        .push_service
        .subscribe(SubscriptionOwner::Student(student_key), input)
        .await?;
    Ok(ApiResponse::ok(subscription))
}

/// Remove the calling student's push subscription.
async fn unsubscribe(
    StudentKey(student_key): StudentKey,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    state
        .push_service
        .unsubscribe(&SubscriptionOwner::Student(student_key))
        .await?;
    Ok(ok())
}

/// Save the calling admin's push subscription.
async fn admin_subscribe(
    AuthAdmin(admin): AuthAdmin,
    State(state): State<AppState>,
    Json(input): Json<SubscribeInput>,
) -> AppResult<ApiResponse<PushSubscriptionResponse>> {
    let subscription = state
        .push_service
        .subscribe(SubscriptionOwner::Admin(admin.id), input)
        .await?;
    Ok(ApiResponse::ok(subscription))
}

/// Push availability and VAPID public key for client bootstrap.
async fn config(State(state): State<AppState>) -> ApiResponse<PushConfigResponse> {
    ApiResponse::ok(PushConfigResponse {
        available: state.push_service.is_enabled(),
        public_key: state.push_service.public_key().map(String::from),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(subscribe))
        .route("/unsubscribe", delete(unsubscribe))
        .route("/admin/subscribe", post(admin_subscribe))
        .route("/config", get(config))
}
