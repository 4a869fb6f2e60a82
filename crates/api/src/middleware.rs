//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use suggestbox_core::{AdminService, PushNotificationService, SuggestionService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub admin_service: AdminService,
    pub suggestion_service: SuggestionService,
    pub push_service: PushNotificationService,
}

/// Authentication middleware.
///
/// Resolves a Bearer session token to an admin account and stores the model
/// in request extensions for [`crate::extractors::AuthAdmin`]. Requests
/// without a valid token pass through unauthenticated.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        match state.admin_service.verify_token(token).await {
            Ok(admin) => {
                req.extensions_mut().insert(admin);
            }
            Err(_) => tracing::debug!("Rejected bearer token"),
        }
    }

    next.run(req).await
}
