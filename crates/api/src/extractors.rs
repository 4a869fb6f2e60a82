//! Request extractors.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use suggestbox_db::entities::admin;

/// Minimum accepted length of a student key.
const MIN_STUDENT_KEY_LEN: usize = 10;

/// Authenticated admin extractor.
#[derive(Debug, Clone)]
pub struct AuthAdmin(pub admin::Model);

impl<S> FromRequestParts<S> for AuthAdmin
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get admin from request extensions (set by auth middleware)
        parts
            .extensions
            .get::<admin::Model>()
            .cloned()
            .map(AuthAdmin)
            .ok_or((StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}

/// Student key extractor (`X-Student-Key` header).
///
/// The key is a client-generated identifier stored in the browser, standing
/// in for a full student login system.
#[derive(Debug, Clone)]
pub struct StudentKey(pub String);

impl<S> FromRequestParts<S> for StudentKey
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get("X-Student-Key")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if key.len() < MIN_STUDENT_KEY_LEN {
            return Err((StatusCode::BAD_REQUEST, "Missing X-Student-Key"));
        }

        Ok(Self(key.to_string()))
    }
}
