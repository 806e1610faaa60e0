use crate::app::storefront::StorefrontError;
use crate::domain::session::Session;
use crate::infra::backend::BackendError;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Redirect;
use axum::Json;
use serde_json::Value as JsonValue;
use tracing::warn;

/// Pulls the bearer token out of the Authorization header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Resolves the caller's session on API routes. A missing or expired
/// session gets the 401 envelope.
pub async fn require_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Session, (StatusCode, Json<ApiResponse>)> {
    match bearer_token(headers) {
        Some(token) => state
            .storefront
            .session(token)
            .await
            .ok_or_else(unauthorized),
        None => Err(unauthorized()),
    }
}

/// Session gate for the page routes: without a live session the user lands
/// back on the home page.
pub async fn session_or_home(state: &AppState, headers: &HeaderMap) -> Result<Session, Redirect> {
    match bearer_token(headers) {
        Some(token) => state
            .storefront
            .session(token)
            .await
            .ok_or_else(|| Redirect::to("/")),
        None => Err(Redirect::to("/")),
    }
}

fn unauthorized() -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::fail("Please sign in to continue")),
    )
}

/// Maps storefront failures onto the response taxonomy: inline field
/// errors, a fresh sign-in, or a transient notification.
pub fn error_response(err: StorefrontError) -> (StatusCode, Json<ApiResponse>) {
    match err {
        StorefrontError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::fail("Invalid email or password")),
        ),
        StorefrontError::EmailTaken => (
            StatusCode::CONFLICT,
            Json(ApiResponse::fail("The email address is already taken")),
        ),
        StorefrontError::InvalidProduct(errors) => {
            invalid_form(serde_json::to_value(&errors).unwrap_or_default())
        }
        StorefrontError::InvalidRegistration(errors) => {
            invalid_form(serde_json::to_value(&errors).unwrap_or_default())
        }
        StorefrontError::InvalidImages(e) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::fail(e.to_string())),
        ),
        StorefrontError::Forbidden(role) => (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::fail(format!(
                "This action requires the {} role",
                role.display_label()
            ))),
        ),
        StorefrontError::Backend(BackendError::Unauthorized) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::fail(
                "Your session is no longer valid, please sign in again",
            )),
        ),
        StorefrontError::Backend(BackendError::Rejected { status, message }) => {
            warn!(status, "backend rejected the request: {message}");
            (StatusCode::BAD_GATEWAY, Json(ApiResponse::fail(message)))
        }
        StorefrontError::Backend(BackendError::Transport(e)) => {
            warn!("backend unreachable: {e}");
            (
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::fail(
                    "The marketplace is currently unavailable, please try again",
                )),
            )
        }
    }
}

fn invalid_form(field_errors: JsonValue) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse {
            success: false,
            data: Some(serde_json::json!({ "fieldErrors": field_errors })),
            error: Some("Please correct the errors in the form".to_string()),
        }),
    )
}
