use crate::domain::account::RegistrationDraft;
use crate::transport::http::handlers::common::{error_response, require_session};
use crate::transport::http::types::{json_422, ApiResponse, AppState, LoginRequest, SessionReply};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/account/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session issued", body = ApiResponse),
        (status = 401, description = "Invalid credentials", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 502, description = "Backend unavailable", body = ApiResponse)
    )
)]
pub async fn login_handler(
    State(state): State<AppState>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, r#"{"email": "...", "password": "..."}"#).into_response(),
    };

    match state.storefront.login(&request.email, &request.password).await {
        Ok(session) => {
            let reply = SessionReply::from(&session);
            (
                StatusCode::OK,
                Json(ApiResponse::ok(
                    serde_json::to_value(&reply).unwrap_or_default(),
                )),
            )
                .into_response()
        }
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/account/signup",
    request_body = RegistrationDraft,
    responses(
        (status = 200, description = "Account created", body = ApiResponse),
        (status = 400, description = "Field validation errors", body = ApiResponse),
        (status = 409, description = "Email already taken", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn signup_handler(
    State(state): State<AppState>,
    request: Result<Json<RegistrationDraft>, JsonRejection>,
) -> impl IntoResponse {
    let Json(draft) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "the signup form fields").into_response(),
    };

    match state.storefront.register(&draft).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::ok(serde_json::json!({
                "message": "Registration successful, you can now sign in"
            }))),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/account/logout",
    responses(
        (status = 200, description = "Session revoked", body = ApiResponse),
        (status = 401, description = "No live session", body = ApiResponse)
    )
)]
pub async fn logout_handler(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> impl IntoResponse {
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(resp) => return resp.into_response(),
    };
    state.storefront.logout(&session.token).await;
    (
        StatusCode::OK,
        Json(ApiResponse::ok(serde_json::json!({ "message": "Signed out" }))),
    )
        .into_response()
}
