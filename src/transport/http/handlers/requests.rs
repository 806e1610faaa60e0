use crate::domain::request::RequestId;
use crate::transport::http::handlers::common::{
    error_response, require_session, session_or_home,
};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/my/requests",
    responses(
        (status = 200, description = "The caller's product requests", body = ApiResponse),
        (status = 303, description = "No live session, redirected home"),
        (status = 403, description = "Not a consumer", body = ApiResponse)
    )
)]
pub async fn my_requests_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    // page route: unauthenticated access goes back to the home page
    let session = match session_or_home(&state, &headers).await {
        Ok(s) => s,
        Err(redirect) => return redirect.into_response(),
    };

    match state.storefront.my_requests(&session).await {
        Ok(requests) => (
            StatusCode::OK,
            Json(ApiResponse::ok(
                serde_json::to_value(&requests).unwrap_or_default(),
            )),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/my/requests/{id}",
    params(
        ("id" = i64, Path, description = "Request id")
    ),
    responses(
        (status = 200, description = "Request deleted", body = ApiResponse),
        (status = 401, description = "No live session", body = ApiResponse),
        (status = 403, description = "Not a consumer", body = ApiResponse)
    )
)]
pub async fn delete_request_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(resp) => return resp.into_response(),
    };

    match state
        .storefront
        .withdraw_request(&session, RequestId(id))
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::ok(serde_json::json!({ "deleted": id }))),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}
