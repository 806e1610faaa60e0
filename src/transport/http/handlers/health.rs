use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is alive", body = ApiResponse)
    )
)]
pub async fn healthcheck_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::ok(serde_json::json!({ "status": "ok" }))),
    )
}
