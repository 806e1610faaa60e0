use crate::domain::product::ProductId;
use crate::transport::http::handlers::common::{error_response, require_session};
use crate::transport::http::types::{ApiResponse, AppState, CatalogParams};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Home / landing page", body = ApiResponse)
    )
)]
pub async fn home_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::ok(serde_json::json!({
            "service": "re-bay storefront",
            "catalog": "/catalog"
        }))),
    )
}

#[utoipa::path(
    get,
    path = "/catalog",
    params(CatalogParams),
    responses(
        (status = 200, description = "Filtered catalog", body = ApiResponse),
        (status = 400, description = "Invalid filter parameter", body = ApiResponse),
        (status = 502, description = "Backend unavailable", body = ApiResponse)
    )
)]
pub async fn catalog_handler(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> impl IntoResponse {
    let query = match params.into_query() {
        Ok(q) => q,
        Err(message) => {
            return (StatusCode::BAD_REQUEST, Json(ApiResponse::fail(message))).into_response()
        }
    };

    match state.storefront.browse_catalog(&query).await {
        Ok(products) => (
            StatusCode::OK,
            Json(ApiResponse::ok(
                serde_json::to_value(&products).unwrap_or_default(),
            )),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product detail", body = ApiResponse),
        (status = 401, description = "No live session", body = ApiResponse),
        (status = 502, description = "Backend unavailable", body = ApiResponse)
    )
)]
pub async fn product_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(resp) => return resp.into_response(),
    };

    match state.storefront.product_detail(&session, ProductId(id)).await {
        Ok(product) => (
            StatusCode::OK,
            Json(ApiResponse::ok(
                serde_json::to_value(&product).unwrap_or_default(),
            )),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}
