use crate::domain::product::{ProductDraft, ProductId};
use crate::transport::http::handlers::common::{
    error_response, require_session, session_or_home,
};
use crate::transport::http::types::{json_422, ApiResponse, AppState, ImageBatchRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/my/products",
    responses(
        (status = 200, description = "The caller's own listings", body = ApiResponse),
        (status = 303, description = "No live session, redirected home"),
        (status = 403, description = "Not a provider", body = ApiResponse)
    )
)]
pub async fn my_products_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    // page route: unauthenticated access goes back to the home page
    let session = match session_or_home(&state, &headers).await {
        Ok(s) => s,
        Err(redirect) => return redirect.into_response(),
    };

    match state.storefront.my_products(&session).await {
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
    post,
    path = "/my/products",
    request_body = ProductDraft,
    responses(
        (status = 200, description = "Product created", body = ApiResponse),
        (status = 400, description = "Field validation errors", body = ApiResponse),
        (status = 401, description = "No live session", body = ApiResponse),
        (status = 403, description = "Not a provider", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<ProductDraft>, JsonRejection>,
) -> impl IntoResponse {
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(resp) => return resp.into_response(),
    };
    let Json(draft) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "the product form fields").into_response(),
    };

    match state.storefront.submit_product(&session, &draft).await {
        Ok(created) => (
            StatusCode::OK,
            Json(ApiResponse::ok(
                serde_json::to_value(&created).unwrap_or_default(),
            )),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/my/products/images",
    request_body = ImageBatchRequest,
    responses(
        (status = 200, description = "Batch encoded and appended", body = ApiResponse),
        (status = 400, description = "A file outside the image allow-list", body = ApiResponse),
        (status = 401, description = "No live session", body = ApiResponse),
        (status = 403, description = "Not a provider", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn ingest_images_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<ImageBatchRequest>, JsonRejection>,
) -> impl IntoResponse {
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(resp) => return resp.into_response(),
    };
    let Json(batch) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "the current images plus the upload batch").into_response(),
    };

    match state
        .storefront
        .ingest_images(&session, &batch.images, &batch.uploads)
    {
        Ok(images) => (
            StatusCode::OK,
            Json(ApiResponse::ok(serde_json::json!({
                "images": images
            }))),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/my/products/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = ProductDraft,
    responses(
        (status = 200, description = "Product updated (full replace)", body = ApiResponse),
        (status = 400, description = "Field validation errors", body = ApiResponse),
        (status = 401, description = "No live session", body = ApiResponse),
        (status = 403, description = "Not a provider", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    request: Result<Json<ProductDraft>, JsonRejection>,
) -> impl IntoResponse {
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(resp) => return resp.into_response(),
    };
    let Json(draft) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "the product form fields").into_response(),
    };

    match state
        .storefront
        .revise_product(&session, ProductId(id), &draft)
        .await
    {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::ok(
                serde_json::to_value(&updated).unwrap_or_default(),
            )),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/my/products/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse),
        (status = 401, description = "No live session", body = ApiResponse),
        (status = 403, description = "Not a provider", body = ApiResponse)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(resp) => return resp.into_response(),
    };

    match state.storefront.retire_product(&session, ProductId(id)).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::ok(serde_json::json!({ "deleted": id }))),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}
