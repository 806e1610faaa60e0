use crate::domain::account::{RegistrationDraft, Role};
use crate::domain::product::{ProductCategory, ProductCondition, ProductDraft};
use crate::transport::http::handlers::{account, catalog, health, products, requests};
use crate::transport::http::types::{ApiResponse, ImageBatchRequest, LoginRequest, SessionReply};
use axum::routing::{delete, get, patch, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        catalog::home_handler,
        catalog::catalog_handler,
        catalog::product_detail_handler,
        account::login_handler,
        account::signup_handler,
        account::logout_handler,
        products::my_products_handler,
        products::create_product_handler,
        products::ingest_images_handler,
        products::update_product_handler,
        products::delete_product_handler,
        requests::my_requests_handler,
        requests::delete_request_handler
    ),
    components(schemas(
        ApiResponse,
        ImageBatchRequest,
        LoginRequest,
        SessionReply,
        RegistrationDraft,
        ProductDraft,
        ProductCategory,
        ProductCondition,
        Role
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/", get(catalog::home_handler))
        .route("/catalog", get(catalog::catalog_handler))
        .route("/products/:id", get(catalog::product_detail_handler))
        .route("/account/login", post(account::login_handler))
        .route("/account/signup", post(account::signup_handler))
        .route("/account/logout", post(account::logout_handler))
        .route(
            "/my/products",
            get(products::my_products_handler).post(products::create_product_handler),
        )
        .route("/my/products/images", post(products::ingest_images_handler))
        .route(
            "/my/products/:id",
            patch(products::update_product_handler).delete(products::delete_product_handler),
        )
        .route("/my/requests", get(requests::my_requests_handler))
        .route("/my/requests/:id", delete(requests::delete_request_handler))
        .with_state(app_state)
}
