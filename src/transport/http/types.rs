use crate::app::storefront::StorefrontService;
use crate::domain::account::Role;
use crate::domain::catalog::{CatalogQuery, FilterCriteria, Selection};
use crate::domain::session::Session;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::str::FromStr;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub storefront: Arc<StorefrontService>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Session info returned to the client after login. The backend bearer token
/// never leaves the frontend.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionReply {
    pub token: String,
    pub user_id: i64,
    pub email: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

impl From<&Session> for SessionReply {
    fn from(session: &Session) -> Self {
        SessionReply {
            token: session.token.clone(),
            user_id: session.user_id,
            email: session.email.clone(),
            role: session.role,
            expires_at: session.expires_at,
        }
    }
}

/// One upload batch for the product form, together with the images already
/// on the draft. The whole batch is rejected if any upload falls outside the
/// image MIME allow-list.
#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageBatchRequest {
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub images: Vec<crate::domain::product::ImagePayload>,
    #[schema(value_type = Vec<Object>)]
    pub uploads: Vec<crate::domain::product::UploadedImage>,
}

/// Catalog query parameters. The enum selectors take the backend spellings
/// or the `alle` sentinel; blank values mean "no filter".
#[derive(Deserialize, Debug, Default, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct CatalogParams {
    /// Keep products with at least this many in stock.
    pub min_stock: Option<String>,
    /// `alle` or one of NEUWERTIG / KAUM_BENUTZT / BENUTZT.
    pub condition: Option<String>,
    /// `alle` or one of the category spellings.
    pub category: Option<String>,
    /// Case-insensitive manufacturer substring.
    pub manufacturer: Option<String>,
    /// Live-search term over name, model, and manufacturer.
    pub q: Option<String>,
}

impl CatalogParams {
    pub fn into_query(self) -> Result<CatalogQuery, String> {
        let mut filter = FilterCriteria::default();
        if let Some(raw) = nonblank(self.min_stock) {
            filter.min_stock = Some(
                raw.parse::<u32>()
                    .map_err(|_| format!("invalid minStock: {raw:?}"))?,
            );
        }
        if let Some(raw) = nonblank(self.condition) {
            filter.condition = parse_selection(&raw, "condition")?;
        }
        if let Some(raw) = nonblank(self.category) {
            filter.category = parse_selection(&raw, "category")?;
        }
        if let Some(raw) = nonblank(self.manufacturer) {
            filter.manufacturer = raw;
        }
        Ok(CatalogQuery {
            filter,
            search: nonblank(self.q).unwrap_or_default(),
        })
    }
}

fn nonblank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_selection<T: FromStr>(raw: &str, param: &str) -> Result<Selection<T>, String> {
    if raw.eq_ignore_ascii_case("alle") {
        return Ok(Selection::All);
    }
    raw.parse::<T>()
        .map(Selection::Only)
        .map_err(|_| format!("invalid {param}: {raw:?}"))
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse::fail(format!(
            "Invalid JSON body: {} (expected: {})",
            err, expected
        ))),
    )
}
