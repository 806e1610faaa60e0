//! Buyer requests against catalog products.

use crate::domain::product::{flexible_i64, ProductCategory, ProductCondition};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Canonical request identifier; same tolerant decoding as product ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RequestId(pub i64);

impl<'de> Deserialize<'de> for RequestId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        flexible_i64(deserializer).map(RequestId)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A buyer's interest in a product, denormalized for the requests table.
///
/// Created server-side when the buyer submits a request; the frontend only
/// lists and deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub id: RequestId,
    pub product_name: String,
    pub product_model: String,
    pub product_manufacturer: String,
    pub product_category: ProductCategory,
    pub product_condition: ProductCondition,
}
