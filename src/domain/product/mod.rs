//! Product model shared by the catalog, seller, and request views.

pub mod draft;
pub mod image;

pub use draft::{FieldErrors, NewProduct, ProductDraft, ProductField, ProductInput};
pub use image::{ImagePayload, UploadedImage};

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of catalog categories, spelled the way the backend spells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Monitor,
    Computer,
    Computerzusatz,
    Audio,
    Drucker,
}

/// All categories, in the order the selection UI lists them.
pub const PRODUCT_CATEGORIES: [ProductCategory; 5] = [
    ProductCategory::Monitor,
    ProductCategory::Computer,
    ProductCategory::Computerzusatz,
    ProductCategory::Audio,
    ProductCategory::Drucker,
];

impl ProductCategory {
    /// Wire spelling used by the backend and in query strings.
    pub fn as_wire(&self) -> &'static str {
        match self {
            ProductCategory::Monitor => "MONITOR",
            ProductCategory::Computer => "COMPUTER",
            ProductCategory::Computerzusatz => "COMPUTERZUSATZ",
            ProductCategory::Audio => "AUDIO",
            ProductCategory::Drucker => "DRUCKER",
        }
    }

    /// Label shown to the user.
    pub fn display_label(&self) -> &'static str {
        match self {
            ProductCategory::Monitor => "Monitor",
            ProductCategory::Computer => "Computer",
            ProductCategory::Computerzusatz => "Computerzusatz",
            ProductCategory::Audio => "Audio",
            ProductCategory::Drucker => "Drucker",
        }
    }
}

impl FromStr for ProductCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PRODUCT_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.as_wire().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Closed set of item conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCondition {
    Neuwertig,
    KaumBenutzt,
    Benutzt,
}

/// All conditions, best first.
pub const PRODUCT_CONDITIONS: [ProductCondition; 3] = [
    ProductCondition::Neuwertig,
    ProductCondition::KaumBenutzt,
    ProductCondition::Benutzt,
];

impl ProductCondition {
    pub fn as_wire(&self) -> &'static str {
        match self {
            ProductCondition::Neuwertig => "NEUWERTIG",
            ProductCondition::KaumBenutzt => "KAUM_BENUTZT",
            ProductCondition::Benutzt => "BENUTZT",
        }
    }

    pub fn display_label(&self) -> &'static str {
        match self {
            ProductCondition::Neuwertig => "Neuwertig",
            ProductCondition::KaumBenutzt => "Kaum benutzt",
            ProductCondition::Benutzt => "Benutzt",
        }
    }
}

impl FromStr for ProductCondition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PRODUCT_CONDITIONS
            .iter()
            .copied()
            .find(|c| c.as_wire().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Canonical product identifier.
///
/// The backend has emitted ids both as JSON numbers and as JSON strings
/// across versions. Decoding accepts either form; encoding always emits a
/// number. Nothing outside this module sees the raw wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        flexible_i64(deserializer).map(ProductId)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Decodes an identifier that may arrive as a JSON number or a numeric string.
pub(crate) fn flexible_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("invalid numeric id: {s:?}"))),
    }
}

/// A listed item as served by the backend.
///
/// Every list the frontend shows is refetched from the backend and held only
/// in transient view state; this type is never the authoritative copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    pub model: String,
    pub manufacturer: String,
    pub stock: u32,
    pub description: String,
    pub images: Vec<ImagePayload>,
    pub category: ProductCategory,
    pub condition: ProductCondition,
}
