//! Seller product form: immutable draft state and per-field validation.
//!
//! The add-product and edit-product flows share this module. A draft holds
//! every field exactly as entered (stock stays raw text until it validates);
//! `validate` refreshes the message for every field in one pass so the user
//! sees all problems at once, and `finish` is the only way to turn a draft
//! into the typed payload the backend accepts.

use super::image::ImagePayload;
use super::{ProductCategory, ProductCondition};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fields of the product form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductField {
    ProductName,
    Model,
    Manufacturer,
    Stock,
    Description,
    Category,
    Condition,
    Images,
}

pub const PRODUCT_FIELDS: [ProductField; 8] = [
    ProductField::ProductName,
    ProductField::Model,
    ProductField::Manufacturer,
    ProductField::Stock,
    ProductField::Description,
    ProductField::Category,
    ProductField::Condition,
    ProductField::Images,
];

impl ProductField {
    fn label(&self) -> &'static str {
        match self {
            ProductField::ProductName => "Product name",
            ProductField::Model => "Model",
            ProductField::Manufacturer => "Manufacturer",
            ProductField::Stock => "Stock",
            ProductField::Description => "Description",
            ProductField::Category => "Category",
            ProductField::Condition => "Condition",
            ProductField::Images => "Images",
        }
    }
}

/// Per-field validation messages; an empty message marks the field valid.
///
/// Serialized as a field-name → message object for inline display next to
/// the corresponding inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldErrors(BTreeMap<ProductField, String>);

impl FieldErrors {
    pub fn message(&self, field: ProductField) -> &str {
        self.0.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn is_valid(&self) -> bool {
        self.0.values().all(|m| m.is_empty())
    }
}

/// One user edit to the draft.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductInput {
    ProductName(String),
    Model(String),
    Manufacturer(String),
    Stock(String),
    Description(String),
    Category(ProductCategory),
    Condition(ProductCondition),
    Images(Vec<ImagePayload>),
}

impl ProductInput {
    pub fn field(&self) -> ProductField {
        match self {
            ProductInput::ProductName(_) => ProductField::ProductName,
            ProductInput::Model(_) => ProductField::Model,
            ProductInput::Manufacturer(_) => ProductField::Manufacturer,
            ProductInput::Stock(_) => ProductField::Stock,
            ProductInput::Description(_) => ProductField::Description,
            ProductInput::Category(_) => ProductField::Category,
            ProductInput::Condition(_) => ProductField::Condition,
            ProductInput::Images(_) => ProductField::Images,
        }
    }
}

/// In-progress product form state.
///
/// `stock` is kept as raw text exactly as typed and only parsed during
/// validation; category and condition are unset until the user picks one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub product_name: String,
    pub model: String,
    pub manufacturer: String,
    #[serde(deserialize_with = "raw_text")]
    pub stock: String,
    pub description: String,
    pub category: Option<ProductCategory>,
    pub condition: Option<ProductCondition>,
    #[schema(value_type = Vec<String>)]
    pub images: Vec<ImagePayload>,
}

/// Form clients send stock as either text or a bare number; both land as the
/// raw text the validator expects.
fn raw_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Num(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}

impl ProductDraft {
    /// Seeds a draft from an existing listing for the edit flow.
    pub fn from_product(product: &super::Product) -> Self {
        ProductDraft {
            product_name: product.product_name.clone(),
            model: product.model.clone(),
            manufacturer: product.manufacturer.clone(),
            stock: product.stock.to_string(),
            description: product.description.clone(),
            category: Some(product.category),
            condition: Some(product.condition),
            images: product.images.clone(),
        }
    }

    /// Pure per-field reducer: applies one edit, returns the next state.
    pub fn with(mut self, input: ProductInput) -> Self {
        match input {
            ProductInput::ProductName(v) => self.product_name = v,
            ProductInput::Model(v) => self.model = v,
            ProductInput::Manufacturer(v) => self.manufacturer = v,
            ProductInput::Stock(v) => self.stock = v,
            ProductInput::Description(v) => self.description = v,
            ProductInput::Category(v) => self.category = Some(v),
            ProductInput::Condition(v) => self.condition = Some(v),
            ProductInput::Images(v) => self.images = v,
        }
        self
    }

    /// Current error message for one field; empty string when valid.
    pub fn validate_field(&self, field: ProductField) -> String {
        match field {
            ProductField::ProductName => required_text(field, &self.product_name),
            ProductField::Model => required_text(field, &self.model),
            ProductField::Manufacturer => required_text(field, &self.manufacturer),
            ProductField::Description => required_text(field, &self.description),
            ProductField::Stock => {
                let raw = self.stock.trim();
                if raw.is_empty() {
                    "Stock is required".to_string()
                } else if raw.parse::<u32>().is_err() {
                    "Stock must be a non-negative number".to_string()
                } else {
                    String::new()
                }
            }
            ProductField::Category => match self.category {
                Some(_) => String::new(),
                None => "Category is required".to_string(),
            },
            ProductField::Condition => match self.condition {
                Some(_) => String::new(),
                None => "Condition is required".to_string(),
            },
            ProductField::Images => {
                if self.images.is_empty() {
                    "At least one image is required".to_string()
                } else {
                    String::new()
                }
            }
        }
    }

    /// Re-validates every field, refreshing every message (no short-circuit).
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for field in PRODUCT_FIELDS {
            errors.0.insert(field, self.validate_field(field));
        }
        errors
    }

    /// Submission gate: only a fully valid draft becomes a backend payload.
    pub fn finish(&self) -> Result<NewProduct, FieldErrors> {
        let errors = self.validate();
        let stock = self.stock.trim().parse::<u32>().ok();
        match (errors.is_valid(), stock, self.category, self.condition) {
            (true, Some(stock), Some(category), Some(condition)) => Ok(NewProduct {
                product_name: self.product_name.clone(),
                model: self.model.clone(),
                manufacturer: self.manufacturer.clone(),
                stock,
                description: self.description.clone(),
                images: self.images.clone(),
                category,
                condition,
            }),
            _ => Err(errors),
        }
    }
}

fn required_text(field: ProductField, value: &str) -> String {
    if value.trim().is_empty() {
        format!("{} is required", field.label())
    } else {
        String::new()
    }
}

/// Fully validated product payload for create and full-replace update calls.
/// The backend assigns the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub product_name: String,
    pub model: String,
    pub manufacturer: String,
    pub stock: u32,
    pub description: String,
    pub images: Vec<ImagePayload>,
    pub category: ProductCategory,
    pub condition: ProductCondition,
}
