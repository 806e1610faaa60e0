//! The catalog filter engine.
//!
//! Pure, in-memory, and stable: every operation returns a subsequence of its
//! input in input order. The sidebar criteria and the live-search term are
//! independent; `CatalogQuery` composes them conjunctively over the full
//! product list so both UI event orders converge on the same result.

use crate::domain::product::{Product, ProductCategory, ProductCondition};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;

/// Sentinel the sidebar sends for "no filter" on an enum selector.
const ALL: &str = "alle";

/// Sidebar selector over one closed enumeration: everything, or one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

// no `T: Default` bound: the reset state is `All` for every enumeration
impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<'de, T> Deserialize<'de> for Selection<T>
where
    T: FromStr,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.eq_ignore_ascii_case(ALL) {
            return Ok(Selection::All);
        }
        raw.parse::<T>()
            .map(Selection::Only)
            .map_err(|_| de::Error::custom(format!("unknown filter value: {raw:?}")))
    }
}

impl<T> Serialize for Selection<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Selection::All => serializer.serialize_str(ALL),
            Selection::Only(value) => value.serialize(serializer),
        }
    }
}

/// Sidebar filter state.
///
/// Created at mount in the reset state (`Default`), mutated on user input,
/// applied on an explicit action, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub min_stock: Option<u32>,
    pub condition: Selection<ProductCondition>,
    pub category: Selection<ProductCategory>,
    pub manufacturer: String,
}

impl FilterCriteria {
    /// Conjunctive inclusion test for one product.
    pub fn matches(&self, product: &Product) -> bool {
        let stock_ok = self.min_stock.map_or(true, |min| product.stock >= min);
        let condition_ok = match self.condition {
            Selection::All => true,
            Selection::Only(condition) => product.condition == condition,
        };
        let category_ok = match self.category {
            Selection::All => true,
            Selection::Only(category) => product.category == category,
        };
        let manufacturer_ok = self.manufacturer.is_empty()
            || product
                .manufacturer
                .to_lowercase()
                .contains(&self.manufacturer.to_lowercase());
        stock_ok && condition_ok && category_ok && manufacturer_ok
    }

    /// Stable filter: the result is a subsequence of `products` in input
    /// order. Pure; an empty input yields an empty output.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

/// Live-search match: case-insensitive substring over name, model, and
/// manufacturer. An empty term matches everything.
pub fn search_matches(product: &Product, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    product.product_name.to_lowercase().contains(&term)
        || product.model.to_lowercase().contains(&term)
        || product.manufacturer.to_lowercase().contains(&term)
}

/// Combined catalog view state: sidebar criteria plus the live-search term.
///
/// Both parts apply conjunctively over the full product list on every
/// evaluation, so a sidebar apply followed by typing (or the reverse) lands
/// on the same result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    #[serde(flatten)]
    pub filter: FilterCriteria,
    #[serde(rename = "q")]
    pub search: String,
}

impl CatalogQuery {
    pub fn matches(&self, product: &Product) -> bool {
        self.filter.matches(product) && search_matches(product, &self.search)
    }

    /// Same subsequence/identity/idempotence laws as `FilterCriteria::apply`.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}
