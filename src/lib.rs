pub mod app;
pub mod domain;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::storefront::StorefrontService;
pub use domain::account::Role;
pub use domain::catalog::{CatalogQuery, FilterCriteria};
pub use domain::product::{Product, ProductCategory, ProductCondition, ProductDraft, ProductId};
pub use domain::session::Session;
pub use infra::backend::BackendClient;
pub use infra::session_store::SessionStore;
