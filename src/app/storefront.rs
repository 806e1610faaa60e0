//! The storefront service.
//!
//! This module sits between the HTTP surface and the backend API. It is
//! responsible for:
//! 1.  Turning backend credentials into frontend sessions (and back out).
//! 2.  Gating every mutation behind the form validators and the caller's
//!     role before anything leaves the process.
//! 3.  Applying the catalog filter engine to fetched product lists.

use crate::domain::account::{RegistrationDraft, RegistrationErrors, RegistrationRules, Role};
use crate::domain::catalog::CatalogQuery;
use crate::domain::product::image::{self, ImageError};
use crate::domain::product::{
    FieldErrors, ImagePayload, Product, ProductDraft, ProductId, UploadedImage,
};
use crate::domain::request::{ProductRequest, RequestId};
use crate::domain::session::Session;
use crate::infra::backend::{BackendClient, BackendError, SignupPayload};
use crate::infra::session_store::SessionStore;
use thiserror::Error;
use tracing::{info, warn};

/// Everything that can go wrong with a storefront operation. The HTTP layer
/// maps these onto the response taxonomy: inline field errors, transient
/// notifications, or a fresh sign-in.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("the email address is already taken")]
    EmailTaken,

    #[error("please correct the errors in the form")]
    InvalidProduct(FieldErrors),

    #[error("please correct the errors in the form")]
    InvalidRegistration(RegistrationErrors),

    #[error(transparent)]
    InvalidImages(#[from] ImageError),

    #[error("this action requires the {} role", .0.display_label())]
    Forbidden(Role),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// The main service behind every storefront view.
pub struct StorefrontService {
    backend: BackendClient,
    sessions: SessionStore,
    registration_rules: RegistrationRules,
}

impl StorefrontService {
    pub fn new(backend: BackendClient, sessions: SessionStore) -> Self {
        StorefrontService {
            backend,
            sessions,
            registration_rules: RegistrationRules::new(),
        }
    }

    /// Exchanges backend credentials for a frontend session. The role comes
    /// from the first authority in the login reply.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, StorefrontError> {
        let reply = self.backend.login(email, password).await.map_err(|e| match e {
            e @ BackendError::Transport(_) => StorefrontError::Backend(e),
            _ => StorefrontError::InvalidCredentials,
        })?;

        let role = reply
            .user
            .authorities
            .first()
            .and_then(|a| Role::from_authority(&a.authority))
            .ok_or_else(|| {
                warn!(user = reply.user.id, "login reply carried no known authority");
                StorefrontError::InvalidCredentials
            })?;

        let session = self
            .sessions
            .issue(reply.user.id, reply.user.login_contact_email, role, reply.token)
            .await;
        info!(user = session.user_id, role = session.role.authority(), "login succeeded");
        Ok(session)
    }

    pub async fn logout(&self, token: &str) -> bool {
        self.sessions.revoke(token).await
    }

    /// The caller's live session, if the token names one.
    pub async fn session(&self, token: &str) -> Option<Session> {
        self.sessions.resolve(token).await
    }

    /// Signup gate: all nine field validators must pass before any request
    /// is issued. A backend rejection is reported as the email being taken.
    pub async fn register(&self, draft: &RegistrationDraft) -> Result<(), StorefrontError> {
        let errors = self.registration_rules.validate(draft);
        if !errors.is_valid() {
            return Err(StorefrontError::InvalidRegistration(errors));
        }
        let Some(payload) = SignupPayload::from_draft(draft) else {
            return Err(StorefrontError::InvalidRegistration(errors));
        };
        self.backend.signup(&payload).await.map_err(|e| match e {
            e @ BackendError::Transport(_) => StorefrontError::Backend(e),
            _ => StorefrontError::EmailTaken,
        })
    }

    /// Public catalog with the composed sidebar + search query applied.
    pub async fn browse_catalog(&self, query: &CatalogQuery) -> Result<Vec<Product>, StorefrontError> {
        let products = self.backend.fetch_catalog().await?;
        Ok(query.apply(&products))
    }

    pub async fn product_detail(
        &self,
        session: &Session,
        id: ProductId,
    ) -> Result<Product, StorefrontError> {
        Ok(self.backend.fetch_product(&session.backend_token, id).await?)
    }

    /// The provider's own listings.
    pub async fn my_products(&self, session: &Session) -> Result<Vec<Product>, StorefrontError> {
        self.require_role(session, Role::Provider)?;
        Ok(self.backend.fetch_my_products(&session.backend_token).await?)
    }

    /// File-change step of the product form: converts an upload batch into
    /// data URIs appended to the draft's image sequence, all-or-nothing.
    pub fn ingest_images(
        &self,
        session: &Session,
        images: &[ImagePayload],
        uploads: &[UploadedImage],
    ) -> Result<Vec<ImagePayload>, StorefrontError> {
        self.require_role(session, Role::Provider)?;
        Ok(image::ingest_batch(images, uploads)?)
    }

    /// Add-product flow: the draft must validate before anything is sent.
    pub async fn submit_product(
        &self,
        session: &Session,
        draft: &ProductDraft,
    ) -> Result<Product, StorefrontError> {
        self.require_role(session, Role::Provider)?;
        let payload = draft.finish().map_err(StorefrontError::InvalidProduct)?;
        let created = self
            .backend
            .create_product(&session.backend_token, &payload)
            .await?;
        info!(id = %created.id, "product created");
        Ok(created)
    }

    /// Edit-product flow: full replace of every field, same validation gate.
    pub async fn revise_product(
        &self,
        session: &Session,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, StorefrontError> {
        self.require_role(session, Role::Provider)?;
        let payload = draft.finish().map_err(StorefrontError::InvalidProduct)?;
        Ok(self
            .backend
            .update_product(&session.backend_token, id, &payload)
            .await?)
    }

    pub async fn retire_product(
        &self,
        session: &Session,
        id: ProductId,
    ) -> Result<(), StorefrontError> {
        self.require_role(session, Role::Provider)?;
        self.backend.delete_product(&session.backend_token, id).await?;
        info!(%id, "product deleted");
        Ok(())
    }

    /// The consumer's own requests.
    pub async fn my_requests(&self, session: &Session) -> Result<Vec<ProductRequest>, StorefrontError> {
        self.require_role(session, Role::Consumer)?;
        Ok(self.backend.fetch_my_requests(&session.backend_token).await?)
    }

    pub async fn withdraw_request(
        &self,
        session: &Session,
        id: RequestId,
    ) -> Result<(), StorefrontError> {
        self.require_role(session, Role::Consumer)?;
        self.backend.delete_request(&session.backend_token, id).await?;
        Ok(())
    }

    fn require_role(&self, session: &Session, required: Role) -> Result<(), StorefrontError> {
        if session.role == required {
            Ok(())
        } else {
            Err(StorefrontError::Forbidden(required))
        }
    }
}
