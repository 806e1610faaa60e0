// Responsible for all communication with the marketplace backend.

use crate::domain::account::{RegistrationDraft, Role};
use crate::domain::product::{flexible_i64, NewProduct, Product, ProductId};
use crate::domain::request::{ProductRequest, RequestId};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Failure of one backend call.
///
/// Each call is a single outstanding request with no retry or backoff; a
/// failure is terminal for that user action and the caller's prior view
/// state stays untouched.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("authentication required")]
    Unauthorized,

    #[error("backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody<'a> {
    login_contact_email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Authority {
    pub authority: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUser {
    #[serde(deserialize_with = "flexible_i64")]
    pub id: i64,
    pub login_contact_email: String,
    pub authorities: Vec<Authority>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginReply {
    pub user: AccountUser,
    pub token: String,
}

/// Signup payload, spelled the way the account endpoint expects it.
/// `role` is the legacy boolean flag (`true` = provider).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload {
    pub login_contact_email: String,
    pub password: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub name: String,
    pub role: bool,
    pub contact_phonenumber: String,
}

impl SignupPayload {
    /// Builds the wire payload from a validated draft. Returns `None` when
    /// the role was never chosen (the validator rejects that draft anyway).
    pub fn from_draft(draft: &RegistrationDraft) -> Option<SignupPayload> {
        let role: Role = draft.role?;
        Some(SignupPayload {
            login_contact_email: draft.email.clone(),
            password: draft.password.clone(),
            address: draft.address.clone(),
            city: draft.city.clone(),
            postal_code: draft.postal_code.clone(),
            name: draft.name.clone(),
            role: role.signup_flag(),
            contact_phonenumber: draft.phone.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for every backend endpoint the frontend consumes.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        BackendClient {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginReply, BackendError> {
        debug!(%email, "POST /account/login");
        let response = self
            .http
            .post(self.url("/account/login"))
            .json(&LoginBody {
                login_contact_email: email,
                password,
            })
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn signup(&self, payload: &SignupPayload) -> Result<(), BackendError> {
        debug!(email = %payload.login_contact_email, "POST /account/signup");
        let response = self
            .http
            .post(self.url("/account/signup"))
            .json(payload)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// Public catalog; the only unauthenticated product endpoint.
    pub async fn fetch_catalog(&self) -> Result<Vec<Product>, BackendError> {
        let response = self.http.get(self.url("/products/catalog")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn fetch_product(
        &self,
        token: &str,
        id: ProductId,
    ) -> Result<Product, BackendError> {
        let response = self
            .http
            .get(self.url(&format!("/products/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// The caller's own listings.
    pub async fn fetch_my_products(&self, token: &str) -> Result<Vec<Product>, BackendError> {
        let response = self
            .http
            .get(self.url("/products/all"))
            .bearer_auth(token)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn create_product(
        &self,
        token: &str,
        product: &NewProduct,
    ) -> Result<Product, BackendError> {
        debug!(name = %product.product_name, "POST /products/create");
        let response = self
            .http
            .post(self.url("/products/create"))
            .bearer_auth(token)
            .json(product)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Full replace of every product field.
    pub async fn update_product(
        &self,
        token: &str,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Product, BackendError> {
        debug!(%id, "PATCH /products/update");
        let response = self
            .http
            .patch(self.url(&format!("/products/update/{id}")))
            .bearer_auth(token)
            .json(product)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn delete_product(&self, token: &str, id: ProductId) -> Result<(), BackendError> {
        debug!(%id, "DELETE /products/delete");
        let response = self
            .http
            .delete(self.url(&format!("/products/delete/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    pub async fn fetch_my_requests(
        &self,
        token: &str,
    ) -> Result<Vec<ProductRequest>, BackendError> {
        let response = self
            .http
            .get(self.url("/requests/mine"))
            .bearer_auth(token)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn delete_request(&self, token: &str, id: RequestId) -> Result<(), BackendError> {
        debug!(%id, "DELETE /requests/delete");
        let response = self
            .http
            .delete(self.url(&format!("/requests/delete/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

/// Maps non-2xx statuses onto the error taxonomy, pulling the backend's
/// `message` field out of the body when one is decodable.
async fn check(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(BackendError::Unauthorized);
    }
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("request failed with status {status}"));
    Err(BackendError::Rejected {
        status: status.as_u16(),
        message,
    })
}
