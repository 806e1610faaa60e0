//! Account roles and their wire mappings.

pub mod registration;

pub use registration::{
    RegistrationDraft, RegistrationErrors, RegistrationField, RegistrationRules,
};

use serde::{Deserialize, Serialize};

/// Canonical account role.
///
/// The backend speaks two dialects: login responses carry authority strings
/// (`ROLE_ANBIETER` / `ROLE_ABNEHMER`) while the signup endpoint takes a
/// legacy boolean flag. Both conversions live here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Seller (Anbieter): may create, edit, and delete own listings.
    Provider,
    /// Buyer (Abnehmer): may submit, view, and delete product requests.
    Consumer,
}

impl Role {
    /// Parses the authority string carried in a login response.
    pub fn from_authority(authority: &str) -> Option<Role> {
        match authority {
            "ROLE_ANBIETER" => Some(Role::Provider),
            "ROLE_ABNEHMER" => Some(Role::Consumer),
            _ => None,
        }
    }

    pub fn authority(&self) -> &'static str {
        match self {
            Role::Provider => "ROLE_ANBIETER",
            Role::Consumer => "ROLE_ABNEHMER",
        }
    }

    /// Legacy signup flag: `true` means provider.
    pub fn signup_flag(&self) -> bool {
        matches!(self, Role::Provider)
    }

    pub fn display_label(&self) -> &'static str {
        match self {
            Role::Provider => "Anbieter",
            Role::Consumer => "Abnehmer",
        }
    }
}
