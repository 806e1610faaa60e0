//! Signup form: draft state and the nine field validators.
//!
//! Each validator owns exactly one field's message, mirroring the inline
//! per-input display; `validate` runs all nine without short-circuiting and
//! gates the signup request.

use super::Role;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fields of the signup form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistrationField {
    Name,
    Email,
    Phone,
    Password,
    ConfirmPassword,
    Address,
    City,
    PostalCode,
    Role,
}

pub const REGISTRATION_FIELDS: [RegistrationField; 9] = [
    RegistrationField::Name,
    RegistrationField::Email,
    RegistrationField::Phone,
    RegistrationField::Password,
    RegistrationField::ConfirmPassword,
    RegistrationField::Address,
    RegistrationField::City,
    RegistrationField::PostalCode,
    RegistrationField::Role,
];

/// In-progress signup form state. Role is tri-state: unset until the user
/// explicitly picks one, and unset never validates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub role: Option<Role>,
}

/// Per-field validation messages; an empty message marks the field valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegistrationErrors(BTreeMap<RegistrationField, String>);

impl RegistrationErrors {
    pub fn message(&self, field: RegistrationField) -> &str {
        self.0.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn is_valid(&self) -> bool {
        self.0.values().all(|m| m.is_empty())
    }
}

/// Compiled field patterns. Built once, shared across requests.
#[derive(Debug)]
pub struct RegistrationRules {
    email: Regex,
    phone: Regex,
    postal_code: Regex,
}

impl Default for RegistrationRules {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationRules {
    pub fn new() -> Self {
        RegistrationRules {
            email: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"),
            phone: Regex::new(r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$")
                .expect("phone pattern"),
            postal_code: Regex::new(r"^\d{5}$").expect("postal code pattern"),
        }
    }

    pub fn validate_name(&self, value: &str) -> String {
        if value.trim().is_empty() {
            "Name is required".to_string()
        } else if value.chars().count() < 2 {
            "Name must be at least 2 characters".to_string()
        } else {
            String::new()
        }
    }

    pub fn validate_email(&self, value: &str) -> String {
        if value.trim().is_empty() {
            "Email is required".to_string()
        } else if !self.email.is_match(value) {
            "Invalid email address".to_string()
        } else {
            String::new()
        }
    }

    pub fn validate_phone(&self, value: &str) -> String {
        if value.trim().is_empty() {
            "Phone number is required".to_string()
        } else if !self.phone.is_match(value) {
            "Invalid phone number".to_string()
        } else {
            String::new()
        }
    }

    pub fn validate_password(&self, value: &str) -> String {
        if value.is_empty() {
            "Password is required".to_string()
        } else if value.chars().count() < 8 {
            "Password must be at least 8 characters".to_string()
        } else {
            String::new()
        }
    }

    /// Mismatch is invalid regardless of the confirmation's own strength.
    pub fn validate_confirm_password(&self, value: &str, password: &str) -> String {
        if value != password {
            "Passwords do not match".to_string()
        } else {
            String::new()
        }
    }

    pub fn validate_address(&self, value: &str) -> String {
        if value.trim().is_empty() {
            "Address is required".to_string()
        } else {
            String::new()
        }
    }

    pub fn validate_city(&self, value: &str) -> String {
        if value.trim().is_empty() {
            "City is required".to_string()
        } else {
            String::new()
        }
    }

    pub fn validate_postal_code(&self, value: &str) -> String {
        if value.trim().is_empty() {
            "Postal code is required".to_string()
        } else if !self.postal_code.is_match(value) {
            "Invalid postal code (5 digits required)".to_string()
        } else {
            String::new()
        }
    }

    pub fn validate_role(&self, role: Option<Role>) -> String {
        match role {
            Some(_) => String::new(),
            None => "Please choose a role".to_string(),
        }
    }

    /// Current error message for one field; empty string when valid.
    pub fn validate_field(&self, draft: &RegistrationDraft, field: RegistrationField) -> String {
        match field {
            RegistrationField::Name => self.validate_name(&draft.name),
            RegistrationField::Email => self.validate_email(&draft.email),
            RegistrationField::Phone => self.validate_phone(&draft.phone),
            RegistrationField::Password => self.validate_password(&draft.password),
            RegistrationField::ConfirmPassword => {
                self.validate_confirm_password(&draft.confirm_password, &draft.password)
            }
            RegistrationField::Address => self.validate_address(&draft.address),
            RegistrationField::City => self.validate_city(&draft.city),
            RegistrationField::PostalCode => self.validate_postal_code(&draft.postal_code),
            RegistrationField::Role => self.validate_role(draft.role),
        }
    }

    /// Runs all nine validators, refreshing every message. The signup request
    /// may only be issued when the result is valid.
    pub fn validate(&self, draft: &RegistrationDraft) -> RegistrationErrors {
        let mut errors = RegistrationErrors::default();
        for field in REGISTRATION_FIELDS {
            errors.0.insert(field, self.validate_field(draft, field));
        }
        errors
    }
}
