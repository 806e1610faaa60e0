//! The authenticated session as the frontend sees it.

use crate::domain::account::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged-in user.
///
/// Issued by the session store at login and read-only everywhere else. The
/// backend bearer token is carried opaquely; the frontend never inspects or
/// refreshes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Frontend session token presented by the client on gated routes.
    pub token: String,
    pub user_id: i64,
    pub email: String,
    pub role: Role,
    /// Bearer token for calls to the backend API.
    pub backend_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
