//! In-memory store of frontend sessions.

use crate::domain::account::Role;
use crate::domain::session::Session;
use chrono::{Duration, Utc};
use rand::RngCore;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Issues and resolves frontend session tokens.
///
/// Tokens are random 32-byte hex strings. Sessions live for the configured
/// TTL and are dropped lazily when an expired token is presented. The store
/// holds the only mutable state the frontend owns.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_hours: i64) -> Self {
        SessionStore {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub async fn issue(
        &self,
        user_id: i64,
        email: String,
        role: Role,
        backend_token: String,
    ) -> Session {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        let session = Session {
            token: token.clone(),
            user_id,
            email,
            role,
            backend_token,
            expires_at: Utc::now() + self.ttl,
        };
        self.sessions.write().await.insert(token, session.clone());
        debug!(user_id, "session issued");
        session
    }

    /// Returns the live session for `token`; an expired one is removed and
    /// reported as absent.
    pub async fn resolve(&self, token: &str) -> Option<Session> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        match sessions.get(token) {
            Some(session) if !session.is_expired(now) => Some(session.clone()),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Logout. Returns whether the token named a live session.
    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}
