use std::collections::HashMap;

use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::models::User;

pub const SECRET_ENV: &str = "FEELEDGER_SESSION_SECRET";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub username: String,
    pub role: String,
}

/// In-process session store: opaque token to logged-in user. Sessions do
/// not survive a restart.
pub struct SessionStore {
    secret: String,
    sessions: HashMap<String, SessionUser>,
}

impl SessionStore {
    pub fn new(secret: impl Into<String>) -> Self {
        SessionStore {
            secret: secret.into(),
            sessions: HashMap::new(),
        }
    }

    /// Reads the signing secret from the environment. Without one, a random
    /// per-process secret is generated; tokens stay valid for the process
    /// lifetime either way.
    pub fn from_env() -> Self {
        match std::env::var(SECRET_ENV) {
            Ok(secret) if !secret.is_empty() => SessionStore::new(secret),
            _ => {
                tracing::warn!(
                    "{} not set; using a random per-process session secret",
                    SECRET_ENV
                );
                SessionStore::new(Uuid::new_v4().to_string())
            }
        }
    }

    /// Issues a fresh opaque token: hex SHA-256 over the secret and a
    /// UUIDv4, so tokens are unguessable without being decodable.
    pub fn issue(&mut self, user: &User) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(Uuid::new_v4().as_bytes());
        let token: String = hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        self.sessions.insert(
            token.clone(),
            SessionUser {
                username: user.username.clone(),
                role: user.role.clone(),
            },
        );
        token
    }

    pub fn get(&self, token: &str) -> Option<&SessionUser> {
        self.sessions.get(token)
    }

    /// Returns whether a session was actually revoked.
    pub fn revoke(&mut self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }
}
