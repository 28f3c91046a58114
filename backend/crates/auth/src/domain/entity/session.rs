//! Session Entity
//!
//! Represents an authenticated user session. The session lives entirely
//! inside a signed cookie; there is no server-side session store. Set at
//! login, cleared at logout.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user_profile::UserProfile;

/// Cookie-resident auth session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The authenticated identity
    pub user: UserProfile,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
}

impl Session {
    /// Create a new session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user: UserProfile, ttl: Duration) -> Self {
        Self {
            user,
            expires_at_ms: (Utc::now() + ttl).timestamp_millis(),
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }
}
