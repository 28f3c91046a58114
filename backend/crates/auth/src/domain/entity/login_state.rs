//! Login State Entity
//!
//! Carries the CSRF state and PKCE verifier across the redirect round
//! trip between `/auth/google` and the provider callback. Travels in a
//! short-lived signed cookie, never in server-side storage.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// In-flight login attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginState {
    /// CSRF state the provider must echo back
    pub state: String,
    /// PKCE code verifier for the token exchange
    pub pkce_verifier: String,
    /// Attempt expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
}

impl LoginState {
    /// Create a new login attempt
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(state: String, pkce_verifier: String, ttl: Duration) -> Self {
        Self {
            state,
            pkce_verifier,
            expires_at_ms: (Utc::now() + ttl).timestamp_millis(),
        }
    }

    /// Check if the attempt has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Compare the callback `state` parameter against the stored state
    pub fn matches_state(&self, state: &str) -> bool {
        platform::crypto::constant_time_eq(self.state.as_bytes(), state.as_bytes())
    }
}
