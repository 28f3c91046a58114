//! User Profile Entity
//!
//! The authenticated identity as reported by the provider's userinfo
//! endpoint. This struct is the payload the session cookie carries,
//! so it stays small and serde-serializable.

use serde::{Deserialize, Serialize};

/// Profile of an authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Provider-stable subject identifier (Google's `id`)
    pub subject: String,
    /// Primary email address
    pub email: String,
    /// Display name, when the provider shares one
    pub name: Option<String>,
    /// Avatar URL, when the provider shares one
    pub picture: Option<String>,
}
