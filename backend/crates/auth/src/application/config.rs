//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

use platform::cookie::CookieConfig;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Login-state cookie name (CSRF state + PKCE verifier)
    pub state_cookie_name: String,
    /// Cookie signing keys (32 bytes each)
    ///
    /// The first key signs; any key verifies, so a previous key can stay
    /// in the list while cookies signed with it are still live.
    pub signing_keys: Vec<[u8; 32]>,
    /// Session TTL (24 hours)
    pub session_ttl: Duration,
    /// Login-state TTL (10 minutes)
    pub login_state_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Redirect target after a successful login
    pub success_redirect: String,
    /// Redirect target after logout
    pub logout_redirect: String,
    /// Redirect target for any failed login
    pub failure_redirect: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session".to_string(),
            state_cookie_name: "oauth_state".to_string(),
            signing_keys: vec![[0u8; 32]],
            session_ttl: Duration::from_secs(24 * 3600), // 24 hours
            login_state_ttl: Duration::from_secs(10 * 60), // 10 minutes
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            success_redirect: "/".to_string(),
            logout_redirect: "/".to_string(),
            failure_redirect: "/failure".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing key (for development)
    pub fn with_random_keys() -> Self {
        use rand::RngCore;
        let mut key = [0u8; 32];
        rand::rng().fill_bytes(&mut key);
        Self {
            signing_keys: vec![key],
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_keys()
        }
    }

    /// Get session TTL in milliseconds
    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.as_millis() as i64
    }

    /// Get login-state TTL in milliseconds
    pub fn login_state_ttl_ms(&self) -> i64 {
        self.login_state_ttl.as_millis() as i64
    }

    /// Cookie attributes for the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs() as i64),
        }
    }

    /// Cookie attributes for the login-state cookie
    pub fn state_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.state_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.login_state_ttl.as_secs() as i64),
        }
    }
}
