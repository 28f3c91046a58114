//! Sign Out Use Case
//!
//! Ends a session. The session lives only in the cookie, so signing out
//! is logging who left; the presentation layer clears the cookie itself.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::SessionCodec;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase {
    config: Arc<AuthConfig>,
}

impl SignOutUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Sign out from the current session
    ///
    /// Succeeds whether or not a valid session cookie was sent: logout
    /// must always clear the cookie and redirect.
    pub fn execute(&self, session_token: Option<&str>) -> AuthResult<()> {
        let codec = SessionCodec::new(&self.config)?;

        if let Some(session) = session_token.and_then(|t| codec.decode_session(t).ok()) {
            tracing::info!(subject = %session.user.subject, "User signed out");
        } else {
            tracing::debug!("Sign out without a valid session");
        }

        Ok(())
    }
}
