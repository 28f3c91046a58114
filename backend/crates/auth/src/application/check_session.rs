//! Check Session Use Case
//!
//! Verifies the session cookie and retrieves the session it carries.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::SessionCodec;
use crate::domain::entity::session::Session;
use crate::error::AuthResult;

/// Check session use case
pub struct CheckSessionUseCase {
    config: Arc<AuthConfig>,
}

impl CheckSessionUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Decode the session cookie and return the session
    pub fn session(&self, session_token: &str) -> AuthResult<Session> {
        let codec = SessionCodec::new(&self.config)?;
        codec.decode_session(session_token)
    }

    /// Just check if the session cookie is valid (returns bool)
    pub fn is_valid(&self, session_token: &str) -> bool {
        self.session(session_token).is_ok()
    }
}
