//! Complete Login Use Case
//!
//! Finishes the OAuth2 flow at the provider callback: validates the
//! login-state cookie, exchanges the authorization code, and mints the
//! session cookie.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::SessionCodec;
use crate::domain::entity::session::Session;
use crate::domain::entity::user_profile::UserProfile;
use crate::domain::provider::IdentityProvider;
use crate::error::{AuthError, AuthResult};

/// Complete login input
pub struct CompleteLoginInput {
    /// Authorization code from the callback query
    pub code: String,
    /// CSRF state echoed back by the provider
    pub state: String,
    /// Raw login-state cookie value, if the browser sent one
    pub state_cookie: Option<String>,
}

/// Complete login output
pub struct CompleteLoginOutput {
    /// Signed session cookie value
    pub session_token: String,
    /// The authenticated identity
    pub user: UserProfile,
}

/// Complete login use case
pub struct CompleteLoginUseCase<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<P> CompleteLoginUseCase<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self { provider, config }
    }

    pub async fn execute(&self, input: CompleteLoginInput) -> AuthResult<CompleteLoginOutput> {
        let codec = SessionCodec::new(&self.config)?;

        // A replayed callback finds no cookie: the browser already dropped
        // it when the first callback deleted the cookie.
        let state_cookie = input.state_cookie.ok_or(AuthError::LoginStateMissing)?;
        let login_state = codec.decode_login_state(&state_cookie)?;

        if !login_state.matches_state(&input.state) {
            return Err(AuthError::StateMismatch);
        }

        let user = self
            .provider
            .exchange_code(&input.code, &login_state.pkce_verifier)
            .await?;

        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;

        let session = Session::new(user.clone(), ttl);
        let session_token = codec.encode_session(&session)?;

        tracing::info!(subject = %user.subject, "User logged in");

        Ok(CompleteLoginOutput {
            session_token,
            user,
        })
    }
}
