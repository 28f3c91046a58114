//! Begin Login Use Case
//!
//! Starts the OAuth2 authorization-code flow: generates the CSRF state
//! and PKCE verifier, stores them in a signed login-state cookie, and
//! builds the provider authorization URL.

use std::sync::Arc;

use platform::crypto::{random_bytes, to_base64};

use crate::application::config::AuthConfig;
use crate::application::session_token::SessionCodec;
use crate::domain::entity::login_state::LoginState;
use crate::domain::provider::IdentityProvider;
use crate::error::{AuthError, AuthResult};

/// Begin login output
pub struct BeginLoginOutput {
    /// Provider authorization URL to redirect the user to
    pub authorize_url: String,
    /// Signed login-state cookie value
    pub state_cookie_value: String,
}

/// Begin login use case
pub struct BeginLoginUseCase<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<P> BeginLoginUseCase<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self { provider, config }
    }

    pub fn execute(&self) -> AuthResult<BeginLoginOutput> {
        // 32 random bytes base64url-encode to 43 chars of [A-Za-z0-9_-],
        // which satisfies the RFC 7636 code-verifier charset and length.
        let state = to_base64(&random_bytes(32));
        let pkce_verifier = to_base64(&random_bytes(32));

        let authorize_url = self.provider.authorize_url(&state, &pkce_verifier)?;

        let ttl = chrono::Duration::from_std(self.config.login_state_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid login state TTL: {e}")))?;

        let login_state = LoginState::new(state, pkce_verifier, ttl);

        let codec = SessionCodec::new(&self.config)?;
        let state_cookie_value = codec.encode_login_state(&login_state)?;

        tracing::debug!("Login attempt started");

        Ok(BeginLoginOutput {
            authorize_url,
            state_cookie_value,
        })
    }
}
