//! Identity Provider Trait
//!
//! Interface for the delegated OAuth2 provider. Implementation is in the
//! infrastructure layer.

use crate::domain::entity::user_profile::UserProfile;
use crate::error::AuthResult;

/// Identity provider trait
#[trait_variant::make(IdentityProvider: Send)]
pub trait LocalIdentityProvider {
    /// Build the provider authorization URL for one login attempt
    ///
    /// `state` is the CSRF token the provider echoes back to the callback;
    /// `pkce_verifier` is the secret the challenge is derived from.
    fn authorize_url(&self, state: &str, pkce_verifier: &str) -> AuthResult<String>;

    /// Exchange the callback authorization code for the user's profile
    async fn exchange_code(&self, code: &str, pkce_verifier: &str) -> AuthResult<UserProfile>;
}
