//! Session Token Codec
//!
//! Serializes session and login-state payloads to JSON and signs them
//! with the platform keyring. The resulting tokens are the cookie values;
//! verification rejects tampered tokens before JSON is ever parsed.

use platform::signer::Keyring;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::application::config::AuthConfig;
use crate::domain::entity::{login_state::LoginState, session::Session};
use crate::error::{AuthError, AuthResult};

/// Signs and opens cookie payloads
pub struct SessionCodec {
    keyring: Keyring,
}

impl SessionCodec {
    /// Build a codec from the configured signing keys
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        let keyring = Keyring::new(config.signing_keys.clone())
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(Self { keyring })
    }

    /// Encode a session into a signed cookie value
    pub fn encode_session(&self, session: &Session) -> AuthResult<String> {
        self.seal(session)
    }

    /// Decode and validate a session cookie value
    ///
    /// Tampered, malformed, and expired tokens all map to `SessionInvalid`.
    pub fn decode_session(&self, token: &str) -> AuthResult<Session> {
        let session: Session = self.open(token).ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            return Err(AuthError::SessionInvalid);
        }

        Ok(session)
    }

    /// Encode a login state into a signed cookie value
    pub fn encode_login_state(&self, state: &LoginState) -> AuthResult<String> {
        self.seal(state)
    }

    /// Decode and validate a login-state cookie value
    ///
    /// A token that does not verify is treated the same as a missing
    /// cookie; expiry is reported separately so the callback can log it.
    pub fn decode_login_state(&self, token: &str) -> AuthResult<LoginState> {
        let state: LoginState = self.open(token).ok_or(AuthError::LoginStateMissing)?;

        if state.is_expired() {
            return Err(AuthError::LoginStateExpired);
        }

        Ok(state)
    }

    fn seal<T: Serialize>(&self, payload: &T) -> AuthResult<String> {
        let bytes = serde_json::to_vec(payload).map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(self.keyring.sign(&bytes))
    }

    fn open<T: DeserializeOwned>(&self, token: &str) -> Option<T> {
        let bytes = self.keyring.verify(token)?;
        serde_json::from_slice(&bytes).ok()
    }
}
