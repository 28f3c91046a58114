//! Cookie Payload Signing
//!
//! HMAC-SHA256 signing of opaque payloads with key rotation. Tokens have
//! the form `base64url(payload).base64url(signature)`. Signing always uses
//! the first key in the ring; verification accepts a signature from any
//! key, so an old key can stay in the ring while cookies signed with it
//! are still live.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use crate::crypto::{from_base64, to_base64};

type HmacSha256 = Hmac<Sha256>;

/// Error when constructing a keyring
#[derive(Debug, Clone, Error)]
pub enum KeyringError {
    #[error("Keyring requires at least one key")]
    Empty,
}

/// Ordered set of HMAC keys for signing and verifying cookie payloads
#[derive(Clone)]
pub struct Keyring {
    keys: Vec<[u8; 32]>,
}

impl Keyring {
    /// Create a keyring from one or more 32-byte keys
    ///
    /// The first key is the signing key. Remaining keys are accepted
    /// during verification only.
    pub fn new(keys: Vec<[u8; 32]>) -> Result<Self, KeyringError> {
        if keys.is_empty() {
            return Err(KeyringError::Empty);
        }
        Ok(Self { keys })
    }

    /// Keyring with a single random key (for development)
    pub fn random() -> Self {
        use rand::RngCore;
        let mut key = [0u8; 32];
        rand::rng().fill_bytes(&mut key);
        Self { keys: vec![key] }
    }

    /// Number of keys in the ring
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Sign a payload with the primary key
    pub fn sign(&self, payload: &[u8]) -> String {
        let encoded = to_base64(payload);

        let mut mac = HmacSha256::new_from_slice(&self.keys[0])
            .expect("HMAC can take key of any size");
        mac.update(encoded.as_bytes());
        let signature = to_base64(&mac.finalize().into_bytes());

        format!("{encoded}.{signature}")
    }

    /// Verify a token and return its payload
    ///
    /// Returns `None` for malformed tokens, undecodable parts, and
    /// signatures that match no key in the ring.
    pub fn verify(&self, token: &str) -> Option<Vec<u8>> {
        let (encoded, signature_b64) = token.split_once('.')?;
        let signature = from_base64(signature_b64).ok()?;

        let verified = self.keys.iter().any(|key| {
            let mut mac =
                HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
            mac.update(encoded.as_bytes());
            mac.verify_slice(&signature).is_ok()
        });

        if !verified {
            return None;
        }

        from_base64(encoded).ok()
    }
}

impl std::fmt::Debug for Keyring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        f.debug_struct("Keyring")
            .field("keys", &self.keys.len())
            .finish()
    }
}
