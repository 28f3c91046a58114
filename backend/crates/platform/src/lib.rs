//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random bytes, Base64, constant-time compare)
//! - HMAC keyring for signing cookie payloads (with key rotation)
//! - Cookie management
//! - TLS server configuration loading

pub mod cookie;
pub mod crypto;
pub mod signer;
pub mod tls;
