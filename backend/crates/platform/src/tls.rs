//! TLS server configuration
//!
//! Loads a PEM-encoded certificate chain and private key from disk and
//! builds a `rustls::ServerConfig` for the HTTPS listener.

use rustls::ServerConfig;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Error when building the TLS configuration
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TLS certificate chain")]
    BadCertificate(#[source] std::io::Error),

    #[error("Failed to read TLS private key")]
    BadPrivateKey(#[source] std::io::Error),

    #[error("No private key found in PEM data")]
    NoPrivateKey,

    #[error("Rustls rejected the certificate/key pair: {0}")]
    Rejected(#[from] rustls::Error),
}

/// Build a [`rustls::ServerConfig`] from PEM-encoded certificate and key bytes
pub fn build_server_config(cert_pem: &[u8], key_pem: &[u8]) -> Result<Arc<ServerConfig>, TlsError> {
    let certs = rustls_pemfile::certs(&mut std::io::BufReader::new(cert_pem))
        .collect::<Result<Vec<_>, _>>()
        .map_err(TlsError::BadCertificate)?;

    let key = rustls_pemfile::private_key(&mut std::io::BufReader::new(key_pem))
        .map_err(TlsError::BadPrivateKey)?
        .ok_or(TlsError::NoPrivateKey)?;

    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)?;

    Ok(Arc::new(config))
}

/// Load certificate and key files from disk and build the server config
pub fn load_server_config(
    cert_path: impl AsRef<Path>,
    key_path: impl AsRef<Path>,
) -> Result<Arc<ServerConfig>, TlsError> {
    let cert_pem = read_pem(cert_path.as_ref())?;
    let key_pem = read_pem(key_path.as_ref())?;
    build_server_config(&cert_pem, &key_pem)
}

fn read_pem(path: &Path) -> Result<Vec<u8>, TlsError> {
    std::fs::read(path).map_err(|source| TlsError::Read {
        path: path.display().to_string(),
        source,
    })
}
