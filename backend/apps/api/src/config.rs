//! Configuration loading and validation for the API server
//!
//! All values are read from environment variables at startup. The process
//! exits with a clear error message if a required variable is missing or
//! invalid.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// TLS material locations. Both paths or neither.
#[derive(Debug, Clone)]
pub struct TlsPaths {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

/// Validated server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the server listens on (`PORT`, default 3000)
    pub port: u16,
    /// Google OAuth client ID (`CLIENT_ID`)
    pub client_id: String,
    /// Google OAuth client secret (`CLIENT_SECRET`)
    pub client_secret: String,
    /// Cookie signing keys, primary first (`COOKIE_KEY_1`, `COOKIE_KEY_2`)
    pub cookie_keys: Vec<[u8; 32]>,
    /// OAuth callback URL registered with Google (`OAUTH_REDIRECT_URL`)
    pub redirect_url: String,
    /// TLS certificate/key paths; HTTPS when present
    pub tls: Option<TlsPaths>,
    /// Directory holding the static landing page (`STATIC_DIR`)
    pub static_dir: PathBuf,
}

impl Config {
    /// Load and validate configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(value) => value.parse::<u16>().context("PORT must be a port number")?,
            Err(_) => 3000,
        };

        let client_id = std::env::var("CLIENT_ID").context("CLIENT_ID must be set")?;
        let client_secret = std::env::var("CLIENT_SECRET").context("CLIENT_SECRET must be set")?;

        let primary = env_key("COOKIE_KEY_1")?.context("COOKIE_KEY_1 must be set")?;
        let mut cookie_keys = vec![primary];
        if let Some(secondary) = env_key("COOKIE_KEY_2")? {
            cookie_keys.push(secondary);
        }

        let tls = match (std::env::var("TLS_CERT_PATH"), std::env::var("TLS_KEY_PATH")) {
            (Ok(cert), Ok(key)) => Some(TlsPaths {
                cert_path: cert.into(),
                key_path: key.into(),
            }),
            (Err(_), Err(_)) => None,
            _ => bail!("TLS_CERT_PATH and TLS_KEY_PATH must be set together"),
        };

        let redirect_url = std::env::var("OAUTH_REDIRECT_URL").unwrap_or_else(|_| {
            let scheme = if tls.is_some() { "https" } else { "http" };
            format!("{scheme}://localhost:{port}/auth/google/callback")
        });

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));

        Ok(Self {
            port,
            client_id,
            client_secret,
            cookie_keys,
            redirect_url,
            tls,
            static_dir,
        })
    }
}

/// Read an optional base64-encoded 32-byte key from the environment
fn env_key(name: &str) -> Result<Option<[u8; 32]>> {
    match std::env::var(name) {
        Ok(value) => parse_key(name, &value).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_key(name: &str, value: &str) -> Result<[u8; 32]> {
    let bytes = platform::crypto::from_base64_std(value.trim())
        .with_context(|| format!("{name} is not valid base64"))?;

    bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("{name} must decode to 32 bytes"))
}
