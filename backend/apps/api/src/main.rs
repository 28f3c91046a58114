//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod serve;

use auth::{
    AuthConfig, AuthMiddlewareState, CurrentUser, GoogleProvider, auth_router, require_session,
};
use axum::http::{HeaderValue, header};
use axum::routing::get;
use axum::{Extension, Router, middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeFile;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let provider = GoogleProvider::new(
        config.client_id.clone(),
        config.client_secret.clone(),
        &config.redirect_url,
    )?;

    // The session cookie can only be Secure when we actually serve HTTPS
    let auth_config = AuthConfig {
        signing_keys: config.cookie_keys.clone(),
        cookie_secure: config.tls.is_some(),
        ..AuthConfig::default()
    };

    let app = build_router(&config, provider, auth_config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    match &config.tls {
        Some(tls) => {
            let tls_config = platform::tls::load_server_config(&tls.cert_path, &tls.key_path)?;
            tracing::info!("Listening on https://localhost:{}", config.port);
            serve::serve_tls(listener, app, tls_config).await?;
        }
        None => {
            tracing::info!("Listening on http://localhost:{}", config.port);
            serve::serve_plain(listener, app).await?;
        }
    }

    Ok(())
}

/// Build the application router
fn build_router(config: &Config, provider: GoogleProvider, auth_config: AuthConfig) -> Router {
    let middleware_state = AuthMiddlewareState {
        config: Arc::new(auth_config.clone()),
    };

    let protected = Router::new()
        .route("/secret", get(secret))
        .route_layer(middleware::from_fn_with_state(
            middleware_state,
            require_session,
        ));

    Router::new()
        .route_service("/", ServeFile::new(config.static_dir.join("index.html")))
        .route("/failure", get(failure))
        .merge(protected)
        .nest("/auth", auth_router(provider, auth_config))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
}

/// GET /secret
async fn secret(Extension(user): Extension<CurrentUser>) -> &'static str {
    tracing::debug!(subject = %user.0.subject, "Secret accessed");
    "Your personal secret value is 42!"
}

/// GET /failure
async fn failure() -> &'static str {
    "Failed to log in!"
}
