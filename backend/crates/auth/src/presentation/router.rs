//! Auth Router

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::provider::IdentityProvider;
use crate::infra::google::GoogleProvider;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with the Google provider
pub fn auth_router(provider: GoogleProvider, config: AuthConfig) -> Router {
    auth_router_generic(provider, config)
}

/// Create a generic Auth router for any provider implementation
pub fn auth_router_generic<P>(provider: P, config: AuthConfig) -> Router
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        provider: Arc::new(provider),
        config: Arc::new(config),
    };

    Router::new()
        .route("/google", get(handlers::google_login::<P>))
        .route("/google/callback", get(handlers::google_callback::<P>))
        .route("/logout", get(handlers::logout::<P>))
        .with_state(state)
}
