//! Auth Middleware
//!
//! Middleware for requiring a session on protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::user_profile::UserProfile;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub config: Arc<AuthConfig>,
}

/// Authenticated identity stored in request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserProfile);

/// Middleware that requires a valid session cookie
///
/// Missing, tampered, and expired cookies all produce the same 401
/// response; a valid session makes [`CurrentUser`] available to the
/// handler via request extensions.
pub async fn require_session(
    State(state): State<AuthMiddlewareState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.config.clone());

    let session = token.and_then(|t| use_case.session(&t).ok());

    match session {
        Some(session) => {
            req.extensions_mut().insert(CurrentUser(session.user));
            Ok(next.run(req).await)
        }
        None => Err(AuthError::SessionInvalid.into_response()),
    }
}
