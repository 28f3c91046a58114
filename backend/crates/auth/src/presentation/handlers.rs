//! HTTP Handlers

use axum::extract::{Query, State};
use axum::http::{HeaderMap, header};
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    BeginLoginUseCase, CompleteLoginInput, CompleteLoginUseCase, SignOutUseCase,
};
use crate::domain::provider::IdentityProvider;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::CallbackQuery;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<P>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    pub provider: Arc<P>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Login
// ============================================================================

/// GET /auth/google
pub async fn google_login<P>(State(state): State<AuthAppState<P>>) -> AuthResult<Response>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    let use_case = BeginLoginUseCase::new(state.provider.clone(), state.config.clone());
    let output = use_case.execute()?;

    let cookie = state
        .config
        .state_cookie()
        .build_set_cookie(&output.state_cookie_value);

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Redirect::to(&output.authorize_url),
    )
        .into_response())
}

// ============================================================================
// Callback
// ============================================================================

/// GET /auth/google/callback
///
/// Never answers with an error status: every failure redirects to the
/// configured failure page, as the provider sends real users here.
pub async fn google_callback<P>(
    State(state): State<AuthAppState<P>>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Response
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    let result = complete_login(&state, &headers, query).await;

    // The login-state cookie is single-use: drop it on success and
    // failure alike.
    let clear_state = state.config.state_cookie().build_delete_cookie();

    match result {
        Ok(session_token) => {
            let session_cookie = state
                .config
                .session_cookie()
                .build_set_cookie(&session_token);

            (
                AppendHeaders([
                    (header::SET_COOKIE, session_cookie),
                    (header::SET_COOKIE, clear_state),
                ]),
                Redirect::to(&state.config.success_redirect),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Login failed");

            (
                AppendHeaders([(header::SET_COOKIE, clear_state)]),
                Redirect::to(&state.config.failure_redirect),
            )
                .into_response()
        }
    }
}

async fn complete_login<P>(
    state: &AuthAppState<P>,
    headers: &HeaderMap,
    query: CallbackQuery,
) -> AuthResult<String>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    if let Some(reason) = query.error {
        return Err(AuthError::ProviderDenied(reason));
    }

    let (code, state_param) = match (query.code, query.state) {
        (Some(code), Some(state_param)) => (code, state_param),
        _ => return Err(AuthError::ProviderDenied("missing code or state".to_string())),
    };

    let state_cookie = platform::cookie::extract_cookie(headers, &state.config.state_cookie_name);

    let use_case = CompleteLoginUseCase::new(state.provider.clone(), state.config.clone());

    let output = use_case
        .execute(CompleteLoginInput {
            code,
            state: state_param,
            state_cookie,
        })
        .await?;

    Ok(output.session_token)
}

// ============================================================================
// Logout
// ============================================================================

/// GET /auth/logout
pub async fn logout<P>(
    State(state): State<AuthAppState<P>>,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = SignOutUseCase::new(state.config.clone());
    use_case.execute(token.as_deref())?;

    let cookie = state.config.session_cookie().build_delete_cookie();

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Redirect::to(&state.config.logout_redirect),
    )
        .into_response())
}
