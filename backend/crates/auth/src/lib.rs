//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities and the identity provider trait
//! - `application/` - Use cases and application services
//! - `infra/` - OAuth2 provider implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Google OAuth2 login (authorization-code flow with PKCE)
//! - Client-side sessions in signed cookies (no server-side store)
//! - CSRF state carried in a short-lived signed cookie
//!
//! ## Security Model
//! - Cookie payloads signed with HMAC-SHA256, key rotation supported
//! - CSRF state compared in constant time at the callback
//! - Session and state cookies are HttpOnly

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::google::GoogleProvider;
pub use presentation::middleware::{AuthMiddlewareState, CurrentUser, require_session};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::login_state::LoginState;
    pub use crate::domain::entity::session::Session;
    pub use crate::domain::entity::user_profile::UserProfile;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;
