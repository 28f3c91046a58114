//! Unit tests for Auth crate

#[cfg(test)]
mod entity_tests {
    use crate::domain::entity::login_state::LoginState;
    use crate::domain::entity::session::Session;
    use crate::domain::entity::user_profile::UserProfile;
    use chrono::Duration;

    fn profile() -> UserProfile {
        UserProfile {
            subject: "108234567890".to_string(),
            email: "user@example.com".to_string(),
            name: Some("Test User".to_string()),
            picture: None,
        }
    }

    #[test]
    fn test_session_fresh_not_expired() {
        let session = Session::new(profile(), Duration::hours(24));
        assert!(!session.is_expired());
        assert!(session.remaining_ms() > 0);
    }

    #[test]
    fn test_session_expires() {
        let session = Session::new(profile(), Duration::seconds(-1));
        assert!(session.is_expired());
        assert_eq!(session.remaining_ms(), 0);
    }

    #[test]
    fn test_login_state_matches_state() {
        let state = LoginState::new(
            "expected-state".to_string(),
            "verifier".to_string(),
            Duration::minutes(10),
        );

        assert!(state.matches_state("expected-state"));
        assert!(!state.matches_state("other-state"));
        assert!(!state.matches_state("expected-stat"));
        assert!(!state.matches_state(""));
    }

    #[test]
    fn test_login_state_expires() {
        let state = LoginState::new(
            "s".to_string(),
            "v".to_string(),
            Duration::seconds(-1),
        );
        assert!(state.is_expired());
    }
}

#[cfg(test)]
mod codec_tests {
    use crate::application::config::AuthConfig;
    use crate::application::session_token::SessionCodec;
    use crate::domain::entity::login_state::LoginState;
    use crate::domain::entity::session::Session;
    use crate::domain::entity::user_profile::UserProfile;
    use crate::error::AuthError;
    use chrono::Duration;

    fn profile() -> UserProfile {
        UserProfile {
            subject: "108234567890".to_string(),
            email: "user@example.com".to_string(),
            name: None,
            picture: None,
        }
    }

    fn config_with_keys(keys: Vec<[u8; 32]>) -> AuthConfig {
        AuthConfig {
            signing_keys: keys,
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_session_roundtrip() {
        let codec = SessionCodec::new(&config_with_keys(vec![[1u8; 32]])).unwrap();

        let session = Session::new(profile(), Duration::hours(1));
        let token = codec.encode_session(&session).unwrap();

        let decoded = codec.decode_session(&token).unwrap();
        assert_eq!(decoded.user, session.user);
        assert_eq!(decoded.expires_at_ms, session.expires_at_ms);
    }

    #[test]
    fn test_tampered_session_rejected() {
        let codec = SessionCodec::new(&config_with_keys(vec![[1u8; 32]])).unwrap();

        let token = codec
            .encode_session(&Session::new(profile(), Duration::hours(1)))
            .unwrap();

        // Flip the payload, keep the signature
        let (_, signature) = token.split_once('.').unwrap();
        let forged_payload = platform::crypto::to_base64(b"{\"user\":{}}");
        let forged = format!("{forged_payload}.{signature}");

        assert!(matches!(
            codec.decode_session(&forged),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_expired_session_rejected() {
        let codec = SessionCodec::new(&config_with_keys(vec![[1u8; 32]])).unwrap();

        let token = codec
            .encode_session(&Session::new(profile(), Duration::seconds(-1)))
            .unwrap();

        assert!(matches!(
            codec.decode_session(&token),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_session_survives_key_rotation() {
        let old = SessionCodec::new(&config_with_keys(vec![[1u8; 32]])).unwrap();
        let token = old
            .encode_session(&Session::new(profile(), Duration::hours(1)))
            .unwrap();

        // New primary key, old key kept as COOKIE_KEY_2
        let rotated = SessionCodec::new(&config_with_keys(vec![[2u8; 32], [1u8; 32]])).unwrap();
        assert!(rotated.decode_session(&token).is_ok());

        // Unrelated key rejects the token
        let other = SessionCodec::new(&config_with_keys(vec![[9u8; 32]])).unwrap();
        assert!(matches!(
            other.decode_session(&token),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_login_state_roundtrip() {
        let codec = SessionCodec::new(&config_with_keys(vec![[1u8; 32]])).unwrap();

        let state = LoginState::new(
            "csrf".to_string(),
            "verifier".to_string(),
            Duration::minutes(10),
        );
        let token = codec.encode_login_state(&state).unwrap();

        let decoded = codec.decode_login_state(&token).unwrap();
        assert_eq!(decoded.state, "csrf");
        assert_eq!(decoded.pkce_verifier, "verifier");
    }

    #[test]
    fn test_garbage_login_state_rejected() {
        let codec = SessionCodec::new(&config_with_keys(vec![[1u8; 32]])).unwrap();

        assert!(matches!(
            codec.decode_login_state("not-a-token"),
            Err(AuthError::LoginStateMissing)
        ));
    }

    #[test]
    fn test_expired_login_state_rejected() {
        let codec = SessionCodec::new(&config_with_keys(vec![[1u8; 32]])).unwrap();

        let state = LoginState::new(
            "csrf".to_string(),
            "verifier".to_string(),
            Duration::seconds(-1),
        );
        let token = codec.encode_login_state(&state).unwrap();

        assert!(matches!(
            codec.decode_login_state(&token),
            Err(AuthError::LoginStateExpired)
        ));
    }

    #[test]
    fn test_empty_keyring_rejected() {
        assert!(SessionCodec::new(&config_with_keys(vec![])).is_err());
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use crate::application::config::AuthConfig;
    use crate::application::session_token::SessionCodec;
    use crate::application::{
        BeginLoginUseCase, CheckSessionUseCase, CompleteLoginInput, CompleteLoginUseCase,
        SignOutUseCase,
    };
    use crate::domain::entity::login_state::LoginState;
    use crate::domain::entity::session::Session;
    use crate::domain::entity::user_profile::UserProfile;
    use crate::domain::provider::IdentityProvider;
    use crate::error::{AuthError, AuthResult};
    use chrono::Duration;

    /// Provider stub following the trait seam
    #[derive(Clone, Default)]
    pub(crate) struct MockProvider {
        pub fail_exchange: bool,
    }

    impl IdentityProvider for MockProvider {
        fn authorize_url(&self, state: &str, _pkce_verifier: &str) -> AuthResult<String> {
            Ok(format!(
                "https://accounts.google.com/o/oauth2/v2/auth?state={state}&code_challenge_method=S256"
            ))
        }

        async fn exchange_code(&self, code: &str, _pkce_verifier: &str) -> AuthResult<UserProfile> {
            if self.fail_exchange {
                return Err(AuthError::ExchangeFailed("mock refused".to_string()));
            }

            Ok(UserProfile {
                subject: format!("subject-{code}"),
                email: "user@example.com".to_string(),
                name: Some("Test User".to_string()),
                picture: None,
            })
        }
    }

    fn setup() -> (Arc<MockProvider>, Arc<AuthConfig>) {
        (
            Arc::new(MockProvider::default()),
            Arc::new(AuthConfig::development()),
        )
    }

    #[test]
    fn test_begin_login_builds_url_and_state_cookie() {
        let (provider, config) = setup();

        let output = BeginLoginUseCase::new(provider, config.clone())
            .execute()
            .unwrap();

        let codec = SessionCodec::new(&config).unwrap();
        let login_state = codec.decode_login_state(&output.state_cookie_value).unwrap();

        assert!(!login_state.is_expired());
        assert!(output.authorize_url.contains(&login_state.state));
    }

    #[tokio::test]
    async fn test_complete_login_happy_path() {
        let (provider, config) = setup();

        let begin = BeginLoginUseCase::new(provider.clone(), config.clone())
            .execute()
            .unwrap();

        let codec = SessionCodec::new(&config).unwrap();
        let login_state = codec.decode_login_state(&begin.state_cookie_value).unwrap();

        let output = CompleteLoginUseCase::new(provider, config.clone())
            .execute(CompleteLoginInput {
                code: "4/0AbCdEf".to_string(),
                state: login_state.state.clone(),
                state_cookie: Some(begin.state_cookie_value),
            })
            .await
            .unwrap();

        assert_eq!(output.user.subject, "subject-4/0AbCdEf");

        let session = codec.decode_session(&output.session_token).unwrap();
        assert_eq!(session.user, output.user);
    }

    #[tokio::test]
    async fn test_complete_login_rejects_missing_cookie() {
        let (provider, config) = setup();

        let result = CompleteLoginUseCase::new(provider, config)
            .execute(CompleteLoginInput {
                code: "code".to_string(),
                state: "state".to_string(),
                state_cookie: None,
            })
            .await;

        assert!(matches!(result, Err(AuthError::LoginStateMissing)));
    }

    #[tokio::test]
    async fn test_complete_login_rejects_state_mismatch() {
        let (provider, config) = setup();

        let begin = BeginLoginUseCase::new(provider.clone(), config.clone())
            .execute()
            .unwrap();

        let result = CompleteLoginUseCase::new(provider, config)
            .execute(CompleteLoginInput {
                code: "code".to_string(),
                state: "forged-state".to_string(),
                state_cookie: Some(begin.state_cookie_value),
            })
            .await;

        assert!(matches!(result, Err(AuthError::StateMismatch)));
    }

    #[tokio::test]
    async fn test_complete_login_rejects_expired_state() {
        let (provider, config) = setup();

        let codec = SessionCodec::new(&config).unwrap();
        let stale = LoginState::new(
            "csrf".to_string(),
            "verifier".to_string(),
            Duration::seconds(-1),
        );
        let cookie = codec.encode_login_state(&stale).unwrap();

        let result = CompleteLoginUseCase::new(provider, config)
            .execute(CompleteLoginInput {
                code: "code".to_string(),
                state: "csrf".to_string(),
                state_cookie: Some(cookie),
            })
            .await;

        assert!(matches!(result, Err(AuthError::LoginStateExpired)));
    }

    #[tokio::test]
    async fn test_complete_login_propagates_exchange_failure() {
        let provider = Arc::new(MockProvider {
            fail_exchange: true,
        });
        let config = Arc::new(AuthConfig::development());

        let begin = BeginLoginUseCase::new(provider.clone(), config.clone())
            .execute()
            .unwrap();

        let codec = SessionCodec::new(&config).unwrap();
        let login_state = codec.decode_login_state(&begin.state_cookie_value).unwrap();

        let result = CompleteLoginUseCase::new(provider, config)
            .execute(CompleteLoginInput {
                code: "code".to_string(),
                state: login_state.state,
                state_cookie: Some(begin.state_cookie_value),
            })
            .await;

        assert!(matches!(result, Err(AuthError::ExchangeFailed(_))));
    }

    #[test]
    fn test_check_session() {
        let config = Arc::new(AuthConfig::development());
        let codec = SessionCodec::new(&config).unwrap();

        let user = UserProfile {
            subject: "s".to_string(),
            email: "user@example.com".to_string(),
            name: None,
            picture: None,
        };
        let token = codec
            .encode_session(&Session::new(user, Duration::hours(1)))
            .unwrap();

        let use_case = CheckSessionUseCase::new(config);
        assert!(use_case.is_valid(&token));
        assert!(!use_case.is_valid("garbage"));
        assert_eq!(use_case.session(&token).unwrap().user.subject, "s");
    }

    #[test]
    fn test_sign_out_succeeds_without_session() {
        let config = Arc::new(AuthConfig::development());
        let use_case = SignOutUseCase::new(config);

        assert!(use_case.execute(None).is_ok());
        assert!(use_case.execute(Some("garbage")).is_ok());
    }
}

#[cfg(test)]
mod provider_tests {
    use crate::domain::provider::IdentityProvider;
    use crate::infra::google::GoogleProvider;

    #[test]
    fn test_authorize_url_shape() {
        let provider = GoogleProvider::new(
            "client-id",
            "client-secret",
            "https://localhost:3000/auth/google/callback",
        )
        .unwrap();

        let url = provider
            .authorize_url("the-csrf-state", "the-secret-verifier-the-secret-verifier-123")
            .unwrap();

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth"));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("state=the-csrf-state"));
        assert!(url.contains("scope=openid"));
        assert!(url.contains("redirect_uri="));
        assert!(url.contains("code_challenge="));
        assert!(url.contains("code_challenge_method=S256"));
        // The verifier itself stays in the cookie, never in the URL
        assert!(!url.contains("the-secret-verifier"));
    }

    #[test]
    fn test_rejects_invalid_redirect_url() {
        assert!(GoogleProvider::new("client-id", "client-secret", "not a url").is_err());
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, header};
    use axum::response::Response;
    use axum::routing::get;
    use axum::{Router, middleware};
    use tower::ServiceExt;

    use super::use_case_tests::MockProvider;
    use crate::application::config::AuthConfig;
    use crate::application::session_token::SessionCodec;
    use crate::domain::entity::session::Session;
    use crate::domain::entity::user_profile::UserProfile;
    use crate::presentation::middleware::{AuthMiddlewareState, require_session};
    use crate::presentation::router::auth_router_generic;
    use chrono::Duration;

    fn test_config() -> AuthConfig {
        AuthConfig {
            signing_keys: vec![[7u8; 32]],
            cookie_secure: false,
            ..AuthConfig::default()
        }
    }

    fn app() -> Router {
        auth_router_generic(MockProvider::default(), test_config())
    }

    /// Pull a cookie value out of the response's Set-Cookie headers
    fn set_cookie_value(resp: &Response, name: &str) -> Option<String> {
        resp.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|cookie| {
                let (key, rest) = cookie.split_once('=')?;
                if key == name {
                    Some(rest.split(';').next().unwrap_or("").to_string())
                } else {
                    None
                }
            })
    }

    fn location(resp: &Response) -> &str {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    #[tokio::test]
    async fn test_login_redirects_to_provider() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/google")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), 303);
        assert!(location(&resp).starts_with("https://accounts.google.com/"));
        assert!(location(&resp).contains("state="));

        let cookie = set_cookie_value(&resp, "oauth_state").expect("state cookie set");
        assert!(!cookie.is_empty());
    }

    #[tokio::test]
    async fn test_callback_happy_path_sets_session_cookie() {
        let config = test_config();
        let codec = SessionCodec::new(&config).unwrap();
        let app = auth_router_generic(MockProvider::default(), config);

        let login_resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/google")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let state_cookie = set_cookie_value(&login_resp, "oauth_state").unwrap();
        let login_state = codec.decode_login_state(&state_cookie).unwrap();

        let resp = app
            .oneshot(
                Request::builder()
                    .uri(format!(
                        "/google/callback?code=abc&state={}",
                        login_state.state
                    ))
                    .header(header::COOKIE, format!("oauth_state={state_cookie}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), 303);
        assert_eq!(location(&resp), "/");

        let session_token = set_cookie_value(&resp, "session").expect("session cookie set");
        let session = codec.decode_session(&session_token).unwrap();
        assert_eq!(session.user.subject, "subject-abc");

        // State cookie is cleared alongside
        assert_eq!(set_cookie_value(&resp, "oauth_state").unwrap(), "");
    }

    #[tokio::test]
    async fn test_callback_with_provider_error_redirects_to_failure() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/google/callback?error=access_denied")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), 303);
        assert_eq!(location(&resp), "/failure");
    }

    #[tokio::test]
    async fn test_callback_without_state_cookie_redirects_to_failure() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/google/callback?code=abc&state=xyz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), 303);
        assert_eq!(location(&resp), "/failure");
    }

    #[tokio::test]
    async fn test_logout_clears_session_cookie() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), 303);
        assert_eq!(location(&resp), "/");

        let cleared = resp
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|c| c.starts_with("session="))
            .expect("session cookie cleared");
        assert!(cleared.contains("Max-Age=0"));
        assert!(cleared.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    fn gated_app(config: AuthConfig) -> Router {
        let state = AuthMiddlewareState {
            config: Arc::new(config),
        };

        Router::new()
            .route("/secret", get(|| async { "Your personal secret value is 42!" }))
            .route_layer(middleware::from_fn_with_state(state, require_session))
    }

    #[tokio::test]
    async fn test_protected_route_rejects_anonymous() {
        let resp = gated_app(test_config())
            .oneshot(
                Request::builder()
                    .uri("/secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), 401);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Unauthorized");
        assert_eq!(json["status"], 401);
    }

    #[tokio::test]
    async fn test_protected_route_accepts_valid_session() {
        let config = test_config();
        let codec = SessionCodec::new(&config).unwrap();

        let user = UserProfile {
            subject: "s".to_string(),
            email: "user@example.com".to_string(),
            name: None,
            picture: None,
        };
        let token = codec
            .encode_session(&Session::new(user, Duration::hours(1)))
            .unwrap();

        let resp = gated_app(config)
            .oneshot(
                Request::builder()
                    .uri("/secret")
                    .header(header::COOKIE, format!("session={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Your personal secret value is 42!");
    }

    #[tokio::test]
    async fn test_protected_route_rejects_tampered_cookie() {
        let config = test_config();
        let codec = SessionCodec::new(&config).unwrap();

        let user = UserProfile {
            subject: "s".to_string(),
            email: "user@example.com".to_string(),
            name: None,
            picture: None,
        };
        let token = codec
            .encode_session(&Session::new(user, Duration::hours(1)))
            .unwrap();

        // Truncate the signature
        let mut tampered = token.clone();
        tampered.pop();

        let resp = gated_app(config)
            .oneshot(
                Request::builder()
                    .uri("/secret")
                    .header(header::COOKIE, format!("session={tampered}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), 401);
    }
}
