//! Google OAuth2 Provider
//!
//! [`IdentityProvider`] implementation for the Google authorization-code
//! flow with PKCE. Credentials come from `CLIENT_ID` / `CLIENT_SECRET`;
//! the token exchange and userinfo fetch go through `reqwest`.

use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;

use crate::domain::entity::user_profile::UserProfile;
use crate::domain::provider::IdentityProvider;
use crate::error::{AuthError, AuthResult};

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Google user info from the userinfo API
#[derive(Debug, Deserialize)]
struct GoogleUser {
    id: String,
    email: String,
    name: Option<String>,
    picture: Option<String>,
}

/// OAuth client type with auth URL and token URL set
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Google OAuth2 identity provider
#[derive(Clone)]
pub struct GoogleProvider {
    client_id: ClientId,
    client_secret: ClientSecret,
    auth_url: AuthUrl,
    token_url: TokenUrl,
    redirect_url: RedirectUrl,
    http: reqwest::Client,
}

impl GoogleProvider {
    /// Create a provider from OAuth client credentials
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: &str,
    ) -> AuthResult<Self> {
        // Following the no-redirect policy recommended for token exchange:
        // an upstream that answers with a redirect is misbehaving.
        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(Self {
            client_id: ClientId::new(client_id.into()),
            client_secret: ClientSecret::new(client_secret.into()),
            auth_url: AuthUrl::new(AUTH_URL.to_string())
                .map_err(|e| AuthError::Internal(e.to_string()))?,
            token_url: TokenUrl::new(TOKEN_URL.to_string())
                .map_err(|e| AuthError::Internal(e.to_string()))?,
            redirect_url: RedirectUrl::new(redirect_url.to_string())
                .map_err(|e| AuthError::Internal(e.to_string()))?,
            http,
        })
    }

    fn oauth_client(&self) -> ConfiguredClient {
        BasicClient::new(self.client_id.clone())
            .set_client_secret(self.client_secret.clone())
            .set_auth_uri(self.auth_url.clone())
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone())
    }
}

impl IdentityProvider for GoogleProvider {
    fn authorize_url(&self, state: &str, pkce_verifier: &str) -> AuthResult<String> {
        let challenge = PkceCodeChallenge::from_code_verifier_sha256(&PkceCodeVerifier::new(
            pkce_verifier.to_string(),
        ));

        let state = state.to_string();
        let (url, _csrf) = self
            .oauth_client()
            .authorize_url(move || CsrfToken::new(state))
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .set_pkce_challenge(challenge)
            .url();

        Ok(url.to_string())
    }

    async fn exchange_code(&self, code: &str, pkce_verifier: &str) -> AuthResult<UserProfile> {
        let token = self
            .oauth_client()
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?;

        let access_token = token.access_token().secret();

        let google_user: GoogleUser = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?
            .json()
            .await
            .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?;

        Ok(UserProfile {
            subject: google_user.id,
            email: google_user.email,
            name: google_user.name,
            picture: google_user.picture,
        })
    }
}
