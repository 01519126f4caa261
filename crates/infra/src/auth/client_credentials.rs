//! OAuth2 client-credentials grant against the Momentum identity provider
//!
//! Tokens are cached in memory and refreshed once they are within the
//! configured margin of expiry. Concurrent callers share one refresh.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use momentum_domain::{MomentumConfig, MomentumError, Result};
use reqwest::Method;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use super::AccessTokenProvider;
use crate::http::HttpClient;

/// Lifetime assumed when the token response omits `expires_in`.
const FALLBACK_EXPIRES_IN_SECS: u64 = 3600;

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Token provider using the client-credentials flow with a `resource`
/// parameter.
pub struct ClientCredentialsTokenProvider {
    http: HttpClient,
    token_url: String,
    client_id: String,
    client_secret: String,
    resource: String,
    refresh_margin: Duration,
    cache: Mutex<Option<CachedToken>>,
}

impl ClientCredentialsTokenProvider {
    pub fn new(
        http: HttpClient,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        resource: impl Into<String>,
        refresh_margin: Duration,
    ) -> Self {
        Self {
            http,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            resource: resource.into(),
            refresh_margin,
            cache: Mutex::new(None),
        }
    }

    pub fn from_config(config: &MomentumConfig, http: HttpClient) -> Self {
        Self::new(
            http,
            config.auth.token_url.clone(),
            config.auth.client_id.clone(),
            config.auth.client_secret.clone(),
            config.auth.resource.clone(),
            config.refresh_margin(),
        )
    }

    /// Drop the cached token so the next call fetches a fresh one.
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    #[instrument(skip(self), fields(token_url = %self.token_url))]
    async fn fetch_token(&self) -> Result<CachedToken> {
        let request = self.http.request(Method::POST, self.token_url.as_str()).form(&[
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("resource", self.resource.as_str()),
        ]);

        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| MomentumError::Auth(format!("Token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MomentumError::Auth(format!(
                "Token request rejected ({status}): {error_text}"
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| MomentumError::Auth(format!("Failed to parse token response: {e}")))?;

        let lifetime = body.expires_in.map_or(Ok(FALLBACK_EXPIRES_IN_SECS), ExpiresIn::seconds)?;
        info!(expires_in = lifetime, "obtained access token");

        Ok(CachedToken {
            token: body.access_token,
            expires_at: Instant::now() + Duration::from_secs(lifetime),
        })
    }
}

#[async_trait]
impl AccessTokenProvider for ClientCredentialsTokenProvider {
    async fn access_token(&self) -> Result<String> {
        let mut cache = self.cache.lock().await;

        if let Some(cached) = cache.as_ref() {
            if Instant::now() + self.refresh_margin < cached.expires_at {
                return Ok(cached.token.clone());
            }
            debug!("cached access token is inside the refresh margin");
        }

        let fresh = self.fetch_token().await?;
        let token = fresh.token.clone();
        *cache = Some(fresh);
        Ok(token)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<ExpiresIn>,
}

/// The identity provider sends `expires_in` as a number or a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExpiresIn {
    Seconds(u64),
    Text(String),
}

impl ExpiresIn {
    fn seconds(self) -> Result<u64> {
        match self {
            Self::Seconds(secs) => Ok(secs),
            Self::Text(raw) => raw.trim().parse().map_err(|_| {
                MomentumError::Auth(format!("Token response has invalid expires_in: {raw}"))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn provider(server: &MockServer, margin: Duration) -> ClientCredentialsTokenProvider {
        ClientCredentialsTokenProvider::new(
            HttpClient::new().expect("http client"),
            format!("{}/oauth2/token", server.uri()),
            "client-1",
            "s3cret",
            "resource-1",
            margin,
        )
    }

    #[tokio::test]
    async fn posts_client_credentials_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=client-1"))
            .and(body_string_contains("client_secret=s3cret"))
            .and(body_string_contains("resource=resource-1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "tok-1", "expires_in": "3599"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let token = provider(&server, Duration::from_secs(300)).access_token().await.unwrap();
        assert_eq!(token, "tok-1");
    }

    #[tokio::test]
    async fn caches_token_until_refresh_margin() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "tok-1", "expires_in": 3600})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider(&server, Duration::from_secs(300));
        assert_eq!(provider.access_token().await.unwrap(), "tok-1");
        assert_eq!(provider.access_token().await.unwrap(), "tok-1");
    }

    #[tokio::test]
    async fn refreshes_tokens_inside_margin() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "short", "expires_in": 60})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let provider = provider(&server, Duration::from_secs(300));
        provider.access_token().await.unwrap();
        provider.access_token().await.unwrap();
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "tok", "expires_in": 3600})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let provider = provider(&server, Duration::from_secs(0));
        provider.access_token().await.unwrap();
        provider.invalidate().await;
        provider.access_token().await.unwrap();
    }

    #[tokio::test]
    async fn rejected_request_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_client"))
            .mount(&server)
            .await;

        let err = provider(&server, Duration::from_secs(300)).access_token().await.unwrap_err();
        match err {
            MomentumError::Auth(msg) => assert!(msg.contains("invalid_client")),
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_expiry_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "tok", "expires_in": "soon"})),
            )
            .mount(&server)
            .await;

        let err = provider(&server, Duration::from_secs(300)).access_token().await.unwrap_err();
        assert_eq!(err.label(), "auth");
    }

    #[tokio::test]
    async fn static_provider_returns_its_token() {
        let provider = crate::auth::StaticTokenProvider::new("fixed");
        assert_eq!(provider.access_token().await.unwrap(), "fixed");
    }
}
