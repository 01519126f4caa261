//! Authenticated HTTP transport for the Momentum backend
//!
//! Implements the core [`BackendTransport`] port on top of [`HttpClient`].
//! Statuses are returned as data; the core crate decides what they mean.

use std::sync::Arc;

use async_trait::async_trait;
use momentum_core::{BackendResponse, BackendTransport};
use momentum_domain::{MomentumError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::auth::AccessTokenProvider;
use crate::errors::InfraError;
use crate::http::HttpClient;

const API_KEY_HEADER: &str = "apikey";

/// [`BackendTransport`] that sends the API key and a bearer token on every
/// request.
pub struct MomentumHttpTransport {
    http: HttpClient,
    base_url: String,
    api_key: HeaderValue,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl MomentumHttpTransport {
    /// # Errors
    /// Returns `MomentumError::Config` if the base URL does not parse or the
    /// API key is not a valid header value.
    pub fn new(
        http: HttpClient,
        base_url: &str,
        api_key: &str,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self> {
        Url::parse(base_url).map_err(|e| MomentumError::from(InfraError::from(e)))?;
        let mut api_key = HeaderValue::from_str(api_key)
            .map_err(|_| MomentumError::Config("api key is not a valid header value".into()))?;
        api_key.set_sensitive(true);

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            tokens,
        })
    }

    /// Absolute URLs pass through; anything else is joined onto the base URL.
    pub fn normalize_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    async fn headers(&self) -> Result<HeaderMap> {
        let token = self.tokens.access_token().await?;
        let mut bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| MomentumError::Auth("access token is not a valid header value".into()))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, self.api_key.clone());
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    #[instrument(skip(self, method, body), fields(%method, path = %endpoint))]
    async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<BackendResponse> {
        let url = self.normalize_url(endpoint);
        let mut request = self.http.request(method, url.as_str()).headers(self.headers().await?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = self.http.send(request).await?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| MomentumError::from(InfraError::from(e)))?;
        let body = parse_body(&text);

        if (200..300).contains(&status) || status == 404 {
            debug!(status, "backend responded");
        } else {
            warn!(status, body = %text, "backend returned an error status");
        }
        Ok(BackendResponse::new(status, body))
    }
}

/// Empty bodies become `null`; bodies that are not JSON are kept as text.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[async_trait]
impl BackendTransport for MomentumHttpTransport {
    async fn get(&self, path: &str) -> Result<BackendResponse> {
        self.execute(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Option<&Value>) -> Result<BackendResponse> {
        self.execute(Method::POST, path, body).await
    }

    async fn put(&self, path: &str, body: Option<&Value>) -> Result<BackendResponse> {
        self.execute(Method::PUT, path, body).await
    }

    async fn delete(&self, path: &str) -> Result<BackendResponse> {
        self.execute(Method::DELETE, path, None).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::StaticTokenProvider;

    fn transport(base_url: &str) -> MomentumHttpTransport {
        MomentumHttpTransport::new(
            HttpClient::new().expect("http client"),
            base_url,
            "key-123",
            Arc::new(StaticTokenProvider::new("tok")),
        )
        .expect("transport")
    }

    #[test]
    fn normalize_url_joins_relative_paths() {
        let transport = transport("https://momentum.example.dk/api/");
        assert_eq!(
            transport.normalize_url("/citizens/find?cpr=0101901234"),
            "https://momentum.example.dk/api/citizens/find?cpr=0101901234"
        );
        assert_eq!(transport.normalize_url("tasks"), "https://momentum.example.dk/api/tasks");
        assert_eq!(transport.normalize_url("https://other.dk/x"), "https://other.dk/x");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = MomentumHttpTransport::new(
            HttpClient::new().expect("http client"),
            "not a url",
            "key",
            Arc::new(StaticTokenProvider::new("tok")),
        );
        assert!(matches!(result, Err(MomentumError::Config(_))));
    }

    #[test]
    fn body_parsing_handles_empty_and_text() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("  "), Value::Null);
        assert_eq!(parse_body("{\"a\":1}"), json!({"a": 1}));
        assert_eq!(parse_body("true"), json!(true));
        assert_eq!(parse_body("plain"), json!("plain"));
    }

    #[tokio::test]
    async fn sends_api_key_and_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/citizens/find"))
            .and(query_param("cpr", "0101901234"))
            .and(header("apikey", "key-123"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "c-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let response = transport(&format!("{}/api", server.uri()))
            .get("citizens/find?cpr=0101901234")
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, json!({"id": "c-1"}));
    }

    #[tokio::test]
    async fn posts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tasks"))
            .and(body_json(json!({"title": "Ring op"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "t-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let response =
            transport(&server.uri()).post("/tasks", Some(&json!({"title": "Ring op"}))).await.unwrap();
        assert_eq!(response.status, 201);
    }

    #[tokio::test]
    async fn error_statuses_are_returned_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let transport = transport(&server.uri());
        let response = transport.put("tasks/t-1/0", None).await.unwrap();
        assert_eq!(response, BackendResponse::new(500, json!("boom")));

        let response = transport.delete("tasks/t-1").await.unwrap();
        assert!(response.is_not_found());
        assert_eq!(response.body, Value::Null);
    }

    #[tokio::test]
    async fn token_failures_abort_the_request() {
        struct Failing;

        #[async_trait]
        impl AccessTokenProvider for Failing {
            async fn access_token(&self) -> Result<String> {
                Err(MomentumError::Auth("no token".into()))
            }
        }

        let server = MockServer::start().await;
        let transport = MomentumHttpTransport::new(
            HttpClient::new().expect("http client"),
            &server.uri(),
            "key",
            Arc::new(Failing),
        )
        .unwrap();

        let err = transport.get("citizens/c-1").await.unwrap_err();
        assert_eq!(err.label(), "auth");
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
