//! Bearer-token acquisition for backend requests

pub mod client_credentials;

use async_trait::async_trait;
use momentum_domain::Result;

pub use client_credentials::ClientCredentialsTokenProvider;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with fixed tokens.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token, refreshing it if needed.
    async fn access_token(&self) -> Result<String>;
}

/// Provider that always hands out the same token.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}
