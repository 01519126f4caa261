//! Entry point wiring configuration, authentication and transport together

use std::sync::Arc;

use momentum_core::{
    BackendTransport, CitizensClient, CompaniesClient, JournalsClient, TagsClient, TasksClient,
    TaxonomiesClient,
};
use momentum_domain::{MomentumConfig, Result};
use tracing::info;

use crate::auth::{AccessTokenProvider, ClientCredentialsTokenProvider};
use crate::http::HttpClient;
use crate::transport::MomentumHttpTransport;

/// Owns one authenticated transport and hands out per-entity clients that
/// share it.
#[derive(Clone)]
pub struct MomentumClientManager {
    transport: Arc<dyn BackendTransport>,
}

impl MomentumClientManager {
    /// Validate `config` and build the HTTP client, token provider and
    /// transport.
    ///
    /// # Errors
    /// Returns `MomentumError::Config` for invalid configuration.
    pub fn from_config(config: &MomentumConfig) -> Result<Self> {
        config.validate()?;

        let http = HttpClient::builder().timeout(config.timeout()).build()?;
        let tokens: Arc<dyn AccessTokenProvider> =
            Arc::new(ClientCredentialsTokenProvider::from_config(config, http.clone()));
        let transport =
            MomentumHttpTransport::new(http, &config.api.base_url, &config.api.api_key, tokens)?;

        info!(base_url = %config.api.base_url, "momentum client initialised");
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<dyn BackendTransport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> Arc<dyn BackendTransport> {
        Arc::clone(&self.transport)
    }

    pub fn citizens(&self) -> CitizensClient {
        CitizensClient::new(self.transport())
    }

    pub fn companies(&self) -> CompaniesClient {
        CompaniesClient::new(self.transport())
    }

    pub fn tags(&self) -> TagsClient {
        TagsClient::new(self.transport())
    }

    pub fn tasks(&self) -> TasksClient {
        TasksClient::new(self.transport())
    }

    pub fn taxonomies(&self) -> TaxonomiesClient {
        TaxonomiesClient::new(self.transport())
    }

    pub fn journals(&self) -> JournalsClient {
        JournalsClient::new(self.transport())
    }
}
