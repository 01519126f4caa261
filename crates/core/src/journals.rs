//! Journal note client

use std::sync::Arc;

use momentum_domain::Result;
use serde_json::Value;
use tracing::instrument;

use crate::paths::encode_id;
use crate::ports::BackendTransport;

#[derive(Clone)]
pub struct JournalsClient {
    transport: Arc<dyn BackendTransport>,
}

impl JournalsClient {
    pub fn new(transport: Arc<dyn BackendTransport>) -> Self {
        Self { transport }
    }

    /// Journal notes on a citizen or company.
    #[instrument(skip(self))]
    pub async fn for_reference(&self, reference_id: &str) -> Result<Option<Value>> {
        let id = encode_id("reference id", reference_id)?;
        self.transport.get(&format!("journals/{id}")).await?.into_optional()
    }
}
