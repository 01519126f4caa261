//! Taxonomy client

use std::sync::Arc;

use momentum_domain::Result;
use serde_json::Value;
use tracing::instrument;

use crate::paths::{encode_id, list_items};
use crate::ports::BackendTransport;

#[derive(Clone)]
pub struct TaxonomiesClient {
    transport: Arc<dyn BackendTransport>,
}

impl TaxonomiesClient {
    pub fn new(transport: Arc<dyn BackendTransport>) -> Self {
        Self { transport }
    }

    /// Every taxonomy group.
    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<Value>> {
        Ok(self.transport.get("taxonomies").await?.into_optional()?.map(list_items).unwrap_or_default())
    }

    /// One taxonomy group by code.
    #[instrument(skip(self))]
    pub async fn group(&self, code: &str) -> Result<Option<Value>> {
        let code = encode_id("taxonomy code", code)?;
        self.transport.get(&format!("taxonomies/{code}")).await?.into_optional()
    }

    /// First item named `name` (by `name` or `title`, case-insensitive)
    /// across all groups' `items`.
    #[instrument(skip(self))]
    pub async fn find_item(&self, name: &str) -> Result<Option<Value>> {
        let wanted = name.trim().to_lowercase();
        let found = self.all().await?.into_iter().find_map(|mut group| {
            match group.get_mut("items").map(Value::take) {
                Some(Value::Array(items)) => items.into_iter().find(|item| {
                    ["name", "title"].iter().any(|field| {
                        item.get(*field)
                            .and_then(Value::as_str)
                            .is_some_and(|value| value.trim().to_lowercase() == wanted)
                    })
                }),
                _ => None,
            }
        });
        Ok(found)
    }
}
