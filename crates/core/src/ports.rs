//! Port interfaces for talking to the backend
//!
//! The transport returns every HTTP status as data; deciding what a status
//! means (absence, success, failure) happens in this crate.

use async_trait::async_trait;
use momentum_domain::{MomentumError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Status and JSON body of one backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    pub status: u16,
    pub body: Value,
}

impl BackendResponse {
    pub const fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    pub const fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// 404 becomes `None`, 2xx yields the body, anything else is an error.
    pub fn into_optional(self) -> Result<Option<Value>> {
        if self.is_not_found() {
            return Ok(None);
        }
        self.into_required().map(Some)
    }

    /// 2xx yields the body, anything else (404 included) is an error.
    pub fn into_required(self) -> Result<Value> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(MomentumError::backend(self.status, body_message(&self.body)))
        }
    }

    /// Like [`Self::into_optional`], deserializing the body.
    pub fn into_optional_typed<T: DeserializeOwned>(self) -> Result<Option<T>> {
        self.into_optional()?.map(serde_json::from_value).transpose().map_err(Into::into)
    }
}

fn body_message(body: &Value) -> String {
    match body {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Authenticated access to the backend's JSON endpoints.
///
/// Paths are relative to the configured base URL; absolute URLs pass through.
#[async_trait]
pub trait BackendTransport: Send + Sync {
    /// Issue a GET request
    async fn get(&self, path: &str) -> Result<BackendResponse>;

    /// Issue a POST request with an optional JSON body
    async fn post(&self, path: &str, body: Option<&Value>) -> Result<BackendResponse>;

    /// Issue a PUT request with an optional JSON body
    async fn put(&self, path: &str, body: Option<&Value>) -> Result<BackendResponse>;

    /// Issue a DELETE request
    async fn delete(&self, path: &str) -> Result<BackendResponse>;
}
