use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use momentum_core::{BackendResponse, BackendTransport};
use momentum_domain::{MomentumError, Result as DomainResult};
use serde_json::{json, Value};

/// One call seen by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

type Handler = dyn Fn(&RecordedRequest) -> BackendResponse + Send + Sync;

/// In-memory transport.
///
/// Either replays queued responses in order or answers every request with a
/// handler closure. All requests are recorded for later assertions.
#[derive(Clone)]
pub struct ScriptedTransport {
    queue: Arc<Mutex<VecDeque<BackendResponse>>>,
    handler: Option<Arc<Handler>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    /// Replay `responses` in order; extra requests fail.
    pub fn queued(responses: Vec<BackendResponse>) -> Self {
        Self {
            queue: Arc::new(Mutex::new(responses.into())),
            handler: None,
            requests: Arc::default(),
        }
    }

    /// Answer every request with `handler`.
    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> BackendResponse + Send + Sync + 'static,
    {
        Self { queue: Arc::default(), handler: Some(Arc::new(handler)), requests: Arc::default() }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn respond(&self, request: RecordedRequest) -> DomainResult<BackendResponse> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(handler) = &self.handler {
            return Ok(handler(&request));
        }
        self.queue.lock().unwrap().pop_front().ok_or_else(|| {
            MomentumError::Internal(format!(
                "no scripted response for {} {}",
                request.method, request.path
            ))
        })
    }
}

#[async_trait]
impl BackendTransport for ScriptedTransport {
    async fn get(&self, path: &str) -> DomainResult<BackendResponse> {
        self.respond(RecordedRequest { method: "GET", path: path.to_string(), body: None })
    }

    async fn post(&self, path: &str, body: Option<&Value>) -> DomainResult<BackendResponse> {
        self.respond(RecordedRequest { method: "POST", path: path.to_string(), body: body.cloned() })
    }

    async fn put(&self, path: &str, body: Option<&Value>) -> DomainResult<BackendResponse> {
        self.respond(RecordedRequest { method: "PUT", path: path.to_string(), body: body.cloned() })
    }

    async fn delete(&self, path: &str) -> DomainResult<BackendResponse> {
        self.respond(RecordedRequest { method: "DELETE", path: path.to_string(), body: None })
    }
}

/// How the fake paged backend reports completion.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub enum SignalStyle {
    TotalCount,
    TotalSearchCount,
    HasMore,
    /// Reports a total far above what it serves and always claims more.
    Stuck,
}

/// Handler serving `total` numbered items in pages of the requested size.
#[allow(dead_code)]
pub fn paged_backend(
    total: usize,
    style: SignalStyle,
) -> impl Fn(&RecordedRequest) -> BackendResponse + Send + Sync + 'static {
    move |request| {
        let paging = &request.body.as_ref().unwrap()["paging"];
        let page = paging["pageNumber"].as_u64().unwrap() as usize;
        let size = paging["pageSize"].as_u64().unwrap() as usize;

        let (start, end) = match style {
            SignalStyle::Stuck => (page * size, (page + 1) * size),
            _ => ((page * size).min(total), ((page + 1) * size).min(total)),
        };
        let data: Vec<Value> = (start..end).map(|i| json!({"id": i})).collect();

        let body = match style {
            SignalStyle::TotalCount => json!({"data": data, "totalCount": total}),
            SignalStyle::TotalSearchCount => json!({"data": data, "totalSearchCount": total}),
            SignalStyle::HasMore => json!({"data": data, "hasMore": end < total}),
            SignalStyle::Stuck => json!({"data": data, "totalCount": 1_000_000, "hasMore": true}),
        };
        BackendResponse::new(200, body)
    }
}
