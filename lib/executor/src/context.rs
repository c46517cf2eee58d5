use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use http::HeaderMap;
use serde_json::Value;

use crate::correlation::RequestTrace;
use crate::response::CacheControl;

/// The request-level inputs available to context construction.
#[derive(Debug, Default)]
pub struct RequestDetails {
    pub headers: HeaderMap,
}

impl RequestDetails {
    pub fn new(headers: HeaderMap) -> Self {
        RequestDetails { headers }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to build execution context: {message}")]
pub struct ContextError {
    pub message: String,
}

impl ContextError {
    pub fn new(message: impl Into<String>) -> Self {
        ContextError {
            message: message.into(),
        }
    }
}

/// Per-request state threaded through the engine to every resolver.
///
/// `values` carries whatever the context factory derived from the request
/// (session, locale, upstream credentials); the pipeline itself only reads
/// `cache_control` and attaches `trace`.
#[derive(Default)]
pub struct ExecutionContext {
    pub cache_control: Option<CacheControl>,
    pub values: HashMap<String, Value>,
    pub trace: Option<Arc<RequestTrace>>,
}

impl ExecutionContext {
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

/// Builds the [`ExecutionContext`] for one request.
#[async_trait]
pub trait ContextFactory: Send + Sync {
    async fn create(&self, details: &RequestDetails) -> Result<ExecutionContext, ContextError>;
}

/// Factory producing an empty context, for callers that need nothing from
/// the request.
pub struct DefaultContextFactory;

#[async_trait]
impl ContextFactory for DefaultContextFactory {
    async fn create(&self, _details: &RequestDetails) -> Result<ExecutionContext, ContextError> {
        Ok(ExecutionContext::default())
    }
}
