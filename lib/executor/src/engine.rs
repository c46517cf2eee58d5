use async_trait::async_trait;
use graphql_parser::query::Document;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::context::ExecutionContext;
use crate::response::GraphQLError;

/// Everything the engine receives for one execution.
pub struct EngineArgs<'a> {
    /// The parsed operation document.
    pub document: &'a Document<'static, String>,
    /// The raw document text the document was parsed from.
    pub query: &'a str,
    pub operation_name: Option<&'a str>,
    pub variables: &'a Map<String, Value>,
    pub context: &'a ExecutionContext,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineResponse {
    pub data: Value,
    pub errors: Vec<GraphQLError>,
}

/// What the engine produced. Incremental delivery (`@defer`/`@stream`) is
/// not supported by this pipeline and is reported distinctly so the caller
/// can reject it instead of hanging on a stream.
pub enum EngineOutput {
    Complete(EngineResponse),
    Incremental,
}

/// The execution engine seam.
///
/// Implementations run the operation against their type system and report
/// each resolver invocation through `context.trace` when it is set, so that
/// the pipeline can correlate resolver spans positionally.
#[async_trait]
pub trait ExecutableSchema: Send + Sync {
    async fn execute(&self, args: EngineArgs<'_>) -> EngineOutput;
}
