use crate::context::ContextError;
use crate::persisted::PersistedQueryError;
use crate::schema::SchemaBuildError;

/// A request the pipeline rejected before (or instead of) producing a
/// GraphQL response.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error("no query found for operation {operation_name:?}")]
    MissingQuery { operation_name: Option<String> },
    #[error("failed to parse operation document: {0}")]
    Parse(#[from] graphql_parser::query::ParseError),
    #[error(transparent)]
    SchemaBuild(#[from] SchemaBuildError),
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    PersistedQueries(#[from] PersistedQueryError),
}
