pub mod attributes;
pub mod context;
pub mod correlation;
pub mod engine;
pub mod error;
pub mod persisted;
pub mod pipeline;
pub mod response;
pub mod schema;

pub use context::{
    ContextError, ContextFactory, DefaultContextFactory, ExecutionContext, RequestDetails,
};
pub use correlation::{
    PathSegment, RequestTrace, ResolverFailure, ResolverInfo, ResolverOutcome, ResolverPath,
    ResolverSpanGuard, SpanKey,
};
pub use engine::{EngineArgs, EngineOutput, EngineResponse, ExecutableSchema};
pub use error::ExecuteError;
pub use persisted::{PersistedQueryError, PersistedQueryStore};
pub use pipeline::{Gateway, GatewayOptions, OperationRequest};
pub use response::{
    CacheControl, ErrorPathSegment, ExecutionResponse, GraphQLError, GraphQLErrorExtensions,
    ResponseExtensions, MASKED_ERROR_MESSAGE,
};
pub use schema::{SchemaBuildError, SchemaFactory, SchemaState};
