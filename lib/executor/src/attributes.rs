//! Attribute names shared by the root execution span, the per-resolver spans,
//! and the per-operation log record.

pub const EXECUTION_ERROR: &str = "graphql.execute.error";
pub const EXECUTION_RESULT: &str = "graphql.execute.result";
pub const EXECUTION_OPERATION_NAME: &str = "graphql.execute.operationName";
pub const EXECUTION_OPERATION_DOCUMENT: &str = "graphql.execute.document";
pub const EXECUTION_VARIABLES: &str = "graphql.execute.variables";

pub const RESOLVER_EXECUTION_ERROR: &str = "graphql.resolver.error";
pub const RESOLVER_FIELD_NAME: &str = "graphql.resolver.fieldName";
pub const RESOLVER_TYPE_NAME: &str = "graphql.resolver.typeName";
pub const RESOLVER_RESULT_TYPE: &str = "graphql.resolver.resultType";
pub const RESOLVER_ARGS: &str = "graphql.resolver.args";

/// Human-readable dotted path of the resolver, for trace UIs. Lookup identity
/// is the structured [`crate::SpanKey`], never this string.
pub const SPAN_PATH: &str = "meta.span.path";

pub const ERROR: &str = "error";
pub const EXCEPTION_CATEGORY: &str = "exception.category";
pub const EXCEPTION_MESSAGE: &str = "exception.message";
pub const EXCEPTION_TYPE: &str = "exception.type";
