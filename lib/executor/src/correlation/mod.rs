//! Span correlation for field resolvers.
//!
//! The underlying execution engine settles resolvers in data-dependency
//! order, not call order, so there is no call stack to derive span parentage
//! from. Parent spans are resolved positionally instead: every resolver span
//! is registered under the [`SpanKey`] of its path, and a starting resolver
//! looks up the span registered for its path prefix. The registry lives for
//! exactly one root execution and is drained when that execution settles.

mod path;
mod trace;

pub use path::{PathSegment, ResolverPath, SpanKey};
pub use trace::{RequestTrace, ResolverFailure, ResolverInfo, ResolverOutcome, ResolverSpanGuard};
