use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use opentelemetry::{
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_sdk::trace::Tracer as SdkTracer;
use tracing::warn;

use crate::attributes;

use super::{ResolverPath, SpanKey};

/// Everything the engine knows about a resolver invocation, captured before
/// the resolver runs.
#[derive(Debug, Clone)]
pub struct ResolverInfo {
    pub path: ResolverPath,
    pub field_name: String,
    pub parent_type: String,
    pub return_type: String,
    pub args: Option<serde_json::Value>,
}

/// How a resolver settled. Carrying the failure as data keeps the
/// "resolver failed" signal separate from the span mutation it triggers.
#[derive(Debug, Clone)]
pub enum ResolverOutcome {
    Success,
    Failure(ResolverFailure),
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{error_type}: {message}")]
pub struct ResolverFailure {
    pub error_type: String,
    pub message: String,
}

impl ResolverFailure {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        ResolverFailure {
            error_type: error_type.into(),
            message: message.into(),
        }
    }
}

/// Per-request span correlation state.
///
/// One instance exists per root execution, created when the root span starts
/// and drained when the execution settles. Requests never share an instance,
/// so the registry needs no cross-request synchronization; the inner mutex
/// only serializes the concurrently-resolving fields of this one operation.
pub struct RequestTrace {
    tracer: SdkTracer,
    root_cx: Context,
    registry: Mutex<HashMap<SpanKey, Context>>,
}

impl RequestTrace {
    pub fn new(tracer: SdkTracer, root_cx: Context) -> Self {
        RequestTrace {
            tracer,
            root_cx,
            registry: Mutex::new(HashMap::new()),
        }
    }

    pub fn root_context(&self) -> &Context {
        &self.root_cx
    }

    /// Starts the span for one resolver invocation.
    ///
    /// The parent is resolved positionally: the span registered for the
    /// path prefix, or the root span when no prefix span exists (root-level
    /// fields, and fields whose parent is a list element). Sibling order and
    /// completion order play no part in the lookup, so an early-finishing
    /// sibling can never capture another branch's children.
    pub fn on_resolve(&self, info: ResolverInfo) -> ResolverSpanGuard {
        let span_key = SpanKey::from_path(&info.path);

        let parent_cx = info
            .path
            .prev()
            .map(SpanKey::from_path)
            .and_then(|parent_key| self.lock_registry().get(&parent_key).cloned())
            .unwrap_or_else(|| self.root_cx.clone());

        let suffix = info
            .path
            .list_index_suffix()
            .map(|index| format!("[{}]", index))
            .unwrap_or_default();
        let span_name = format!("{}.{}{}", info.parent_type, info.field_name, suffix);

        let mut span_attributes = vec![
            KeyValue::new(attributes::RESOLVER_FIELD_NAME, info.field_name),
            KeyValue::new(attributes::RESOLVER_TYPE_NAME, info.parent_type),
            KeyValue::new(attributes::RESOLVER_RESULT_TYPE, info.return_type),
            KeyValue::new(attributes::SPAN_PATH, span_key.to_string()),
        ];
        if let Some(args) = &info.args {
            span_attributes.push(KeyValue::new(attributes::RESOLVER_ARGS, args.to_string()));
        }

        let span = self
            .tracer
            .span_builder(span_name)
            .with_kind(SpanKind::Internal)
            .with_attributes(span_attributes)
            .start_with_context(&self.tracer, &parent_cx);
        let cx = parent_cx.with_span(span);

        let prior = self.lock_registry().insert(span_key.clone(), cx.clone());
        if prior.is_some() {
            // Should be unreachable with a conforming engine: every path is
            // resolved once. Last write wins, and the warning is the signal
            // that the engine's path encoding changed.
            warn!(span_key = %span_key, "duplicate resolver span key registration");
        }

        ResolverSpanGuard { cx, settled: false }
    }

    /// Drains the registry. Called once per request when the root execution
    /// settles; afterwards the memory held for this request is bounded by
    /// zero registry entries regardless of how many resolvers ran.
    pub fn finish(&self) {
        self.lock_registry().clear();
    }

    pub fn registered_spans(&self) -> usize {
        self.lock_registry().len()
    }

    fn lock_registry(&self) -> std::sync::MutexGuard<'_, HashMap<SpanKey, Context>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle for settling exactly one resolver span.
///
/// `settle` consumes the guard; a guard dropped without settling still ends
/// its span so no span outlives its resolver.
pub struct ResolverSpanGuard {
    cx: Context,
    settled: bool,
}

impl ResolverSpanGuard {
    pub fn settle(mut self, outcome: ResolverOutcome) {
        if let ResolverOutcome::Failure(failure) = &outcome {
            let span = self.cx.span();
            span.set_attribute(KeyValue::new(attributes::ERROR, true));
            span.set_attribute(KeyValue::new(
                attributes::EXCEPTION_CATEGORY,
                attributes::RESOLVER_EXECUTION_ERROR,
            ));
            span.set_attribute(KeyValue::new(
                attributes::EXCEPTION_MESSAGE,
                failure.message.clone(),
            ));
            span.set_attribute(KeyValue::new(
                attributes::EXCEPTION_TYPE,
                failure.error_type.clone(),
            ));
            span.record_error(failure);
        }
        self.end_once();
    }

    /// The context carrying this resolver's span, for engines that want to
    /// propagate it into outgoing calls.
    pub fn context(&self) -> &Context {
        &self.cx
    }

    fn end_once(&mut self) {
        if !self.settled {
            self.settled = true;
            self.cx.span().end();
        }
    }
}

impl Drop for ResolverSpanGuard {
    fn drop(&mut self) {
        self.end_once();
    }
}
