use std::sync::Arc;
use std::time::SystemTime;

use graphql_parser::parse_query;
use opentelemetry::{
    logs::{LogRecord, Logger, LoggerProvider, Severity},
    trace::{SpanKind, TraceContextExt, Tracer, TracerProvider},
    Context, InstrumentationScope, KeyValue,
};
use opentelemetry_sdk::{
    logs::{SdkLogger, SdkLoggerProvider},
    trace::{SdkTracerProvider, Tracer as SdkTracer},
};
use serde::Deserialize;
use serde_json::{Map, Value};
use storefront_gateway_config::telemetry::InstrumentationConfig;
use tracing::warn;

use crate::attributes;
use crate::context::{ContextFactory, RequestDetails};
use crate::correlation::RequestTrace;
use crate::engine::{EngineArgs, EngineOutput, EngineResponse};
use crate::error::ExecuteError;
use crate::persisted::PersistedQueryStore;
use crate::response::{mask_errors, ExecutionResponse, ResponseExtensions};
use crate::schema::{SchemaFactory, SchemaState};

const ANONYMOUS_OPERATION: &str = "Anonymous Operation";
const SCOPE_NAME: &str = "storefront-gateway";

/// One incoming GraphQL operation, as posted by a client.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationRequest {
    pub operation_name: Option<String>,
    pub variables: Map<String, Value>,
    pub query: Option<String>,
}

pub struct GatewayOptions {
    pub persisted: PersistedQueryStore,
    pub schema_factory: Arc<dyn SchemaFactory>,
    pub context_factory: Arc<dyn ContextFactory>,
    pub tracer_provider: SdkTracerProvider,
    pub logger_provider: SdkLoggerProvider,
    pub instrumentation: InstrumentationConfig,
}

/// The execution pipeline: query resolution, parsing, schema memoization,
/// context construction, engine dispatch, telemetry and error masking.
pub struct Gateway {
    persisted: PersistedQueryStore,
    schema: SchemaState,
    context_factory: Arc<dyn ContextFactory>,
    tracer: SdkTracer,
    logger: SdkLogger,
    instrumentation: InstrumentationConfig,
}

impl Gateway {
    pub fn new(options: GatewayOptions) -> Self {
        let scope = InstrumentationScope::builder(SCOPE_NAME)
            .with_version(env!("CARGO_PKG_VERSION"))
            .build();

        Gateway {
            persisted: options.persisted,
            schema: SchemaState::new(options.schema_factory),
            context_factory: options.context_factory,
            tracer: options.tracer_provider.tracer_with_scope(scope.clone()),
            logger: options.logger_provider.logger_with_scope(scope),
            instrumentation: options.instrumentation,
        }
    }

    /// Runs one operation end to end.
    ///
    /// An explicit non-empty `query` always wins; otherwise the document is
    /// looked up in the persisted store by operation name. Requests that
    /// resolve to no document are rejected before any schema or context work
    /// happens.
    pub async fn execute(
        &self,
        request: OperationRequest,
        details: RequestDetails,
    ) -> Result<ExecutionResponse, ExecuteError> {
        let query = self.resolve_query(&request)?;
        let document = parse_query::<String>(&query)?.into_static();

        let schema = self.schema.get().await?;
        let mut context = self.context_factory.create(&details).await?;

        let operation_name = request.operation_name.as_deref();
        let display_name = operation_name.unwrap_or(ANONYMOUS_OPERATION).to_string();

        let mut span_attributes = vec![KeyValue::new(
            attributes::EXECUTION_OPERATION_NAME,
            display_name.clone(),
        )];
        if self.instrumentation.document {
            span_attributes.push(KeyValue::new(
                attributes::EXECUTION_OPERATION_DOCUMENT,
                document.to_string(),
            ));
        }
        if self.instrumentation.variables {
            span_attributes.push(KeyValue::new(
                attributes::EXECUTION_VARIABLES,
                Value::Object(request.variables.clone()).to_string(),
            ));
        }

        let root_span = self
            .tracer
            .span_builder(display_name.clone())
            .with_kind(SpanKind::Server)
            .with_attributes(span_attributes)
            .start(&self.tracer);
        let root_cx = Context::current_with_span(root_span);

        if self.instrumentation.resolvers {
            context.trace = Some(Arc::new(RequestTrace::new(
                self.tracer.clone(),
                root_cx.clone(),
            )));
        }

        let output = schema
            .execute(EngineArgs {
                document: &document,
                query: &query,
                operation_name,
                variables: &request.variables,
                context: &context,
            })
            .await;

        let response = match output {
            EngineOutput::Complete(response) => {
                self.emit_operation_log(&root_cx, &display_name, &document, &request, &response);
                response
            }
            EngineOutput::Incremental => {
                warn!(
                    operation_name = %display_name,
                    "incremental delivery is not supported, discarding stream"
                );
                EngineResponse {
                    data: Value::Null,
                    errors: vec![],
                }
            }
        };

        {
            let span = root_cx.span();
            if !response.errors.is_empty() {
                let serialized_errors =
                    serde_json::to_string(&response.errors).unwrap_or_default();
                span.set_attribute(KeyValue::new(attributes::ERROR, true));
                span.set_attribute(KeyValue::new(
                    attributes::EXCEPTION_CATEGORY,
                    attributes::EXECUTION_ERROR,
                ));
                span.set_attribute(KeyValue::new(
                    attributes::EXCEPTION_MESSAGE,
                    serialized_errors.clone(),
                ));
                span.set_attribute(KeyValue::new(attributes::EXECUTION_ERROR, serialized_errors));
            } else if self.instrumentation.result {
                span.set_attribute(KeyValue::new(
                    attributes::EXECUTION_RESULT,
                    response.data.to_string(),
                ));
            }
            span.end();
        }

        if let Some(trace) = &context.trace {
            trace.finish();
        }

        Ok(ExecutionResponse {
            data: response.data,
            errors: mask_errors(response.errors),
            extensions: ResponseExtensions {
                cache_control: context.cache_control,
            },
        })
    }

    fn resolve_query(&self, request: &OperationRequest) -> Result<String, ExecuteError> {
        if let Some(query) = &request.query {
            if !query.trim().is_empty() {
                return Ok(query.clone());
            }
        }
        request
            .operation_name
            .as_deref()
            .and_then(|name| self.persisted.get(name))
            .map(str::to_string)
            .ok_or_else(|| ExecuteError::MissingQuery {
                operation_name: request.operation_name.clone(),
            })
    }

    /// One log record per settled operation, correlated with the root span
    /// through the attached context. ERROR when the engine reported errors,
    /// INFO otherwise.
    fn emit_operation_log(
        &self,
        root_cx: &Context,
        display_name: &str,
        document: &graphql_parser::query::Document<'static, String>,
        request: &OperationRequest,
        response: &EngineResponse,
    ) {
        let severity = if !response.errors.is_empty() {
            (Severity::Error, "ERROR")
        } else {
            (Severity::Info, "INFO")
        };

        let mut record = self.logger.create_log_record();
        record.set_timestamp(SystemTime::now());
        record.set_severity_number(severity.0);
        record.set_severity_text(severity.1);
        record.set_body(display_name.to_string().into());
        record.add_attribute(
            attributes::EXECUTION_OPERATION_NAME,
            display_name.to_string(),
        );
        record.add_attribute(attributes::EXECUTION_OPERATION_DOCUMENT, document.to_string());
        record.add_attribute(
            attributes::EXECUTION_VARIABLES,
            Value::Object(request.variables.clone()).to_string(),
        );
        if !response.errors.is_empty() {
            record.add_attribute(
                attributes::EXECUTION_ERROR,
                serde_json::to_string(&response.errors).unwrap_or_default(),
            );
        } else if self.instrumentation.result {
            record.add_attribute(attributes::EXECUTION_RESULT, response.data.to_string());
        }

        // Attach the root context so the record carries its trace and span
        // ids.
        let _guard = root_cx.clone().attach();
        self.logger.emit(record);
    }
}
