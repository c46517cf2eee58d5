use opentelemetry_otlp::{Compression, WithExportConfig, WithTonicConfig};
use opentelemetry_sdk::{
    trace::{SdkTracerProvider, SimpleSpanProcessor},
    Resource,
};
use storefront_gateway_config::telemetry::TracesConfig;

use crate::error::TelemetryError;

/// Spans are dispatched synchronously as they end, one export call per span.
/// Exporters are attached as independent processors: the OTLP collector and
/// the console exporter never block or fail each other.
pub(super) fn build_tracer_provider(
    config: &TracesConfig,
    resource: Resource,
) -> Result<SdkTracerProvider, TelemetryError> {
    let mut builder = SdkTracerProvider::builder().with_resource(resource);

    if let Some(otlp_config) = &config.otlp {
        tracing::debug!("OTLP span exporter enabled: {}", otlp_config.endpoint);
        let mut exporter_builder = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(otlp_config.endpoint.clone());

        if otlp_config.compression {
            exporter_builder = exporter_builder.with_compression(Compression::Gzip);
        }

        let exporter = exporter_builder
            .build()
            .map_err(|e| TelemetryError::SpanExporterSetup(e.to_string()))?;

        builder = builder.with_span_processor(SimpleSpanProcessor::new(exporter));
    }

    if config.console {
        builder =
            builder.with_span_processor(SimpleSpanProcessor::new(
                opentelemetry_stdout::SpanExporter::default(),
            ));
    }

    Ok(builder.build())
}
