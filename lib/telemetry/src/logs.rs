use opentelemetry_otlp::{Compression, WithExportConfig, WithTonicConfig};
use opentelemetry_sdk::{
    logs::{SdkLoggerProvider, SimpleLogProcessor},
    Resource,
};
use storefront_gateway_config::telemetry::LogsConfig;

use crate::error::TelemetryError;

pub(super) fn build_logger_provider(
    config: &LogsConfig,
    resource: Resource,
) -> Result<SdkLoggerProvider, TelemetryError> {
    let mut builder = SdkLoggerProvider::builder().with_resource(resource);

    if let Some(otlp_config) = &config.otlp {
        tracing::debug!("OTLP log exporter enabled: {}", otlp_config.endpoint);
        let mut exporter_builder = opentelemetry_otlp::LogExporter::builder()
            .with_tonic()
            .with_endpoint(otlp_config.endpoint.clone());

        if otlp_config.compression {
            exporter_builder = exporter_builder.with_compression(Compression::Gzip);
        }

        let exporter = exporter_builder
            .build()
            .map_err(|e| TelemetryError::LogExporterSetup(e.to_string()))?;

        builder = builder.with_log_processor(SimpleLogProcessor::new(exporter));
    }

    if config.console {
        builder = builder.with_log_processor(SimpleLogProcessor::new(
            opentelemetry_stdout::LogExporter::default(),
        ));
    }

    Ok(builder.build())
}
