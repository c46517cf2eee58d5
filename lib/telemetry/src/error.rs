#[derive(thiserror::Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to setup span exporter: {0}")]
    SpanExporterSetup(String),
    #[error("Failed to setup log exporter: {0}")]
    LogExporterSetup(String),
}
