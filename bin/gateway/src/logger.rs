use storefront_gateway_config::log::LoggingConfig;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, time::UtcTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Console logging for the process itself. Per-operation telemetry goes
/// through the OpenTelemetry log pipeline instead.
pub fn configure_logging(config: &LoggingConfig) {
    let timer = UtcTime::rfc_3339();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.env_filter_str()));

    let layer = fmt::Layer::<Registry>::default()
        .compact()
        .with_timer(timer)
        .with_span_events(FmtSpan::CLOSE)
        .boxed();

    tracing_subscriber::registry().with(layer).with(filter).init();
}
