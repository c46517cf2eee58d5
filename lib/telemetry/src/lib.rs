use opentelemetry_sdk::{logs::SdkLoggerProvider, trace::SdkTracerProvider, Resource};
use storefront_gateway_config::{store::StoreConfig, telemetry::TelemetryConfig};

use crate::{logs::build_logger_provider, traces::build_tracer_provider};

mod error;
pub mod logs;
pub mod resource;
pub mod traces;

pub use error::TelemetryError;

/// The configured telemetry backends for one gateway process.
///
/// Both providers dispatch synchronously: every finished span and log record
/// triggers an immediate export call on each configured exporter, with no
/// batching or backpressure. A failing exporter never fails the request path.
pub struct OpenTelemetry {
    pub tracer_provider: SdkTracerProvider,
    pub logger_provider: SdkLoggerProvider,
    pub resource: Resource,
}

impl OpenTelemetry {
    pub fn from_config(
        config: &TelemetryConfig,
        store: &StoreConfig,
    ) -> Result<OpenTelemetry, TelemetryError> {
        let resource = resource::build_resource(&config.service, store);

        let tracer_provider = build_tracer_provider(&config.traces, resource.clone())?;
        let logger_provider = build_logger_provider(&config.logs, resource.clone())?;

        Ok(OpenTelemetry {
            tracer_provider,
            logger_provider,
            resource,
        })
    }

    pub async fn graceful_shutdown(&self) {
        use tokio::task::spawn_blocking;

        let tracer_provider = self.tracer_provider.clone();
        let shutdown_tracer = spawn_blocking(move || {
            if let Err(err) = tracer_provider.shutdown() {
                tracing::warn!("failed to shut down tracer provider: {}", err);
            }
        });

        let logger_provider = self.logger_provider.clone();
        let shutdown_logger = spawn_blocking(move || {
            if let Err(err) = logger_provider.shutdown() {
                tracing::warn!("failed to shut down logger provider: {}", err);
            }
        });

        let _ = tokio::join!(shutdown_tracer, shutdown_logger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::{Key, Value};
    use storefront_gateway_config::parse_yaml_config;

    fn resource_value(resource: &Resource, key: &str) -> Option<Value> {
        let key = Key::new(key.to_string());
        resource
            .iter()
            .find(|(k, _)| **k == key)
            .map(|(_, v)| v.clone())
    }

    #[test]
    fn builds_providers_from_default_config() {
        let cfg = parse_yaml_config("{}").expect("config");
        let otel = OpenTelemetry::from_config(&cfg.telemetry, &cfg.store).expect("providers");
        assert_eq!(
            resource_value(&otel.resource, "service.name"),
            Some(Value::from("storefront-gateway"))
        );
    }

    #[test]
    fn resource_carries_store_identity() {
        let cfg = parse_yaml_config(
            r#"
store:
  platform: vtex
  account: storeframework
  environment: vtexcommercestable
  workspace: beta
telemetry:
  service:
    name: storefront-api
    version: 1.12.38
"#,
        )
        .expect("config");
        let otel = OpenTelemetry::from_config(&cfg.telemetry, &cfg.store).expect("providers");

        assert_eq!(
            resource_value(&otel.resource, "service.name_and_version"),
            Some(Value::from("storefront-api@1.12.38"))
        );
        assert_eq!(
            resource_value(&otel.resource, "platform"),
            Some(Value::from("vtex"))
        );
        assert_eq!(
            resource_value(&otel.resource, "vtex.account"),
            Some(Value::from("storeframework"))
        );
        assert_eq!(
            resource_value(&otel.resource, "vtex.workspace"),
            Some(Value::from("beta"))
        );
        assert_eq!(
            resource_value(&otel.resource, "vtex.environment"),
            Some(Value::from("vtexcommercestable"))
        );
    }

    #[tokio::test]
    async fn builds_providers_with_otlp_exporters() {
        let cfg = parse_yaml_config(
            r#"
telemetry:
  traces:
    otlp:
      endpoint: http://localhost:4317
      compression: true
    console: true
  logs:
    otlp:
      endpoint: http://localhost:4318
"#,
        )
        .expect("config");
        OpenTelemetry::from_config(&cfg.telemetry, &cfg.store).expect("providers");
    }
}
