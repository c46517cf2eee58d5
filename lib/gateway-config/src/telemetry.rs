use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Identity of this service in exported telemetry.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Span export configuration.
    #[serde(default)]
    pub traces: TracesConfig,

    /// Log record export configuration.
    #[serde(default)]
    pub logs: LogsConfig,

    /// GraphQL execution instrumentation options.
    #[serde(default)]
    pub instrumentation: InstrumentationConfig,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Service name reported as the `service.name` resource attribute.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Service version reported as the `service.version` resource attribute.
    #[serde(default = "default_service_version")]
    pub version: String,
}

impl ServiceConfig {
    pub fn name_and_version(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            version: default_service_version(),
        }
    }
}

fn default_service_name() -> String {
    "storefront-gateway".to_string()
}

fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct TracesConfig {
    /// OTLP/gRPC collector for spans. Export is disabled when unset.
    #[serde(default)]
    pub otlp: Option<OtlpExporterConfig>,

    /// Mirror every finished span to stdout, for local debugging.
    #[serde(default)]
    pub console: bool,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(deny_unknown_fields)]
pub struct LogsConfig {
    /// OTLP/gRPC collector for log records. Export is disabled when unset.
    #[serde(default)]
    pub otlp: Option<OtlpExporterConfig>,

    /// Mirror every log record to stdout, for local debugging.
    #[serde(default = "default_true")]
    pub console: bool,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            otlp: None,
            console: default_true(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(deny_unknown_fields)]
pub struct OtlpExporterConfig {
    /// The OTLP/gRPC endpoint of the collector.
    pub endpoint: String,

    /// Compress exported payloads with gzip.
    #[serde(default)]
    pub compression: bool,
}

/// Which parts of an execution are instrumented and how much request data
/// ends up on spans and log records.
#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(deny_unknown_fields)]
pub struct InstrumentationConfig {
    /// Create a span per field resolver, correlated into a call tree.
    #[serde(default = "default_true")]
    pub resolvers: bool,

    /// Attach serialized operation variables to the root span.
    #[serde(default)]
    pub variables: bool,

    /// Attach the execution result payload to the per-operation log record.
    #[serde(default)]
    pub result: bool,

    /// Attach the printed operation document to the root span.
    #[serde(default)]
    pub document: bool,
}

impl Default for InstrumentationConfig {
    fn default() -> Self {
        Self {
            resolvers: default_true(),
            variables: false,
            result: false,
            document: false,
        }
    }
}

fn default_true() -> bool {
    true
}
