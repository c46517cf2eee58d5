pub mod http_server;
pub mod log;
pub mod persisted_queries;
pub mod store;
pub mod telemetry;

use config::{Config, File, FileFormat};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    http_server::HttpServerConfig, log::LoggingConfig, persisted_queries::PersistedQueriesConfig,
    store::StoreConfig, telemetry::TelemetryConfig,
};

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// The gateway logger configuration.
    ///
    /// The gateway is configured to be mostly silent (`info`) level, and will print
    /// only important messages, warnings, and errors.
    #[serde(default)]
    pub log: LoggingConfig,

    /// Configuration for the HTTP server/listener.
    #[serde(default)]
    pub http: HttpServerConfig,

    /// Identity of the store this gateway serves. These values become resource
    /// attributes on every exported span and log record.
    #[serde(default)]
    pub store: StoreConfig,

    /// Telemetry exporters and GraphQL instrumentation options.
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Configuration for the persisted query manifest.
    #[serde(default)]
    pub persisted_queries: PersistedQueriesConfig,
}

impl GatewayConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.http.host, self.http.port)
    }

    pub fn graphql_path(&self) -> &str {
        &self.http.graphql_endpoint
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayConfigError {
    #[error("Failed to load configuration: {0}")]
    ConfigLoadError(#[from] config::ConfigError),
}

static DEFAULT_FILE_NAMES: &[&str] = &[
    "gateway.config.yaml",
    "gateway.config.yml",
    "gateway.config.json",
];

pub fn load_config(
    override_config_path: Option<String>,
) -> Result<GatewayConfig, GatewayConfigError> {
    let mut config = Config::builder();

    if let Some(path_str) = override_config_path {
        config = config.add_source(File::with_name(&path_str).required(true));
    } else {
        for name in DEFAULT_FILE_NAMES {
            config = config.add_source(File::with_name(name).required(false));
        }
    }

    let cfg = config.build()?.try_deserialize::<GatewayConfig>()?;

    Ok(cfg)
}

pub fn parse_yaml_config(config_raw: &str) -> Result<GatewayConfig, GatewayConfigError> {
    Config::builder()
        .add_source(File::from_str(config_raw, FileFormat::Yaml))
        .build()?
        .try_deserialize::<GatewayConfig>()
        .map_err(GatewayConfigError::ConfigLoadError)
}
