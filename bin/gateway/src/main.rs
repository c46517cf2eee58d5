mod demo_schema;
mod http_server;
mod logger;

use std::sync::Arc;

use storefront_gateway_config::load_config;
use storefront_gateway_executor::{Gateway, GatewayOptions, PersistedQueryStore};
use storefront_gateway_telemetry::OpenTelemetry;
use tracing::info;

use crate::logger::configure_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("GATEWAY_CONFIG_FILE_PATH").ok();
    let config = load_config(config_path)?;
    configure_logging(&config.log);
    info!("storefront-gateway@{} starting...", env!("CARGO_PKG_VERSION"));

    let telemetry = OpenTelemetry::from_config(&config.telemetry, &config.store)?;
    let persisted = PersistedQueryStore::from_manifest_file(&config.persisted_queries.manifest)?;

    let gateway = Arc::new(Gateway::new(GatewayOptions {
        persisted,
        schema_factory: Arc::new(demo_schema::CatalogSchemaFactory),
        context_factory: Arc::new(demo_schema::StoreContextFactory),
        tracer_provider: telemetry.tracer_provider.clone(),
        logger_provider: telemetry.logger_provider.clone(),
        instrumentation: config.telemetry.instrumentation.clone(),
    }));

    let addr = config.address();
    info!("listening on {}{}", addr, config.graphql_path());
    http_server::serve(&addr, config.graphql_path(), gateway).await?;

    info!("server stopped, flushing telemetry");
    telemetry.graceful_shutdown().await;

    Ok(())
}
