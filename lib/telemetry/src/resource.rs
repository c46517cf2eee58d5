use opentelemetry::KeyValue;
use opentelemetry_sdk::Resource;
use storefront_gateway_config::{store::StoreConfig, telemetry::ServiceConfig};

/// Resource attributes shared by the span and log exporters.
///
/// The store identity is flattened into platform-prefixed keys
/// (`vtex.account`, `vtex.workspace`, ...) so one collector can ingest
/// telemetry from gateways of several accounts.
pub fn build_resource(service: &ServiceConfig, store: &StoreConfig) -> Resource {
    let attributes = vec![
        KeyValue::new("service.name", service.name.clone()),
        KeyValue::new("service.version", service.version.clone()),
        KeyValue::new("service.name_and_version", service.name_and_version()),
        KeyValue::new("platform", store.platform.clone()),
        KeyValue::new(format!("{}.account", store.platform), store.account.clone()),
        KeyValue::new(
            format!("{}.workspace", store.platform),
            store.workspace.clone(),
        ),
        KeyValue::new(
            format!("{}.environment", store.platform),
            store.environment.clone(),
        ),
    ];

    Resource::builder().with_attributes(attributes).build()
}
