use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity of the storefront account behind the gateway.
///
/// These values are opaque to the execution pipeline itself; they are attached
/// as resource attributes to every exported span and log record so operations
/// from different accounts/workspaces can be told apart in the collector.
#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// The commerce platform this store runs on.
    #[serde(default = "default_platform")]
    pub platform: String,

    /// The account (store id) on the commerce platform.
    #[serde(default)]
    pub account: String,

    /// The platform environment the store points at.
    #[serde(default)]
    pub environment: String,

    /// The platform workspace the store points at.
    #[serde(default = "default_workspace")]
    pub workspace: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            account: String::new(),
            environment: String::new(),
            workspace: default_workspace(),
        }
    }
}

fn default_platform() -> String {
    "vtex".to_string()
}

fn default_workspace() -> String {
    "master".to_string()
}
