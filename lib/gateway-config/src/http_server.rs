use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(deny_unknown_fields)]
pub struct HttpServerConfig {
    /// The host to bind the HTTP server to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The port to bind the HTTP server to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// The path under which GraphQL operations are accepted.
    #[serde(default = "default_graphql_endpoint")]
    pub graphql_endpoint: String,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            graphql_endpoint: default_graphql_endpoint(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_graphql_endpoint() -> String {
    "/graphql".to_string()
}
