use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the modules_management module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModulesManagementConfig {
    /// Mount point of the GraphQL endpoint.
    #[serde(default = "default_graphql_path")]
    pub graphql_path: String,
    /// Serve the GraphiQL IDE on `GET graphql_path`.
    #[serde(default)]
    pub graphiql: bool,
    #[serde(default)]
    pub updater: UpdaterConfig,
}

/// Where the module update collaborator lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdaterConfig {
    /// Base URL of the module update service; routes are resolved against it.
    #[serde(default)]
    pub base_url: Option<Url>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModulesManagementConfig {
    fn default() -> Self {
        Self {
            graphql_path: default_graphql_path(),
            graphiql: false,
            updater: UpdaterConfig::default(),
        }
    }
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_graphql_path() -> String {
    "/graphql".to_string()
}

// Module updates download and restart bundles; keep the budget generous.
fn default_timeout_secs() -> u64 {
    300
}
