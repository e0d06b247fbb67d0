use crate::config::AppConfig;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Errors raised while turning a raw per-module config entry into a typed one.
#[derive(Debug, thiserror::Error)]
pub enum ModuleConfigError {
    #[error("invalid configuration for module '{module}': {source}")]
    Invalid {
        module: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration provider trait for modules
pub trait ConfigProvider: Send + Sync {
    /// Get the configuration for a specific module
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

/// Typed view of a module entry.
///
/// A missing entry yields `T::default()`; a present but malformed entry is an error.
pub fn module_config<T>(
    provider: &dyn ConfigProvider,
    module_name: &str,
) -> Result<T, ModuleConfigError>
where
    T: DeserializeOwned + Default,
{
    match provider.get_module_config(module_name) {
        None => Ok(T::default()),
        Some(raw) => {
            T::deserialize(raw).map_err(|source| ModuleConfigError::Invalid {
                module: module_name.to_string(),
                source,
            })
        }
    }
}

/// Implementation of ConfigProvider that uses AppConfig
pub struct AppConfigProvider(Arc<AppConfig>);

impl AppConfigProvider {
    pub fn new(config: AppConfig) -> Self {
        Self(Arc::new(config))
    }
}

impl ConfigProvider for AppConfigProvider {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.0.modules.get(module_name)
    }
}
