use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use modman_bootstrap::{module_config, ConfigProvider};
use tracing::{debug, info};

use crate::api::graphql::{build_schema, register_routes};
use crate::config::ModulesManagementConfig;
use crate::domain::{ModuleUpdater, ModulesManagementService};
use crate::infra::RemoteModuleUpdater;

/// Key of this module's entry in the `modules` config bag.
pub const MODULE_NAME: &str = "modules_management";

struct Initialized {
    config: ModulesManagementConfig,
    service: Arc<ModulesManagementService>,
}

/// Module management module: owns the service and mounts its GraphQL endpoint.
#[derive(Default)]
pub struct ModulesManagementModule {
    // Set once by init, read by route registration.
    state: ArcSwapOption<Initialized>,
}

impl ModulesManagementModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize from configuration, delegating updates to the configured
    /// remote module update service.
    pub fn init(&self, provider: &dyn ConfigProvider) -> anyhow::Result<()> {
        info!("Initializing {} module", MODULE_NAME);

        let cfg: ModulesManagementConfig = module_config(provider, MODULE_NAME)?;
        debug!(
            graphql_path = %cfg.graphql_path,
            graphiql = cfg.graphiql,
            timeout_secs = cfg.updater.timeout_secs,
            "Loaded {} config",
            MODULE_NAME
        );

        let updater = RemoteModuleUpdater::from_config(&cfg.updater)
            .map_err(|e| anyhow::anyhow!("{}.{}", MODULE_NAME, e))?;
        info!(base_url = %updater.base_url(), "Using remote module updater");

        self.init_with_updater(cfg, Arc::new(updater));
        Ok(())
    }

    /// Initialize with an explicitly supplied updater.
    pub fn init_with_updater(
        &self,
        cfg: ModulesManagementConfig,
        updater: Arc<dyn ModuleUpdater>,
    ) {
        let service = Arc::new(ModulesManagementService::new(updater));
        self.state.store(Some(Arc::new(Initialized {
            config: cfg,
            service,
        })));
        info!("ModulesManagementService initialized successfully");
    }

    pub fn service(&self) -> Option<Arc<ModulesManagementService>> {
        self.state.load().as_ref().map(|s| s.service.clone())
    }

    /// Budget granted to one updater call, once initialized.
    pub fn updater_timeout(&self) -> Option<Duration> {
        self.state
            .load()
            .as_ref()
            .map(|s| Duration::from_secs(s.config.updater.timeout_secs))
    }

    /// Mount the GraphQL routes. Fails if the module was not initialized.
    pub fn register_rest(&self, router: axum::Router) -> anyhow::Result<axum::Router> {
        info!("Registering {} GraphQL routes", MODULE_NAME);

        let state = self
            .state
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))?;

        let schema = build_schema(state.service.clone());
        let router = register_routes(router, schema, &state.config)?;

        info!(path = %state.config.graphql_path, "GraphQL routes registered successfully");
        Ok(router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingUpdater;
    use modman_bootstrap::{AppConfig, AppConfigProvider};

    fn provider_with(entry: serde_json::Value) -> AppConfigProvider {
        let mut app = AppConfig::default();
        app.modules.insert(MODULE_NAME.to_string(), entry);
        AppConfigProvider::new(app)
    }

    #[test]
    fn routes_require_init() {
        let module = ModulesManagementModule::new();
        assert!(module.service().is_none());
        assert!(module.updater_timeout().is_none());
        assert!(module.register_rest(axum::Router::new()).is_err());
    }

    #[test]
    fn init_from_config_builds_remote_updater() {
        let provider = provider_with(serde_json::json!({
            "updater": { "base_url": "http://127.0.0.1:8181/modules/" }
        }));
        let module = ModulesManagementModule::new();

        module.init(&provider).unwrap();

        assert!(module.service().is_some());
        assert_eq!(module.updater_timeout(), Some(Duration::from_secs(300)));
        assert!(module.register_rest(axum::Router::new()).is_ok());
    }

    #[test]
    fn init_without_base_url_fails() {
        let provider = provider_with(serde_json::json!({ "graphiql": true }));
        let module = ModulesManagementModule::new();

        let err = module.init(&provider).unwrap_err();
        assert!(err.to_string().contains("updater.base_url"), "{}", err);
        assert!(module.service().is_none());
    }

    #[test]
    fn init_rejects_malformed_entry() {
        let provider = provider_with(serde_json::json!({ "graphiql": "sometimes" }));
        let module = ModulesManagementModule::new();
        assert!(module.init(&provider).is_err());
    }

    #[tokio::test]
    async fn injected_updater_is_used() {
        let updater = RecordingUpdater::returning(["seo"]);
        let module = ModulesManagementModule::new();
        module.init_with_updater(ModulesManagementConfig::default(), updater.clone());

        let updated = module
            .service()
            .unwrap()
            .update_modules(Default::default())
            .await
            .unwrap();

        assert_eq!(updated, vec!["seo"]);
        assert_eq!(updater.calls().len(), 1);
    }
}
