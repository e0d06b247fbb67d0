use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::model::{UpdateModulesRequest, UpdatedModules};
use crate::domain::updater::{ModuleUpdater, FIXED_FLAG};

/// Forwards update requests to the configured [`ModuleUpdater`].
///
/// Holds no mutable state; clones share the same updater.
#[derive(Clone)]
pub struct ModulesManagementService {
    updater: Arc<dyn ModuleUpdater>,
}

impl ModulesManagementService {
    pub fn new(updater: Arc<dyn ModuleUpdater>) -> Self {
        Self { updater }
    }

    /// Run one update and return the updater's answer untouched.
    ///
    /// An updater error is returned as the same `io::Error` value, with no retry.
    #[instrument(
        name = "modules_management.service.update_modules",
        skip(self, request),
        fields(jahia_only = request.jahia_only, filters = ?request.filters)
    )]
    pub async fn update_modules(
        &self,
        request: UpdateModulesRequest,
    ) -> std::io::Result<UpdatedModules> {
        info!("Updating modules");

        let updated = self
            .updater
            .update_modules(request.jahia_only, FIXED_FLAG, request.filters)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, kind = ?e.kind(), "ModulesManagementService: update failed");
                e
            })?;

        debug!(count = updated.len(), "Modules updated");
        Ok(updated)
    }

    #[instrument(name = "modules_management.service.installed_modules", skip(self))]
    pub async fn installed_modules(&self) -> std::io::Result<Vec<String>> {
        let installed = self.updater.installed_modules().await?;
        debug!(count = installed.len(), "Listed installed modules");
        Ok(installed)
    }

    #[instrument(name = "modules_management.service.available_updates", skip(self))]
    pub async fn available_updates(&self) -> std::io::Result<Vec<String>> {
        let updates = self.updater.available_updates().await?;
        debug!(count = updates.len(), "Listed available updates");
        Ok(updates)
    }

    #[instrument(name = "modules_management.service.last_update_time", skip(self))]
    pub async fn last_update_time(&self) -> std::io::Result<Option<String>> {
        self.updater.last_update_time().await
    }
}
