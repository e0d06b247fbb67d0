use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use crate::domain::ModulesManagementService;

/// Administrative queries, reached through `query { admin { .. } }`.
#[derive(Default)]
pub struct AdminQuery;

#[Object]
impl AdminQuery {
    /// Module management read operations.
    async fn modules_management(&self) -> ModulesManagementQuery {
        ModulesManagementQuery
    }
}

/// Read side of module management, answered by the module updater.
#[derive(Default)]
pub struct ModulesManagementQuery;

#[Object]
impl ModulesManagementQuery {
    /// Installed modules as `name/version` entries.
    async fn installed_modules(&self, ctx: &Context<'_>) -> Result<Vec<String>> {
        let svc = ctx.data::<Arc<ModulesManagementService>>()?;
        Ok(svc.installed_modules().await?)
    }

    /// Pending updates as `name/version:available` entries.
    async fn available_updates(&self, ctx: &Context<'_>) -> Result<Vec<String>> {
        let svc = ctx.data::<Arc<ModulesManagementService>>()?;
        Ok(svc.available_updates().await?)
    }

    /// Time of the last update check, if any.
    async fn last_update_time(&self, ctx: &Context<'_>) -> Result<Option<String>> {
        let svc = ctx.data::<Arc<ModulesManagementService>>()?;
        Ok(svc.last_update_time().await?)
    }
}
