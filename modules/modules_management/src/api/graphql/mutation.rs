use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use crate::domain::{ModulesManagementService, UpdateModulesRequest};

/// Administrative mutations, reached through `mutation { admin { .. } }`.
#[derive(Default)]
pub struct AdminMutation;

#[Object]
impl AdminMutation {
    /// Module management operations.
    async fn modules_management(&self) -> ModulesManagementMutation {
        ModulesManagementMutation
    }
}

/// Module management operations; carries no state of its own.
#[derive(Default)]
pub struct ModulesManagementMutation;

#[Object]
impl ModulesManagementMutation {
    /// Update modules and return the names of the modules that were updated.
    async fn update_modules(
        &self,
        ctx: &Context<'_>,
        #[graphql(
            default = true,
            desc = "Only consider first-party modules"
        )]
        jahia_only: bool,
        #[graphql(desc = "Module names or identifier patterns narrowing the update")]
        filters: Option<Vec<String>>,
    ) -> Result<Vec<String>> {
        let svc = ctx.data::<Arc<ModulesManagementService>>()?;
        let updated = svc
            .update_modules(UpdateModulesRequest {
                jahia_only,
                filters,
            })
            .await?;
        Ok(updated)
    }
}
