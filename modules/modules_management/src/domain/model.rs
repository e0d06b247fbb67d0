/// Input of a module update, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateModulesRequest {
    /// Restrict the update to first-party modules.
    pub jahia_only: bool,
    /// Module name or identifier patterns, in caller order.
    /// `None` and an empty list are forwarded as-is; their meaning belongs to the updater.
    pub filters: Option<Vec<String>>,
}

impl Default for UpdateModulesRequest {
    fn default() -> Self {
        Self {
            jahia_only: true,
            filters: None,
        }
    }
}

/// Names of the modules the updater reports as updated, in its order.
pub type UpdatedModules = Vec<String>;
