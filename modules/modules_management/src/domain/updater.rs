use async_trait::async_trait;

use crate::domain::model::UpdatedModules;

/// Value always sent as the updater's second argument.
///
/// Callers cannot set it; its meaning is defined by the updater.
pub const FIXED_FLAG: bool = false;

/// The component that actually updates modules and knows what is installed.
///
/// Implementations own module resolution, compatibility checks and partial
/// failure reporting. Any failure is surfaced as an I/O error.
#[async_trait]
pub trait ModuleUpdater: Send + Sync {
    async fn update_modules(
        &self,
        jahia_only: bool,
        fixed_flag: bool,
        filters: Option<Vec<String>>,
    ) -> std::io::Result<UpdatedModules>;

    /// Installed modules as `name/version` entries.
    async fn installed_modules(&self) -> std::io::Result<Vec<String>>;

    /// Pending updates as `name/version:available` entries.
    async fn available_updates(&self) -> std::io::Result<Vec<String>>;

    /// When the updater last checked for updates, if ever.
    async fn last_update_time(&self) -> std::io::Result<Option<String>>;
}
