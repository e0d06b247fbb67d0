// === MODULE DEFINITION ===
// The host instantiates the module struct and hands it its collaborator.
pub mod module;
pub use module::ModulesManagementModule;

// === INTERNAL MODULES ===
// WARNING: These modules are internal implementation details!
// They are exposed only for comprehensive testing and should NOT be used by external consumers.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
pub(crate) mod test_support;
