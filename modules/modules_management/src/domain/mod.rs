pub mod model;
pub mod service;
pub mod updater;

pub use model::*;
pub use service::*;
pub use updater::*;
