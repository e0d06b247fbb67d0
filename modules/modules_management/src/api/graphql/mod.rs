pub mod handlers;
pub mod mutation;
pub mod query;
pub mod routes;
pub mod schema;

pub use mutation::*;
pub use query::*;
pub use routes::*;
pub use schema::*;
