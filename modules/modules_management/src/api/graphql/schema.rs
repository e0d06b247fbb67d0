use std::sync::Arc;

use async_graphql::{EmptySubscription, Object, Schema};

use crate::api::graphql::mutation::AdminMutation;
use crate::api::graphql::query::AdminQuery;
use crate::domain::ModulesManagementService;

pub type ModulesSchema = Schema<Query, Mutation, EmptySubscription>;

/// Query root.
#[derive(Default)]
pub struct Query;

#[Object]
impl Query {
    /// Platform-wide administrative queries.
    async fn admin(&self) -> AdminQuery {
        AdminQuery
    }
}

/// Mutation root.
#[derive(Default)]
pub struct Mutation;

#[Object]
impl Mutation {
    /// Platform-wide administrative mutations.
    async fn admin(&self) -> AdminMutation {
        AdminMutation
    }
}

/// Build the schema with the service as shared context data.
pub fn build_schema(service: Arc<ModulesManagementService>) -> ModulesSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(service)
        .finish()
}
