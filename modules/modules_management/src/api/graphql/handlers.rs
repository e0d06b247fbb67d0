use async_graphql::http::GraphiQLSource;
use axum::extract::Extension;
use axum::response::Html;
use axum::Json;
use tracing::{debug, warn};

use crate::api::graphql::schema::ModulesSchema;

/// Execute one GraphQL request against the module management schema
#[tracing::instrument(
    name = "modules_management.graphql",
    skip(schema, req),
    fields(operation = ?req.operation_name)
)]
pub async fn graphql(
    Extension(schema): Extension<ModulesSchema>,
    Json(req): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    debug!("Executing GraphQL request");

    let resp = schema.execute(req).await;
    if resp.is_err() {
        warn!(errors = resp.errors.len(), "GraphQL request completed with errors");
    }

    Json(resp)
}

pub fn graphiql_page(endpoint: &str) -> Html<String> {
    Html(GraphiQLSource::build().endpoint(endpoint).finish())
}
