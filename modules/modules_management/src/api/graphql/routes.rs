use crate::api::graphql::handlers;
use crate::api::graphql::schema::ModulesSchema;
use crate::config::ModulesManagementConfig;
use axum::routing::post;
use axum::{Extension, Router};

pub fn register_routes(
    router: Router,
    schema: ModulesSchema,
    cfg: &ModulesManagementConfig,
) -> anyhow::Result<Router> {
    let path = cfg.graphql_path.as_str();
    if !path.starts_with('/') {
        anyhow::bail!("graphql_path must start with '/', got '{}'", path);
    }

    // POST {graphql_path} - execute a GraphQL request
    let mut endpoint = post(handlers::graphql);

    // GET {graphql_path} - GraphiQL IDE, only when enabled
    if cfg.graphiql {
        let page = handlers::graphiql_page(path);
        endpoint = endpoint.get(move || std::future::ready(page.clone()));
    }

    Ok(router.route(path, endpoint.layer(Extension(schema))))
}
