//! HTTP surface of the registry
//!
//! Routes follow the Terraform module registry protocol. Handlers are thin
//! translators between wire parameters and the [`ModuleService`] trait; all
//! catalog semantics live below this layer.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::registry::ModuleService;

pub mod handlers;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ModuleService>,
}

/// Builds the registry router around one service implementation.
pub fn router(service: Arc<dyn ModuleService>) -> Router {
    // The versions route binds a fourth path segment that the handler
    // ignores; clients conventionally send the literal `versions` there.
    Router::new()
        .route("/.well-known/terraform.json", get(handlers::discovery))
        .route("/v1/modules", get(handlers::list_modules))
        .route("/v1/modules/search", get(handlers::search_modules))
        .route(
            "/v1/modules/{namespace}/{name}/{system}/{version}",
            get(handlers::list_versions),
        )
        .route(
            "/v1/modules/{namespace}/{name}/{system}/{version}/download",
            get(handlers::download_module),
        )
        .route(
            "/v1/modules/{namespace}/{name}/{system}/{version}/upload",
            post(handlers::upload_module),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}
