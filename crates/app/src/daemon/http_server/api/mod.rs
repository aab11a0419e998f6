use axum::Router;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use http::Method;
use tower_http::cors::{Any, CorsLayer};

pub mod categories;
pub mod client;
pub mod covers;
pub mod posts;

use crate::ServiceState;

/// Public reads at the top level, authenticated writes under `/admin`.
pub fn router(state: ServiceState) -> Router<ServiceState> {
    let cors_layer = CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(vec![ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN])
        .allow_origin(Any)
        .allow_credentials(false);

    let admin = Router::new()
        .nest("/categories", categories::admin_router(state.clone()))
        .nest("/posts", posts::admin_router(state.clone()))
        .nest("/covers", covers::admin_router(state.clone()));

    Router::new()
        .nest("/categories", categories::router(state.clone()))
        .nest("/posts", posts::router(state.clone()))
        .nest("/admin", admin)
        .with_state(state)
        .layer(cors_layer)
}

/// Log a store failure and hide its details from the client.
pub(crate) fn internal_error(context: &str, err: impl std::fmt::Display) -> String {
    tracing::error!("{}: {}", context, err);
    "internal server error".to_string()
}
