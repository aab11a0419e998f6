use axum::routing::post;
use axum::Router;

use crate::ServiceState;

pub mod upload;

pub use upload::{UploadCoverRequest, UploadCoverResponse};

pub fn admin_router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", post(upload::handler))
        .with_state(state)
}
