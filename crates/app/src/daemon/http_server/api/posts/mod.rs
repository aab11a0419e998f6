//! Post endpoints
//!
//! Reads are public. Writes go through the post write service and need an
//! admin token.

use axum::routing::{get, put};
use axum::Router;

use crate::daemon::database::PostWriteError;
use crate::daemon::http_server::api::internal_error;
use crate::ServiceState;

pub mod create;
pub mod delete;
pub mod get_post;
pub mod list;
pub mod update;

pub use create::CreatePostRequest;
pub use delete::{DeletePostRequest, DeletePostResponse};
pub use get_post::GetPostRequest;
pub use list::ListPostsRequest;
pub use update::UpdatePostRequest;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(list::handler))
        .route("/:post_id", get(get_post::handler))
        .with_state(state)
}

pub fn admin_router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route(
            "/",
            axum::routing::post(create::handler).delete(delete::query_handler),
        )
        .route("/:post_id", put(update::handler).delete(delete::handler))
        .with_state(state)
}

/// Failures shared by every post write endpoint.
#[derive(Debug, thiserror::Error)]
pub enum PostWriteApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("{0}")]
    Validation(String),
    #[error("post not found: {0}")]
    NotFound(uuid::Uuid),
    #[error("{0}")]
    Database(String),
}

impl From<PostWriteError> for PostWriteApiError {
    fn from(err: PostWriteError) -> Self {
        match err {
            PostWriteError::Invalid(_) | PostWriteError::UnknownCategories(_) => {
                PostWriteApiError::Validation(err.to_string())
            }
            PostWriteError::NotFound(id) => PostWriteApiError::NotFound(id),
            PostWriteError::Database(e) => {
                PostWriteApiError::Database(internal_error("post write", e))
            }
        }
    }
}

impl axum::response::IntoResponse for PostWriteApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            PostWriteApiError::InvalidRequest(_)
            | PostWriteApiError::InvalidBody(_)
            | PostWriteApiError::Validation(_) => {
                http::StatusCode::BAD_REQUEST
            }
            PostWriteApiError::NotFound(_) => http::StatusCode::NOT_FOUND,
            PostWriteApiError::Database(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            axum::Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
