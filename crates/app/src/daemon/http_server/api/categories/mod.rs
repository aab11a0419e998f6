//! Category endpoints
//!
//! Anyone can list categories. Creating, renaming and deleting them needs an
//! admin token.

use axum::routing::{get, post, put};
use axum::Router;

use crate::ServiceState;

pub mod create;
pub mod delete;
pub mod list;
pub mod update;

pub use create::{CreateCategoryRequest, CreateCategoryResponse};
pub use delete::{DeleteCategoryRequest, DeleteCategoryResponse};
pub use list::{ListCategoriesRequest, ListCategoriesResponse};
pub use update::{UpdateCategoryRequest, UpdateCategoryResponse};

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(list::handler))
        .with_state(state)
}

pub fn admin_router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", post(create::handler))
        .route("/:category_id", put(update::handler).delete(delete::handler))
        .with_state(state)
}
