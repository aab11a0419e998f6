use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::prelude::{Category, CategoryName, CategoryNameError};

use crate::daemon::auth::AuthenticatedUser;
use crate::daemon::database::CategoryWriteError;
use crate::daemon::http_server::api::client::{ApiError, ApiRequest, RequestContext};
use crate::daemon::http_server::api::internal_error;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCategoryBody {
    pub name: String,
}

pub type UpdateCategoryResponse = Category;

pub async fn handler(
    AuthenticatedUser(user): AuthenticatedUser,
    State(state): State<ServiceState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateCategoryBody>, JsonRejection>,
) -> Result<impl IntoResponse, UpdateCategoryError> {
    let Path(category_id) =
        path.map_err(|e| UpdateCategoryError::InvalidRequest(e.body_text()))?;
    let Json(req) = payload.map_err(|e| UpdateCategoryError::InvalidBody(e.body_text()))?;
    let name = CategoryName::parse(&req.name)?;

    let category = state
        .database()
        .update_category(&category_id, &name)
        .await?;
    tracing::info!(user = %user.id, category_id = %category.id, "category renamed");

    Ok((http::StatusCode::OK, Json(category)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateCategoryError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("invalid category name: {0}")]
    InvalidName(#[from] CategoryNameError),
    #[error("category not found: {0}")]
    NotFound(Uuid),
    #[error("category name already exists: {0}")]
    Duplicate(String),
    #[error("{0}")]
    Database(String),
}

impl From<CategoryWriteError> for UpdateCategoryError {
    fn from(err: CategoryWriteError) -> Self {
        match err {
            CategoryWriteError::NotFound(id) => UpdateCategoryError::NotFound(id),
            CategoryWriteError::DuplicateName(name) => UpdateCategoryError::Duplicate(name),
            other => UpdateCategoryError::Database(internal_error("update category", other)),
        }
    }
}

impl IntoResponse for UpdateCategoryError {
    fn into_response(self) -> Response {
        let status = match &self {
            UpdateCategoryError::InvalidRequest(_)
            | UpdateCategoryError::InvalidBody(_)
            | UpdateCategoryError::InvalidName(_)
            | UpdateCategoryError::Duplicate(_) => http::StatusCode::BAD_REQUEST,
            UpdateCategoryError::NotFound(_) => http::StatusCode::NOT_FOUND,
            UpdateCategoryError::Database(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Request with category_id for client-side use
#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct UpdateCategoryRequest {
    /// Category to rename
    pub category_id: Uuid,
    /// New name (2 to 16 characters)
    #[arg(long)]
    pub name: String,
}

impl ApiRequest for UpdateCategoryRequest {
    type Response = UpdateCategoryResponse;

    fn build_request(
        self,
        ctx: &RequestContext,
        client: &Client,
    ) -> Result<RequestBuilder, ApiError> {
        let url = ctx.url(&format!("/api/admin/categories/{}", self.category_id))?;
        let request = client
            .put(url)
            .json(&UpdateCategoryBody { name: self.name });
        ctx.authorize(request)
    }
}
