use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use common::prelude::{Category, CategoryName, CategoryNameError};

use crate::daemon::auth::AuthenticatedUser;
use crate::daemon::database::CategoryWriteError;
use crate::daemon::http_server::api::client::{ApiError, ApiRequest, RequestContext};
use crate::daemon::http_server::api::internal_error;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct CreateCategoryRequest {
    /// Category name (2 to 16 characters)
    #[arg(long)]
    pub name: String,
}

pub type CreateCategoryResponse = Category;

pub async fn handler(
    AuthenticatedUser(user): AuthenticatedUser,
    State(state): State<ServiceState>,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CreateCategoryError> {
    let Json(req) = payload.map_err(|e| CreateCategoryError::InvalidBody(e.body_text()))?;
    let name = CategoryName::parse(&req.name)?;

    let category = state.database().create_category(&name).await?;
    tracing::info!(user = %user.id, category_id = %category.id, "category created");

    Ok((http::StatusCode::CREATED, Json(category)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum CreateCategoryError {
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("invalid category name: {0}")]
    InvalidName(#[from] CategoryNameError),
    #[error("category name already exists: {0}")]
    Duplicate(String),
    #[error("{0}")]
    Database(String),
}

impl From<CategoryWriteError> for CreateCategoryError {
    fn from(err: CategoryWriteError) -> Self {
        match err {
            CategoryWriteError::DuplicateName(name) => CreateCategoryError::Duplicate(name),
            other => CreateCategoryError::Database(internal_error("create category", other)),
        }
    }
}

impl IntoResponse for CreateCategoryError {
    fn into_response(self) -> Response {
        let status = match &self {
            CreateCategoryError::InvalidBody(_)
            | CreateCategoryError::InvalidName(_)
            | CreateCategoryError::Duplicate(_) => http::StatusCode::BAD_REQUEST,
            CreateCategoryError::Database(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

impl ApiRequest for CreateCategoryRequest {
    type Response = CreateCategoryResponse;

    fn build_request(
        self,
        ctx: &RequestContext,
        client: &Client,
    ) -> Result<RequestBuilder, ApiError> {
        let request = client.post(ctx.url("/api/admin/categories")?).json(&self);
        ctx.authorize(request)
    }
}
