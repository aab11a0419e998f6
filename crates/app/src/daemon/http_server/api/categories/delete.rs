use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::daemon::auth::AuthenticatedUser;
use crate::daemon::database::CategoryWriteError;
use crate::daemon::http_server::api::client::{ApiError, ApiRequest, RequestContext};
use crate::daemon::http_server::api::internal_error;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCategoryResponse {
    pub id: Uuid,
    pub message: String,
}

pub async fn handler(
    AuthenticatedUser(user): AuthenticatedUser,
    State(state): State<ServiceState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, DeleteCategoryError> {
    let Path(category_id) =
        path.map_err(|e| DeleteCategoryError::InvalidRequest(e.body_text()))?;
    let category = state.database().delete_category(&category_id).await?;
    tracing::info!(user = %user.id, category_id = %category.id, "category deleted");

    Ok((
        http::StatusCode::OK,
        Json(DeleteCategoryResponse {
            id: category.id,
            message: format!("カテゴリー「{}」を削除しました", category.name),
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteCategoryError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("category not found: {0}")]
    NotFound(Uuid),
    #[error("{0}")]
    Database(String),
}

impl From<CategoryWriteError> for DeleteCategoryError {
    fn from(err: CategoryWriteError) -> Self {
        match err {
            CategoryWriteError::NotFound(id) => DeleteCategoryError::NotFound(id),
            other => DeleteCategoryError::Database(internal_error("delete category", other)),
        }
    }
}

impl IntoResponse for DeleteCategoryError {
    fn into_response(self) -> Response {
        let status = match &self {
            DeleteCategoryError::InvalidRequest(_) => http::StatusCode::BAD_REQUEST,
            DeleteCategoryError::NotFound(_) => http::StatusCode::NOT_FOUND,
            DeleteCategoryError::Database(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Request for client-side delete
#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct DeleteCategoryRequest {
    /// Category to delete
    pub category_id: Uuid,
}

impl ApiRequest for DeleteCategoryRequest {
    type Response = DeleteCategoryResponse;

    fn build_request(
        self,
        ctx: &RequestContext,
        client: &Client,
    ) -> Result<RequestBuilder, ApiError> {
        let url = ctx.url(&format!("/api/admin/categories/{}", self.category_id))?;
        ctx.authorize(client.delete(url))
    }
}
