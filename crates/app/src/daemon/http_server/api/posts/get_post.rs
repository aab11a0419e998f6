use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::prelude::Post;

use crate::daemon::http_server::api::client::{ApiError, ApiRequest, RequestContext};
use crate::daemon::http_server::api::internal_error;
use crate::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, GetPostError> {
    let Path(post_id) = path.map_err(|e| GetPostError::InvalidRequest(e.body_text()))?;
    let post = state
        .database()
        .get_post(&post_id)
        .await
        .map_err(|e| GetPostError::Database(internal_error("get post", e)))?
        .ok_or(GetPostError::NotFound(post_id))?;

    Ok((http::StatusCode::OK, Json(post)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum GetPostError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("post not found: {0}")]
    NotFound(Uuid),
    #[error("{0}")]
    Database(String),
}

impl IntoResponse for GetPostError {
    fn into_response(self) -> Response {
        let status = match &self {
            GetPostError::InvalidRequest(_) => http::StatusCode::BAD_REQUEST,
            GetPostError::NotFound(_) => http::StatusCode::NOT_FOUND,
            GetPostError::Database(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct GetPostRequest {
    /// Post to show
    pub post_id: Uuid,
}

impl ApiRequest for GetPostRequest {
    type Response = Post;

    fn build_request(
        self,
        ctx: &RequestContext,
        client: &Client,
    ) -> Result<RequestBuilder, ApiError> {
        Ok(client.get(ctx.url(&format!("/api/posts/{}", self.post_id))?))
    }
}
