use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::prelude::Post;

use crate::daemon::http_server::api::client::{ApiError, ApiRequest, RequestContext};
use crate::daemon::http_server::api::internal_error;
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize, clap::Args)]
pub struct ListPostsRequest {
    /// Only list posts in this category
    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Uuid>,
}

/// Posts, newest first
pub type ListPostsResponse = Vec<Post>;

pub async fn handler(
    State(state): State<ServiceState>,
    query: Result<Query<ListPostsRequest>, QueryRejection>,
) -> Result<impl IntoResponse, ListPostsError> {
    let Query(req) = query.map_err(|e| ListPostsError::InvalidQuery(e.body_text()))?;
    let posts = state
        .database()
        .list_posts(req.category.as_ref())
        .await
        .map_err(|e| ListPostsError::Database(internal_error("list posts", e)))?;

    Ok((http::StatusCode::OK, Json(posts)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ListPostsError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("{0}")]
    Database(String),
}

impl IntoResponse for ListPostsError {
    fn into_response(self) -> Response {
        let status = match &self {
            ListPostsError::InvalidQuery(_) => http::StatusCode::BAD_REQUEST,
            ListPostsError::Database(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

impl ApiRequest for ListPostsRequest {
    type Response = ListPostsResponse;

    fn build_request(
        self,
        ctx: &RequestContext,
        client: &Client,
    ) -> Result<RequestBuilder, ApiError> {
        Ok(client.get(ctx.url("/api/posts")?).query(&self))
    }
}
