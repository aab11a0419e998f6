use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PostWriteApiError;
use crate::daemon::auth::{AuthenticatedUser, Identity};
use crate::daemon::http_server::api::client::{ApiError, ApiRequest, RequestContext};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePostResponse {
    pub id: Uuid,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct DeletePostQuery {
    pub id: Uuid,
}

/// `DELETE /admin/posts/:post_id`
pub async fn handler(
    AuthenticatedUser(user): AuthenticatedUser,
    State(state): State<ServiceState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, PostWriteApiError> {
    let Path(post_id) = path.map_err(|e| PostWriteApiError::InvalidRequest(e.body_text()))?;
    delete_post(&state, &user, post_id).await
}

/// `DELETE /admin/posts?id=`
pub async fn query_handler(
    AuthenticatedUser(user): AuthenticatedUser,
    State(state): State<ServiceState>,
    query: Result<Query<DeletePostQuery>, QueryRejection>,
) -> Result<impl IntoResponse, PostWriteApiError> {
    let Query(query) = query.map_err(|e| PostWriteApiError::InvalidRequest(e.body_text()))?;
    delete_post(&state, &user, query.id).await
}

async fn delete_post(
    state: &ServiceState,
    user: &Identity,
    post_id: Uuid,
) -> Result<axum::response::Response, PostWriteApiError> {
    let deleted = state.database().delete_post(&post_id).await?;
    tracing::info!(user = %user.id, post_id = %deleted.id, "post deleted");

    Ok((
        http::StatusCode::OK,
        Json(DeletePostResponse {
            id: deleted.id,
            message: format!("「{}」を削除しました", deleted.title),
        }),
    )
        .into_response())
}

/// Request for client-side delete
#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct DeletePostRequest {
    /// Post to delete
    pub post_id: Uuid,
}

impl ApiRequest for DeletePostRequest {
    type Response = DeletePostResponse;

    fn build_request(
        self,
        ctx: &RequestContext,
        client: &Client,
    ) -> Result<RequestBuilder, ApiError> {
        let url = ctx.url(&format!("/api/admin/posts/{}", self.post_id))?;
        ctx.authorize(client.delete(url))
    }
}
