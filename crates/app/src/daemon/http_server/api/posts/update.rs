use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::prelude::{Post, PostDraft};

use super::PostWriteApiError;
use crate::daemon::auth::AuthenticatedUser;
use crate::daemon::http_server::api::client::{ApiError, ApiRequest, RequestContext};
use crate::ServiceState;

/// Replaces every field of the post, including its category set.
pub async fn handler(
    AuthenticatedUser(user): AuthenticatedUser,
    State(state): State<ServiceState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<PostDraft>, JsonRejection>,
) -> Result<impl IntoResponse, PostWriteApiError> {
    let Path(post_id) = path.map_err(|e| PostWriteApiError::InvalidRequest(e.body_text()))?;
    let Json(draft) = payload.map_err(|e| PostWriteApiError::InvalidBody(e.body_text()))?;

    let post = state.database().update_post(&post_id, draft).await?;
    tracing::info!(user = %user.id, post_id = %post.id, "post updated");

    Ok((http::StatusCode::OK, Json(post)).into_response())
}

/// Request with post_id for client-side use
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub post_id: Uuid,
    #[serde(flatten)]
    pub draft: PostDraft,
}

impl ApiRequest for UpdatePostRequest {
    type Response = Post;

    fn build_request(
        self,
        ctx: &RequestContext,
        client: &Client,
    ) -> Result<RequestBuilder, ApiError> {
        let url = ctx.url(&format!("/api/admin/posts/{}", self.post_id))?;
        ctx.authorize(client.put(url).json(&self.draft))
    }
}
