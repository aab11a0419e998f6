use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use common::prelude::{Post, PostDraft};

use super::PostWriteApiError;
use crate::daemon::auth::AuthenticatedUser;
use crate::daemon::http_server::api::client::{ApiError, ApiRequest, RequestContext};
use crate::ServiceState;

pub async fn handler(
    AuthenticatedUser(user): AuthenticatedUser,
    State(state): State<ServiceState>,
    payload: Result<Json<PostDraft>, JsonRejection>,
) -> Result<impl IntoResponse, PostWriteApiError> {
    let Json(draft) = payload.map_err(|e| PostWriteApiError::InvalidBody(e.body_text()))?;

    let post = state.database().create_post(draft).await?;
    tracing::info!(user = %user.id, post_id = %post.id, "post created");

    Ok((http::StatusCode::CREATED, Json(post)).into_response())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(flatten)]
    pub draft: PostDraft,
}

impl ApiRequest for CreatePostRequest {
    type Response = Post;

    fn build_request(
        self,
        ctx: &RequestContext,
        client: &Client,
    ) -> Result<RequestBuilder, ApiError> {
        let request = client.post(ctx.url("/api/admin/posts")?).json(&self.draft);
        ctx.authorize(request)
    }
}
