use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use common::prelude::sanitize_content;

use super::PostCard;
use crate::daemon::http_server::handlers::NotFoundTemplate;
use crate::ServiceState;

#[derive(Template)]
#[template(path = "pages/post.html")]
pub struct PostTemplate {
    pub post: PostCard,
    /// Already sanitized, rendered unescaped
    pub content_html: String,
    pub business_hours: Option<String>,
    pub phone_number: Option<String>,
}

#[instrument(skip(state))]
pub async fn handler(
    State(state): State<ServiceState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> askama_axum::Response {
    let Ok(Path(post_id)) = path else {
        return post_not_found();
    };

    let post = match state.database().get_post(&post_id).await {
        Ok(Some(post)) => post,
        Ok(None) => return post_not_found(),
        Err(e) => {
            tracing::error!(post_id = %post_id, "failed to load post: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load post").into_response();
        }
    };

    let template = PostTemplate {
        post: PostCard::new(&post, &state),
        content_html: sanitize_content(&post.content),
        business_hours: post.business_hours,
        phone_number: post.phone_number,
    };

    template.into_response()
}

fn post_not_found() -> askama_axum::Response {
    let template = NotFoundTemplate::new("投稿が見つかりません");
    (StatusCode::NOT_FOUND, template).into_response()
}
