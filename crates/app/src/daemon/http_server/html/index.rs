use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use super::PostCard;
use crate::daemon::http_server::handlers::NotFoundTemplate;
use crate::ServiceState;

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub category: Option<Uuid>,
}

/// One entry of the category filter bar
pub struct CategoryFilter {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub posts: Vec<PostCard>,
    pub categories: Vec<CategoryFilter>,
    pub filtered: bool,
}

#[instrument(skip(state))]
pub async fn handler(
    State(state): State<ServiceState>,
    query: Result<Query<IndexQuery>, QueryRejection>,
) -> askama_axum::Response {
    // an unparseable filter names no category that exists
    let Ok(Query(query)) = query else {
        let template = NotFoundTemplate::new("カテゴリーが見つかりません");
        return (StatusCode::NOT_FOUND, template).into_response();
    };
    let db = state.database();

    let posts = match db.list_posts(query.category.as_ref()).await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::error!("failed to list posts: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load posts").into_response();
        }
    };

    let categories = match db.list_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!("failed to list categories: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load categories")
                .into_response();
        }
    };

    let template = IndexTemplate {
        posts: posts.iter().map(|p| PostCard::new(p, &state)).collect(),
        categories: categories
            .into_iter()
            .map(|c| CategoryFilter {
                selected: query.category == Some(c.id),
                id: c.id.to_string(),
                name: c.name,
            })
            .collect(),
        filtered: query.category.is_some(),
    };

    template.into_response()
}
