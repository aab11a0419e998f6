use axum::routing::get;
use axum::Router;
use http::header::{ACCEPT, ORIGIN};
use http::Method;
use tower_http::cors::{Any, CorsLayer};

mod index;
mod post;

use common::prelude::Post;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    let cors_layer = CorsLayer::new()
        .allow_methods(vec![Method::GET])
        .allow_headers(vec![ACCEPT, ORIGIN])
        .allow_origin(Any)
        .allow_credentials(false);

    Router::new()
        .route("/", get(index::handler))
        .route("/p/:post_id", get(post::handler))
        .with_state(state)
        .layer(cors_layer)
}

/// A post as the listing page shows it.
pub struct PostCard {
    pub id: String,
    pub title: String,
    pub cover_url: Option<String>,
    pub shop_name: Option<String>,
    pub categories: Vec<CategoryLink>,
    pub created_at: String,
}

pub struct CategoryLink {
    pub id: String,
    pub name: String,
}

impl PostCard {
    fn new(post: &Post, state: &ServiceState) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            cover_url: state.cover_url(&post.cover_image_key),
            shop_name: post.shop_name.clone(),
            categories: post
                .categories
                .iter()
                .map(|c| CategoryLink {
                    id: c.id.to_string(),
                    name: c.name.clone(),
                })
                .collect(),
            created_at: post.created_at.format("%Y/%m/%d").to_string(),
        }
    }
}
