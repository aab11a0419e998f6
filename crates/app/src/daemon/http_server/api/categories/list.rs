use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use common::prelude::Category;

use crate::daemon::http_server::api::client::{ApiError, ApiRequest, RequestContext};
use crate::daemon::http_server::api::internal_error;
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize, clap::Args)]
pub struct ListCategoriesRequest;

/// Categories sorted by name
pub type ListCategoriesResponse = Vec<Category>;

pub async fn handler(
    State(state): State<ServiceState>,
) -> Result<impl IntoResponse, ListCategoriesError> {
    let categories = state
        .database()
        .list_categories()
        .await
        .map_err(|e| ListCategoriesError::Database(internal_error("list categories", e)))?;

    Ok((http::StatusCode::OK, Json(categories)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ListCategoriesError {
    #[error("{0}")]
    Database(String),
}

impl IntoResponse for ListCategoriesError {
    fn into_response(self) -> Response {
        (
            http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

impl ApiRequest for ListCategoriesRequest {
    type Response = ListCategoriesResponse;

    fn build_request(
        self,
        ctx: &RequestContext,
        client: &Client,
    ) -> Result<RequestBuilder, ApiError> {
        Ok(client.get(ctx.url("/api/categories")?))
    }
}
