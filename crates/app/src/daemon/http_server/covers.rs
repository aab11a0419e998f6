//! Serves stored cover images by key.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use cover_store::{sniff_content_type, CoverKey};

use super::handlers::not_found_handler;
use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/covers/:key", get(handler))
        .with_state(state)
}

#[tracing::instrument(skip(state, headers))]
pub async fn handler(
    State(state): State<ServiceState>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Response {
    let Ok(key) = key.parse::<CoverKey>() else {
        return not_found_handler(headers).await;
    };

    match state.covers().get(&key).await {
        Ok(Some(data)) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, sniff_content_type(&data)),
                // keys are content hashes, so the bytes behind one never change
                (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
            ],
            data,
        )
            .into_response(),
        Ok(None) => not_found_handler(headers).await,
        Err(e) => {
            tracing::error!(key = %key, "failed to read cover: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to read cover").into_response()
        }
    }
}
