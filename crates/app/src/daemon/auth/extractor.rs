use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::{AuthError, Identity};
use crate::ServiceState;

/// An admin whose token has been verified.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

/// Pull the token out of an `Authorization` header value.
/// Both `Bearer <token>` and a bare token are accepted.
fn bearer_token(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        Some(_) => return None,
        None if value.eq_ignore_ascii_case("bearer") => return None,
        None => value,
    };
    (!token.is_empty()).then_some(token)
}

#[async_trait]
impl FromRequestParts<ServiceState> for AuthenticatedUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AuthError::MissingToken)?;

        let identity = state.auth().verify(token).await?;
        tracing::debug!(user = %identity.id, "authenticated admin request");
        Ok(AuthenticatedUser(identity))
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::Unavailable(reason) => {
                tracing::error!(reason = %reason, "could not verify admin token");
            }
            _ => tracing::warn!("rejected admin request: {}", self),
        }
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
