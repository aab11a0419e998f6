use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};

use cover_store::StoredCover;

use crate::daemon::auth::AuthenticatedUser;
use crate::daemon::http_server::api::client::{ApiError, ApiRequest, RequestContext};
use crate::daemon::http_server::api::internal_error;
use crate::ServiceState;

const FILE_FIELD: &str = "file";

pub type UploadCoverResponse = StoredCover;

/// Store an uploaded cover image under the hash of its bytes.
///
/// Expects a multipart body with an image in the `file` field. The original
/// file name is never used for storage.
pub async fn handler(
    AuthenticatedUser(user): AuthenticatedUser,
    State(state): State<ServiceState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, UploadCoverError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_type.starts_with("image/") {
            return Err(UploadCoverError::NotAnImage(content_type));
        }

        let data = field.bytes().await?;
        if data.is_empty() {
            return Err(UploadCoverError::Empty);
        }

        let stored = state
            .covers()
            .put(data)
            .await
            .map_err(|e| UploadCoverError::Store(internal_error("store cover", e)))?;
        tracing::info!(user = %user.id, key = %stored.key, size = stored.size, "cover uploaded");

        return Ok((http::StatusCode::CREATED, Json(stored)).into_response());
    }

    Err(UploadCoverError::MissingFile)
}

#[derive(Debug, thiserror::Error)]
pub enum UploadCoverError {
    #[error("multipart field 'file' is required")]
    MissingFile,
    #[error("only image uploads are accepted, got '{0}'")]
    NotAnImage(String),
    #[error("uploaded file is empty")]
    Empty,
    #[error("invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("{0}")]
    Store(String),
}

impl IntoResponse for UploadCoverError {
    fn into_response(self) -> Response {
        let status = match &self {
            UploadCoverError::MissingFile
            | UploadCoverError::NotAnImage(_)
            | UploadCoverError::Empty
            | UploadCoverError::Multipart(_) => http::StatusCode::BAD_REQUEST,
            UploadCoverError::Store(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// A cover image read by the client, ready to upload.
#[derive(Debug, Clone)]
pub struct UploadCoverRequest {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ApiRequest for UploadCoverRequest {
    type Response = UploadCoverResponse;

    fn build_request(
        self,
        ctx: &RequestContext,
        client: &Client,
    ) -> Result<RequestBuilder, ApiError> {
        let part = Part::bytes(self.data)
            .file_name(self.file_name)
            .mime_str(&self.content_type)?;
        let form = Form::new().part(FILE_FIELD, part);
        let request = client.post(ctx.url("/api/admin/covers")?).multipart(form);
        ctx.authorize(request)
    }
}
