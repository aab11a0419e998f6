use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::op::Op;
use pudding_blog::http_server::api::client::ApiError;
use pudding_blog::http_server::api::covers::UploadCoverRequest;

crate::command_enum! {
    (Upload, Upload),
}

#[derive(Args, Debug, Clone)]
pub struct Cover {
    #[command(subcommand)]
    pub command: Command,
}

#[async_trait::async_trait]
impl Op for Cover {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

#[derive(Args, Debug, Clone)]
pub struct Upload {
    /// Image file to upload
    pub path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("{0} does not look like an image")]
    NotAnImage(PathBuf),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl Op for Upload {
    type Error = UploadError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mime = mime_guess::from_path(&self.path).first_or_octet_stream();
        if mime.type_() != mime_guess::mime::IMAGE {
            return Err(UploadError::NotAnImage(self.path.clone()));
        }

        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|e| UploadError::Read(self.path.clone(), e))?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cover".to_string());

        let stored = ctx
            .client
            .call(UploadCoverRequest {
                file_name,
                content_type: mime.essence_str().to_string(),
                data,
            })
            .await?;

        Ok(format!("key: {}\nurl: {}", stored.key, stored.url))
    }
}
