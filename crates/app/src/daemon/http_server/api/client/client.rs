use reqwest::Client;
use url::Url;

use super::error::ApiError;
use super::{ApiRequest, RequestContext};

#[derive(Debug, Clone)]
pub struct ApiClient {
    ctx: RequestContext,
    client: Client,
}

impl ApiClient {
    pub fn new(ctx: RequestContext) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self { ctx, client })
    }

    pub async fn call<T: ApiRequest>(&self, request: T) -> Result<T::Response, ApiError> {
        let request_builder = request.build_request(&self.ctx, &self.client)?;
        let response = request_builder.send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T::Response>().await?)
        } else {
            Err(ApiError::from_body(status, response.text().await?))
        }
    }

    pub fn context(&self) -> &RequestContext {
        &self.ctx
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> &Url {
        &self.ctx.base_url
    }

    /// Get the underlying HTTP client for custom requests
    pub fn http_client(&self) -> &Client {
        &self.client
    }
}
