use reqwest::RequestBuilder;
use url::Url;

use super::ApiError;

/// Everything a request needs to know about where it goes and who sends it.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub base_url: Url,
    pub token: Option<String>,
}

impl RequestContext {
    pub fn new(base_url: Url, token: Option<String>) -> Self {
        Self { base_url, token }
    }

    /// Resolve an absolute API path against the base URL.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// Attach the admin token, failing if there is none.
    pub fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::MissingToken)?;
        Ok(request.bearer_auth(token))
    }
}
