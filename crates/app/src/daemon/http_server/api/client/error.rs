use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
    #[error("this operation needs an admin token (--token or PUDDING_TOKEN)")]
    MissingToken,
}

impl ApiError {
    /// Turn an error response into an `ApiError`, preferring the
    /// `{"error": ...}` message the server sends.
    pub(crate) fn from_body(status: StatusCode, body: String) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or(body);
        ApiError::HttpStatus(status, message)
    }
}
