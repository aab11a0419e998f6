//! Typed HTTP client for the blog API, used by the CLI.
//!
//! Each endpoint's request type implements [`ApiRequest`] next to its
//! handler. Credentials never live in global state: every request is built
//! against an explicit [`RequestContext`].

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

mod client;
mod context;
mod error;

pub use client::ApiClient;
pub use context::RequestContext;
pub use error::ApiError;

pub trait ApiRequest {
    type Response: DeserializeOwned;

    fn build_request(self, ctx: &RequestContext, client: &Client)
        -> Result<RequestBuilder, ApiError>;
}
