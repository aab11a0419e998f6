//! Bearer token verification for admin endpoints.
//!
//! Every write endpoint takes an [`AuthenticatedUser`] extractor. The token
//! from the `Authorization` header is handed to the configured
//! [`AuthVerifier`] and the request is rejected with 401 before the handler
//! body runs if it does not resolve to an [`Identity`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

mod extractor;
mod remote;
mod static_token;

pub use extractor::AuthenticatedUser;
pub use remote::RemoteVerifier;
pub use static_token::StaticTokenVerifier;

/// Who an admin request is acting as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("identity service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait AuthVerifier: Send + Sync {
    /// Resolve a bearer token to an identity.
    async fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}

pub type DynAuthVerifier = Arc<dyn AuthVerifier>;

/// How the daemon verifies admin tokens, as stored in config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// Fixed set of admin tokens
    Static { tokens: Vec<String> },

    /// External identity service exposing `GET {url}/auth/v1/user`
    Remote {
        url: Url,
        /// Project key sent as the `apikey` header
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
    },
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig::Static { tokens: Vec::new() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthSetupError {
    #[error("failed to build identity service client: {0}")]
    Client(#[from] reqwest::Error),
}

impl AuthConfig {
    pub fn build(&self) -> Result<DynAuthVerifier, AuthSetupError> {
        match self {
            AuthConfig::Static { tokens } => {
                if tokens.is_empty() {
                    tracing::warn!("no admin tokens configured, every write will be rejected");
                }
                Ok(Arc::new(StaticTokenVerifier::new(tokens)))
            }
            AuthConfig::Remote { url, api_key } => {
                tracing::info!(url = %url, "verifying admin tokens against identity service");
                Ok(Arc::new(RemoteVerifier::new(url.clone(), api_key.clone())?))
            }
        }
    }

    /// The first static token, if any. Used by the CLI as a default credential.
    pub fn first_static_token(&self) -> Option<&str> {
        match self {
            AuthConfig::Static { tokens } => tokens.first().map(String::as_str),
            AuthConfig::Remote { .. } => None,
        }
    }
}
