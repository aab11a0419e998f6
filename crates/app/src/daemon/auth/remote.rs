use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use super::{AuthError, AuthVerifier, Identity};

const VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Verifies tokens by asking a GoTrue-style identity service who they belong to.
#[derive(Debug, Clone)]
pub struct RemoteVerifier {
    user_url: Url,
    api_key: Option<String>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl RemoteVerifier {
    pub fn new(base_url: Url, api_key: Option<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(VERIFY_TIMEOUT).build()?;
        let mut user_url = base_url;
        user_url.set_path(&format!(
            "{}/auth/v1/user",
            user_url.path().trim_end_matches('/')
        ));
        Ok(Self {
            user_url,
            api_key,
            client,
        })
    }
}

#[async_trait]
impl AuthVerifier for RemoteVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let mut request = self.client.get(self.user_url.clone()).bearer_auth(token);
        if let Some(api_key) = &self.api_key {
            request = request.header("apikey", api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let user: UserResponse = response
                    .json()
                    .await
                    .map_err(|e| AuthError::Unavailable(e.to_string()))?;
                Ok(Identity {
                    id: user.id,
                    email: user.email,
                })
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::InvalidToken),
            status => Err(AuthError::Unavailable(format!(
                "identity service returned {}",
                status
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderMap;
    use axum::routing::get;
    use axum::{Json, Router};

    use super::*;

    async fn fake_user(headers: HeaderMap) -> Result<Json<serde_json::Value>, StatusCode> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let api_key = headers.get("apikey").and_then(|v| v.to_str().ok());

        match (auth, api_key) {
            ("Bearer good", Some("anon")) => Ok(Json(serde_json::json!({
                "id": "8d0fd2b3-9ca7-4d9e-a95f-9e13dded323e",
                "email": "admin@example.com",
                "aud": "authenticated"
            }))),
            (_, Some("anon")) => Err(StatusCode::UNAUTHORIZED),
            _ => Err(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    async fn spawn_identity_service() -> Url {
        let app = Router::new().route("/auth/v1/user", get(fake_user));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{}", addr)).unwrap()
    }

    #[tokio::test]
    async fn test_resolves_identity() {
        let base = spawn_identity_service().await;
        let verifier = RemoteVerifier::new(base, Some("anon".to_string())).unwrap();

        let identity = verifier.verify("good").await.unwrap();
        assert_eq!(identity.id, "8d0fd2b3-9ca7-4d9e-a95f-9e13dded323e");
        assert_eq!(identity.email.as_deref(), Some("admin@example.com"));

        assert!(matches!(
            verifier.verify("bad").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_service_errors_are_unavailable() {
        let base = spawn_identity_service().await;
        let verifier = RemoteVerifier::new(base, None).unwrap();

        assert!(matches!(
            verifier.verify("good").await,
            Err(AuthError::Unavailable(_))
        ));
    }
}
