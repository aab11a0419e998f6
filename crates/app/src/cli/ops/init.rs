use clap::Args;
use url::Url;

use cover_store::ObjectStoreConfig;
use pudding_blog::daemon::auth::AuthConfig;
use pudding_blog::state::{generate_token, AppConfig, AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// App server port
    #[arg(long, default_value_t = 8080)]
    pub app_port: u16,

    /// Public base URL for cover images (defaults to the daemon's /covers/)
    #[arg(long)]
    pub public_cover_url: Option<Url>,

    /// Verify admin tokens against this identity service instead of a static token
    #[arg(long)]
    pub auth_url: Option<Url>,

    /// Project key sent to the identity service
    #[arg(long, requires = "auth_url")]
    pub auth_api_key: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let pudding_dir = AppState::pudding_dir(ctx.config_path.clone())?;
        let covers_path = pudding_dir.join(pudding_blog::state::COVERS_DIR_NAME);

        let auth = match &self.auth_url {
            Some(url) => AuthConfig::Remote {
                url: url.clone(),
                api_key: self.auth_api_key.clone(),
            },
            None => AuthConfig::Static {
                tokens: vec![generate_token()],
            },
        };

        let config = AppConfig {
            app_port: self.app_port,
            public_cover_url: self.public_cover_url.clone(),
            auth,
            storage: ObjectStoreConfig::Local { path: covers_path },
            ..AppConfig::default()
        };

        let state = AppState::init(Some(pudding_dir), Some(config))?;

        let auth_line = match &state.config.auth {
            AuthConfig::Static { tokens } => {
                format!("static token: {}", tokens.first().map(String::as_str).unwrap_or("-"))
            }
            AuthConfig::Remote { url, .. } => format!("identity service at {}", url),
        };

        let output = format!(
            "Initialized pudding directory at: {}\n\
             - Database: {}\n\
             - Covers: {}\n\
             - Config: {}\n\
             - App port: {}\n\
             - Admin auth: {}",
            state.pudding_dir.display(),
            state.db_path.display(),
            state.covers_path.display(),
            state.config_path.display(),
            state.config.app_port,
            auth_line
        );

        Ok(output)
    }
}
