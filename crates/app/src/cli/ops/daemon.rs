use clap::Args;

use pudding_blog::state::{AppState, StateError};
use pudding_blog::{spawn_service, ServiceConfig};

#[derive(Args, Debug, Clone)]
pub struct Daemon {
    /// Override app server port (default from config)
    #[arg(long)]
    pub app_port: Option<u16>,

    /// Directory for log files (logs to stdout only if not set)
    #[arg(long)]
    pub log_dir: Option<std::path::PathBuf>,

    /// Keep posts in memory instead of the config directory's database
    #[arg(long)]
    pub ephemeral: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("state error: {0}")]
    StateError(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Daemon {
    type Error = DaemonError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = AppState::load(ctx.config_path.clone())?;
        let log_level = state.config.log_level()?;

        let config = ServiceConfig {
            app_port: self.app_port.unwrap_or(state.config.app_port),
            sqlite_path: (!self.ephemeral).then(|| state.db_path.clone()),
            storage: state.config.storage.clone(),
            public_cover_url: state.config.public_cover_url.clone(),
            auth: state.config.auth.clone(),
            log_level,
            log_dir: self.log_dir.clone().or(state.config.log_dir.clone()),
        };

        spawn_service(&config).await;
        Ok("daemon ended".to_string())
    }
}
