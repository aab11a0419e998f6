pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "pudding")]
#[command(about = "A small blog about pudding shops", version)]
pub struct Args {
    /// Daemon URL (defaults to localhost on the configured app port)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// Path to the pudding config directory (defaults to ~/.pudding)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Admin token for write operations
    #[arg(long, global = true, env = "PUDDING_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: crate::Command,
}
