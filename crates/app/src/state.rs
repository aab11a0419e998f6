//! Config directory management
//!
//! A pudding directory (`~/.pudding` unless overridden) holds the daemon's
//! `config.toml`, its SQLite database and the local cover image store.

use std::{fs, path::PathBuf};

use cover_store::ObjectStoreConfig;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::daemon::auth::AuthConfig;

pub const APP_NAME: &str = "pudding";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DB_FILE_NAME: &str = "db.sqlite";
pub const COVERS_DIR_NAME: &str = "covers";

/// Configuration stored in config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port for the app server (HTML pages + API)
    #[serde(default = "default_app_port")]
    pub app_port: u16,
    /// Default log level, overridable with RUST_LOG
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for log files (logs to stdout only if not set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
    /// Public base URL for cover images (defaults to the daemon's `/covers/`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_cover_url: Option<Url>,
    /// Admin token verification
    #[serde(default)]
    pub auth: AuthConfig,
    /// Cover image storage backend
    #[serde(default)]
    pub storage: ObjectStoreConfig,
}

fn default_app_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_port: default_app_port(),
            log_level: default_log_level(),
            log_dir: None,
            public_cover_url: None,
            auth: AuthConfig::default(),
            storage: ObjectStoreConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn log_level(&self) -> Result<tracing::Level, StateError> {
        self.log_level
            .parse()
            .map_err(|_| StateError::InvalidLogLevel(self.log_level.clone()))
    }
}

/// A freshly generated admin token
pub fn generate_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the pudding directory (~/.pudding or custom)
    pub pudding_dir: PathBuf,
    /// Path to the SQLite database
    pub db_path: PathBuf,
    /// Path to the local cover store
    pub covers_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the pudding directory path (custom or default ~/.pudding)
    pub fn pudding_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new pudding state directory.
    ///
    /// Without an explicit config the covers are stored on the local
    /// filesystem and a single random admin token is generated.
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let pudding_dir = Self::pudding_dir(custom_path)?;

        if pudding_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&pudding_dir)?;

        let covers_path = pudding_dir.join(COVERS_DIR_NAME);
        fs::create_dir_all(&covers_path)?;

        let config = config.unwrap_or_else(|| AppConfig {
            auth: AuthConfig::Static {
                tokens: vec![generate_token()],
            },
            storage: ObjectStoreConfig::Local {
                path: covers_path.clone(),
            },
            ..AppConfig::default()
        });
        let config_path = pudding_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        // The daemon creates and migrates the database on first start
        let db_path = pudding_dir.join(DB_FILE_NAME);

        Ok(Self {
            pudding_dir,
            db_path,
            covers_path,
            config_path,
            config,
        })
    }

    /// Load existing state from the pudding directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let pudding_dir = Self::pudding_dir(custom_path)?;

        if !pudding_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let db_path = pudding_dir.join(DB_FILE_NAME);
        let covers_path = pudding_dir.join(COVERS_DIR_NAME);
        let config_path = pudding_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            pudding_dir,
            db_path,
            covers_path,
            config_path,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("pudding directory not initialized. Run 'pudding init' first")]
    NotInitialized,

    #[error("pudding directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
