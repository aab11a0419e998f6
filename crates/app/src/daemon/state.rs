use axum::extract::FromRef;
use cover_store::{CoverKey, CoverStore, CoverStoreError};
use url::Url;

use super::auth::{AuthSetupError, AuthVerifier, DynAuthVerifier};
use super::config::Config;
use crate::daemon::database::{Database, DatabaseSetupError};

/// Main service state, shared by every request handler
#[derive(Clone)]
pub struct State {
    database: Database,
    covers: CoverStore,
    auth: DynAuthVerifier,
}

impl State {
    pub fn new(database: Database, covers: CoverStore, auth: DynAuthVerifier) -> Self {
        Self {
            database,
            covers,
            auth,
        }
    }

    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        // 1. Setup database
        let database = match config.sqlite_path {
            Some(ref path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        return Err(StateSetupError::DatabasePathDoesNotExist);
                    }
                }
                let url = Url::parse(&format!("sqlite://{}", path.display()))
                    .map_err(|_| StateSetupError::InvalidDatabaseUrl)?;
                tracing::info!(url = %url, "connecting to database");
                Database::connect(&url).await?
            }
            // otherwise just set up an in-memory database
            None => {
                tracing::warn!("no database path configured, using an in-memory database");
                Database::in_memory().await?
            }
        };

        // 2. Setup cover store
        let cover_base = config
            .cover_base_url()
            .map_err(|_| StateSetupError::InvalidCoverUrl)?;
        let covers = CoverStore::new(&config.storage, cover_base).await?;

        // 3. Setup token verification
        let auth = config.auth.build()?;

        Ok(Self::new(database, covers, auth))
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn covers(&self) -> &CoverStore {
        &self.covers
    }

    pub fn auth(&self) -> &dyn AuthVerifier {
        self.auth.as_ref()
    }

    /// Public URL for a stored cover key, if the key is one this store issued.
    pub fn cover_url(&self, key: &str) -> Option<String> {
        let key: CoverKey = key.parse().ok()?;
        self.covers.public_url(&key).ok()
    }
}

impl AsRef<Database> for State {
    fn as_ref(&self) -> &Database {
        self.database()
    }
}

impl FromRef<State> for Database {
    fn from_ref(state: &State) -> Self {
        state.database.clone()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("Database path does not exist")]
    DatabasePathDoesNotExist,
    #[error("Database setup error: {0}")]
    DatabaseSetupError(#[from] DatabaseSetupError),
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,
    #[error("Invalid public cover URL")]
    InvalidCoverUrl,
    #[error("Cover store error: {0}")]
    CoverStore(#[from] CoverStoreError),
    #[error("Auth setup error: {0}")]
    Auth(#[from] AuthSetupError),
}
