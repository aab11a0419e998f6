use std::path::PathBuf;

use cover_store::ObjectStoreConfig;
use url::Url;

use super::auth::AuthConfig;

#[derive(Debug, Clone)]
pub struct Config {
    // http server configuration
    /// Port for the app server (HTML pages + API)
    pub app_port: u16,

    // data store configuration
    /// a path to a sqlite database, if not set then an
    ///  in-memory database will be used
    pub sqlite_path: Option<PathBuf>,

    // cover image configuration
    /// Object storage backend for cover images
    pub storage: ObjectStoreConfig,
    /// Public base URL for cover images. When not set, covers are
    ///  served by the daemon itself under `/covers/`
    pub public_cover_url: Option<Url>,

    // admin authentication
    pub auth: AuthConfig,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Where cover image URLs point to.
    pub fn cover_base_url(&self) -> Result<Url, url::ParseError> {
        match &self.public_cover_url {
            Some(url) => Ok(url.clone()),
            None => Url::parse(&format!("http://localhost:{}/covers/", self.app_port)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(public_cover_url: Option<Url>) -> Config {
        Config {
            app_port: 8080,
            sqlite_path: None,
            storage: ObjectStoreConfig::Memory,
            public_cover_url,
            auth: AuthConfig::default(),
            log_level: tracing::Level::INFO,
            log_dir: None,
        }
    }

    #[test]
    fn test_cover_base_url() {
        assert_eq!(
            config(None).cover_base_url().unwrap().as_str(),
            "http://localhost:8080/covers/"
        );

        let cdn = Url::parse("https://cdn.example.com/cover_image/").unwrap();
        assert_eq!(config(Some(cdn.clone())).cover_base_url().unwrap(), cdn);
    }
}
