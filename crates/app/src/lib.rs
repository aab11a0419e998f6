// Library exports for the `pudding` binary and integration tests

// Daemon/service modules (HTTP server, database, auth)
pub mod daemon;

// Config directory management (~/.pudding)
pub mod state;

// Re-export key types for convenience
pub use daemon::http_server;
pub use daemon::spawn_service;
pub use daemon::ServiceConfig;
pub use daemon::ServiceState;
