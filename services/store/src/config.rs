use serde::Deserialize;

use shopfront_core::config::Config;

/// Store service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server. Env var: `STORE_PORT`.
    #[serde(default = "default_store_port")]
    pub store_port: u16,
    /// Email of the identity that is always super_admin.
    pub root_admin_email: String,
    /// Buffered notifications per change-feed subscriber.
    #[serde(default = "default_change_feed_capacity")]
    pub change_feed_capacity: usize,
}

fn default_store_port() -> u16 {
    3114
}

fn default_change_feed_capacity() -> usize {
    256
}

impl Config for StoreConfig {}
