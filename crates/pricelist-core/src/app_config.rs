use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Optional YAML file overriding the built-in discount tiers.
    pub discounts_path: Option<PathBuf>,
    pub max_upload_bytes: usize,
    /// Thousands separator used when rendering prices for display.
    pub group_separator: char,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}
