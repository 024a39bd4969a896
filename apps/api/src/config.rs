use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Log line format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
    /// Built frontend assets (JS/CSS bundles), served at their relative paths.
    pub static_dir: Option<PathBuf>,
    /// Overrides the bundled SPA document.
    pub index_html_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
            None => 8080,
        };

        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw
                .parse::<IpAddr>()
                .with_context(|| format!("BIND_ADDR must be an IP address, got '{raw}'"))?,
            None => IpAddr::from([0, 0, 0, 0]),
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        Ok(Config {
            bind_addr,
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_format,
            static_dir: non_empty(lookup("STATIC_DIR")).map(PathBuf::from),
            index_html_path: non_empty(lookup("INDEX_HTML_PATH")).map(PathBuf::from),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
