// src/config.rs
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_STORE_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_MAX_WORKERS: usize = 8;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Startup configuration, read once from the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub static_dir: PathBuf,
    pub store_timeout: Duration,
    pub max_workers: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_path: database_path_from_url(&database_url)?,
            host: parse_or("HOST", get("HOST"), DEFAULT_HOST.parse().ok())?,
            port: parse_or("PORT", get("PORT"), Some(DEFAULT_PORT))?,
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            store_timeout: Duration::from_millis(parse_or(
                "STORE_TIMEOUT_MS",
                get("STORE_TIMEOUT_MS"),
                Some(DEFAULT_STORE_TIMEOUT_MS),
            )?),
            max_workers: parse_or("MAX_WORKERS", get("MAX_WORKERS"), Some(DEFAULT_MAX_WORKERS))?,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: Option<T>,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
        None => default.ok_or(ConfigError::Missing(name)),
    }
}

/// Accepts a bare path or a `sqlite://` / `sqlite:` URL.
///
/// In-memory databases are refused: every pooled connection would get its
/// own empty database.
fn database_path_from_url(url: &str) -> Result<PathBuf, ConfigError> {
    let url = url.trim();
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);

    if path.is_empty() || path == ":memory:" || path.contains("mode=memory") {
        return Err(ConfigError::Invalid {
            name: "DATABASE_URL",
            value: url.to_string(),
        });
    }
    Ok(PathBuf::from(path))
}
