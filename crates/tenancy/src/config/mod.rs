//! Environment-driven settings for the back office service.
//!
//! Every value comes from an `APP_*` variable (after `.env` is applied) and
//! falls back to a development default when unset.

use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_PAGE_SIZE: usize = 5;

/// Deployment stage, used for log context only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub store: StoreConfig,
    pub listing: ListingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: var("APP_ENV")
                .map(|raw| AppEnvironment::parse(&raw))
                .unwrap_or(AppEnvironment::Development),
            server: ServerConfig::from_env()?,
            telemetry: TelemetryConfig {
                log_level: var("APP_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            },
            store: StoreConfig {
                seed_path: var("APP_SEED_PATH").map(PathBuf::from),
            },
            listing: ListingConfig::from_env()?,
        })
    }
}

/// Trimmed value of `key`; unset and blank are the same.
fn var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

/// Listener binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let port = match var("APP_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort)?,
            None => DEFAULT_PORT,
        };
        Ok(Self {
            host: var("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the in-memory store gets its initial records from.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub seed_path: Option<PathBuf>,
}

/// Defaults for the tenant table.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    pub default_page_size: usize,
}

impl ListingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let default_page_size = match var("APP_PAGE_SIZE") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => return Err(ConfigError::InvalidPageSize),
            },
            None => DEFAULT_PAGE_SIZE,
        };
        Ok(Self { default_page_size })
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidPageSize,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort => f.write_str("APP_PORT must be a valid u16"),
            Self::InvalidPageSize => f.write_str("APP_PAGE_SIZE must be a positive integer"),
            Self::InvalidHost { .. } => {
                f.write_str("APP_HOST must be localhost or an IPv4/IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidHost { source } => Some(source),
            Self::InvalidPort | Self::InvalidPageSize => None,
        }
    }
}
