use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub leads: LeadsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            leads: LeadsConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

pub const DEFAULT_DATASET_SIZE: usize = 150;
pub const DEFAULT_DATASET_SEED: u64 = 42;
pub const DEFAULT_MIN_SCORE: u8 = 75;

/// Dataset and default filter settings for the lead pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadsConfig {
    pub dataset_size: usize,
    pub seed: u64,
    pub default_min_score: u8,
    /// When set, leads are ingested from this CSV instead of being generated.
    pub source_csv: Option<PathBuf>,
}

impl Default for LeadsConfig {
    fn default() -> Self {
        Self {
            dataset_size: DEFAULT_DATASET_SIZE,
            seed: DEFAULT_DATASET_SEED,
            default_min_score: DEFAULT_MIN_SCORE,
            source_csv: None,
        }
    }
}

impl LeadsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let dataset_size = match env::var("LEADS_DATASET_SIZE") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => return Err(ConfigError::InvalidDatasetSize),
            },
            Err(_) => defaults.dataset_size,
        };

        let seed = match env::var("LEADS_SEED") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidSeed)?,
            Err(_) => defaults.seed,
        };

        let default_min_score = match env::var("LEADS_MIN_SCORE") {
            Ok(raw) => match raw.trim().parse::<u8>() {
                Ok(score) if score <= 100 => score,
                _ => return Err(ConfigError::InvalidMinScore),
            },
            Err(_) => defaults.default_min_score,
        };

        let source_csv = env::var("LEADS_SOURCE_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            dataset_size,
            seed,
            default_min_score,
            source_csv,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidDatasetSize,
    InvalidSeed,
    InvalidMinScore,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidDatasetSize => {
                write!(f, "LEADS_DATASET_SIZE must be a positive integer")
            }
            ConfigError::InvalidSeed => write!(f, "LEADS_SEED must be a valid u64"),
            ConfigError::InvalidMinScore => {
                write!(f, "LEADS_MIN_SCORE must be an integer between 0 and 100")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidDatasetSize
            | ConfigError::InvalidSeed
            | ConfigError::InvalidMinScore => None,
        }
    }
}
