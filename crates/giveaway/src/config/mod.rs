use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::draw::DEFAULT_DRAWN_BY;
use crate::workflows::entries::{EligibilityConfig, EligibilityConfigPatch};

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
    pub giveaway: GiveawayConfig,
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
            giveaway: GiveawayConfig::from_env()?,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Campaign defaults: who runs the draws and the rules a fresh store starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiveawayConfig {
    pub event_name: String,
    pub drawn_by: String,
    pub eligibility: EligibilityConfig,
}

impl Default for GiveawayConfig {
    fn default() -> Self {
        Self {
            event_name: "Giveaway".to_string(),
            drawn_by: DEFAULT_DRAWN_BY.to_string(),
            eligibility: EligibilityConfig::default(),
        }
    }
}

impl GiveawayConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let patch = EligibilityConfigPatch {
            enable_hashtag: env_flag("GIVEAWAY_ENABLE_HASHTAG")?,
            required_hashtag: env::var("GIVEAWAY_REQUIRED_HASHTAG").ok(),
            enable_tag: env_flag("GIVEAWAY_ENABLE_TAG")?,
            min_tagged_friends: env_count("GIVEAWAY_MIN_TAGGED_FRIENDS")?,
            enable_min_length: env_flag("GIVEAWAY_ENABLE_MIN_LENGTH")?,
            min_text_length: env_count("GIVEAWAY_MIN_TEXT_LENGTH")?,
        };
        let eligibility =
            defaults
                .eligibility
                .merge(&patch)
                .map_err(|err| ConfigError::InvalidSetting {
                    key: "GIVEAWAY_REQUIRED_HASHTAG",
                    reason: err.to_string(),
                })?;

        Ok(Self {
            event_name: env::var("GIVEAWAY_EVENT_NAME").unwrap_or(defaults.event_name),
            drawn_by: env::var("GIVEAWAY_DRAWN_BY")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.drawn_by),
            eligibility,
        })
    }
}

fn env_flag(key: &'static str) -> Result<Option<bool>, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidSetting {
            key,
            reason: format!("expected a boolean, got '{raw}'"),
        }),
    }
}

fn env_count(key: &'static str) -> Result<Option<usize>, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<usize>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidSetting {
            key,
            reason: format!("expected a non-negative integer, got '{raw}'"),
        })
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSetting { key: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSetting { key, reason } => write!(f, "{key}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidSetting { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
