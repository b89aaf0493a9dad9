use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use url::Url;

const TRANSLATE_PATH: &str = "/integrations/google-translate/language/translate/v2";
const PLACES_PATH: &str = "/integrations/google-place-autocomplete/autocomplete/json";
const SUBMIT_PATH: &str = "/api/submit-rental-application";

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

/// Top-level configuration for the intake service and CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub integrations: IntegrationConfig,
    pub intake: IntakeConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(&var_or("APP_ENV", "development"));

        let host = var_or("APP_HOST", "127.0.0.1");
        let port = var_or("APP_PORT", "3000")
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = var_or("APP_LOG_LEVEL", "info");

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            integrations: IntegrationConfig::from_env()?,
            intake: IntakeConfig::from_env()?,
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

/// Endpoints and transport settings for the translate, places, and submit backends.
#[derive(Debug, Clone)]
pub struct IntegrationConfig {
    pub translate_url: Url,
    pub places_url: Url,
    pub submit_url: Url,
    /// Radius sent with every autocomplete request.
    pub search_radius: u32,
    pub request_timeout: Duration,
}

impl IntegrationConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:8080";

    fn from_env() -> Result<Self, ConfigError> {
        let base = var_or("APP_INTEGRATIONS_BASE_URL", Self::DEFAULT_BASE_URL);
        let base = base.trim_end_matches('/');

        Ok(Self {
            translate_url: endpoint("APP_TRANSLATE_URL", base, TRANSLATE_PATH)?,
            places_url: endpoint("APP_PLACES_URL", base, PLACES_PATH)?,
            submit_url: endpoint("APP_SUBMIT_URL", base, SUBMIT_PATH)?,
            search_radius: parse_var("APP_SEARCH_RADIUS", 500)?,
            request_timeout: Duration::from_secs(parse_var("APP_HTTP_TIMEOUT_SECS", 10)?),
        })
    }

    /// Builds the endpoint set for a single backend origin.
    pub fn for_base_url(base: &str) -> Result<Self, ConfigError> {
        let base = base.trim_end_matches('/');
        let join = |key: &'static str, path: &str| {
            Url::parse(&format!("{base}{path}")).map_err(|source| ConfigError::InvalidUrl {
                key,
                source,
            })
        };

        Ok(Self {
            translate_url: join("APP_TRANSLATE_URL", TRANSLATE_PATH)?,
            places_url: join("APP_PLACES_URL", PLACES_PATH)?,
            submit_url: join("APP_SUBMIT_URL", SUBMIT_PATH)?,
            search_radius: 500,
            request_timeout: Duration::from_secs(10),
        })
    }
}

/// Per-session behavior of the intake form.
#[derive(Debug, Clone, Default)]
pub struct IntakeConfig {
    /// Wait applied before an address search is sent; zero disables debouncing.
    pub search_debounce: Duration,
    /// Reuse fully translated label sets when a language is selected again.
    pub cache_translations: bool,
    /// Sessions untouched for this long are dropped by the registry; zero keeps them forever.
    pub session_idle_ttl: Duration,
}

impl IntakeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let debounce_ms: u64 = parse_var("APP_SEARCH_DEBOUNCE_MS", 0)?;
        let cache_translations = parse_flag("APP_TRANSLATION_CACHE", false)?;
        let idle_ttl_secs: u64 = parse_var("APP_SESSION_IDLE_TTL_SECS", 1800)?;

        Ok(Self {
            search_debounce: Duration::from_millis(debounce_ms),
            cache_translations,
            session_idle_ttl: Duration::from_secs(idle_ttl_secs),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key }),
        Err(_) => Ok(default),
    }
}

fn parse_flag(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::InvalidFlag { key }),
        },
        Err(_) => Ok(default),
    }
}

fn endpoint(key: &'static str, base: &str, path: &str) -> Result<Url, ConfigError> {
    let raw = env::var(key).unwrap_or_else(|_| format!("{base}{path}"));
    Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { key, source })
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidNumber {
        key: &'static str,
    },
    InvalidFlag {
        key: &'static str,
    },
    InvalidUrl {
        key: &'static str,
        source: url::ParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key } => {
                write!(f, "{key} must be a non-negative integer")
            }
            ConfigError::InvalidFlag { key } => write!(f, "{key} must be true or false"),
            ConfigError::InvalidUrl { key, .. } => write!(f, "{key} must be an absolute URL"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidUrl { source, .. } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidFlag { .. } => None,
        }
    }
}
