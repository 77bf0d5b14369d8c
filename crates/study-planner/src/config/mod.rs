use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub planner: PlannerConfig,
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

        let selection_capacity = parse_positive(
            "PLANNER_SELECTION_CAPACITY",
            PlannerConfig::DEFAULT_SELECTION_CAPACITY,
        )
        .ok_or(ConfigError::InvalidSelectionCapacity)?;
        let display_limit =
            parse_positive("PLANNER_DISPLAY_LIMIT", PlannerConfig::DEFAULT_DISPLAY_LIMIT)
                .ok_or(ConfigError::InvalidDisplayLimit)?;

        let reporting_currency = env::var("PLANNER_REPORTING_CURRENCY")
            .unwrap_or_else(|_| "USD".to_string())
            .trim()
            .to_ascii_uppercase();
        if reporting_currency.len() != 3
            || !reporting_currency.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(ConfigError::InvalidReportingCurrency(reporting_currency));
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            planner: PlannerConfig {
                selection_capacity,
                display_limit,
                reporting_currency,
            },
        })
    }
}

fn parse_positive(key: &str, default: usize) -> Option<usize> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<usize>().ok().filter(|value| *value > 0),
        Err(_) => Some(default),
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

/// Knobs for the comparison screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub selection_capacity: usize,
    pub display_limit: usize,
    /// Label for catalog amounts. No conversion happens, so it must name the
    /// currency the loaded catalog is priced in (USD for the built-in one).
    pub reporting_currency: String,
}

impl PlannerConfig {
    pub const DEFAULT_SELECTION_CAPACITY: usize = 4;
    pub const DEFAULT_DISPLAY_LIMIT: usize = 6;

    /// Rejects a reporting currency that differs from the catalog's pricing.
    pub fn ensure_reporting_currency(&self, catalog_currency: &str) -> Result<(), ConfigError> {
        let catalog_currency = catalog_currency.trim().to_ascii_uppercase();
        if self.reporting_currency == catalog_currency {
            Ok(())
        } else {
            Err(ConfigError::ReportingCurrencyMismatch {
                configured: self.reporting_currency.clone(),
                catalog: catalog_currency,
            })
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            selection_capacity: Self::DEFAULT_SELECTION_CAPACITY,
            display_limit: Self::DEFAULT_DISPLAY_LIMIT,
            reporting_currency: "USD".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSelectionCapacity,
    InvalidDisplayLimit,
    InvalidReportingCurrency(String),
    ReportingCurrencyMismatch { configured: String, catalog: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSelectionCapacity => {
                write!(f, "PLANNER_SELECTION_CAPACITY must be a positive integer")
            }
            ConfigError::InvalidDisplayLimit => {
                write!(f, "PLANNER_DISPLAY_LIMIT must be a positive integer")
            }
            ConfigError::InvalidReportingCurrency(value) => write!(
                f,
                "PLANNER_REPORTING_CURRENCY must be a three-letter code, got '{}'",
                value
            ),
            ConfigError::ReportingCurrencyMismatch {
                configured,
                catalog,
            } => write!(
                f,
                "PLANNER_REPORTING_CURRENCY is {} but the catalog is priced in {}",
                configured, catalog
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
