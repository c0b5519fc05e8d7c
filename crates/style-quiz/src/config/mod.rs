use std::env;
use std::fmt;
use std::path::PathBuf;

/// Deployment stage, taken from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

const ENV_STAGE: &str = "APP_ENV";
const ENV_LOG_LEVEL: &str = "APP_LOG_LEVEL";
const ENV_CATALOG_PATH: &str = "QUIZ_CATALOG_PATH";
const ENV_RESULT_PREFIX: &str = "QUIZ_RESULT_PREFIX";

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_RESULT_PREFIX: &str = "result";

/// Settings for the scoring tools.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub scoring: ScoringConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Read the process environment, after merging a `.env` file when one exists.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|raw| !raw.trim().is_empty());

        let environment = value(ENV_STAGE)
            .map(|raw| AppEnvironment::parse_lenient(&raw))
            .unwrap_or(AppEnvironment::Development);

        let result_prefix =
            value(ENV_RESULT_PREFIX).unwrap_or_else(|| DEFAULT_RESULT_PREFIX.to_string());
        if !is_valid_prefix(&result_prefix) {
            return Err(ConfigError::InvalidResultPrefix {
                value: result_prefix,
            });
        }

        Ok(Self {
            environment,
            scoring: ScoringConfig {
                catalog_path: value(ENV_CATALOG_PATH).map(PathBuf::from),
                result_prefix,
            },
            telemetry: TelemetryConfig {
                log_level: value(ENV_LOG_LEVEL).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            },
        })
    }
}

fn is_valid_prefix(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Where questions come from and how results are labelled.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// JSON catalog to load; the built-in standard catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    pub result_prefix: String,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidResultPrefix { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidResultPrefix { value } => write!(
                f,
                "QUIZ_RESULT_PREFIX must be non-empty ASCII letters, digits, '-' or '_' (found '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
