//! Items service configuration
//!
//! Built once at process entry and passed into each component. Database
//! settings have no defaults: a missing value is reported the first time a
//! connection is attempted, not at startup.

use std::fmt;
use std::str::FromStr;

/// Default Postgres port
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Database used for administrative statements during bootstrap
pub const ADMIN_DATABASE: &str = "postgres";

/// A required setting was not provided
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing configuration: {var} is not set")]
pub struct ConfigError {
    pub var: &'static str,
}

/// Postgres connection settings
#[derive(Clone)]
pub struct DatabaseConfig {
    /// `DB_HOST`
    pub host: Option<String>,
    /// `DB_PORT`
    pub port: u16,
    /// `POSTGRES_DB`
    pub database: Option<String>,
    /// `POSTGRES_USER`
    pub user: Option<String>,
    /// `POSTGRES_PASSWORD`
    pub password: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_DB_PORT,
            database: None,
            user: None,
            password: None,
        }
    }
}

impl DatabaseConfig {
    pub fn host(&self) -> Result<&str, ConfigError> {
        required(&self.host, "DB_HOST")
    }

    pub fn database(&self) -> Result<&str, ConfigError> {
        required(&self.database, "POSTGRES_DB")
    }

    pub fn user(&self) -> Result<&str, ConfigError> {
        required(&self.user, "POSTGRES_USER")
    }

    pub fn password(&self) -> Result<&str, ConfigError> {
        required(&self.password, "POSTGRES_PASSWORD")
    }
}

// Password stays out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

fn required<'a>(value: &'a Option<String>, var: &'static str) -> Result<&'a str, ConfigError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError { var })
}

/// What to do when the schema bootstrap fails at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BootstrapPolicy {
    /// Log the failure and keep starting; requests report errors later
    #[default]
    BestEffort,
    /// Abort startup with the bootstrap error
    FailFast,
}

impl fmt::Display for BootstrapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BestEffort => write!(f, "best-effort"),
            Self::FailFast => write!(f, "fail-fast"),
        }
    }
}

impl FromStr for BootstrapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "best-effort" | "best_effort" => Ok(Self::BestEffort),
            "fail-fast" | "fail_fast" => Ok(Self::FailFast),
            other => Err(format!(
                "invalid bootstrap policy '{}': expected 'best-effort' or 'fail-fast'",
                other
            )),
        }
    }
}
