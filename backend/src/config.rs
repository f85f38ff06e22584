//! Runtime settings, read from the environment (and `.env` when present).

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Invalid {key} value {value:?}: {reason}")]
pub struct ConfigError {
    key: &'static str,
    value: String,
    reason: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the clinic backend every relay talks to.
    pub api_url: String,
    pub host: String,
    pub port: u16,
    pub upstream_timeout: Duration,
    pub login_timeout: Duration,
    pub stats_timeout: Duration,
    pub open_browser: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        if dotenv::dotenv().is_ok() {
            info!("Loaded settings from .env");
        }
        Ok(Self {
            api_url: try_load::<String>("CLINIC_API_URL", "http://localhost:3001")?
                .trim_end_matches('/')
                .to_string(),
            host: try_load("CONSOLE_HOST", "127.0.0.1")?,
            port: try_load("CONSOLE_PORT", "8080")?,
            upstream_timeout: Duration::from_secs(try_load("UPSTREAM_TIMEOUT_SECS", "30")?),
            login_timeout: Duration::from_secs(try_load("LOGIN_TIMEOUT_SECS", "15")?),
            stats_timeout: Duration::from_secs(try_load("STATS_TIMEOUT_SECS", "5")?),
            open_browser: try_load("CONSOLE_OPEN_BROWSER", "true")?,
        })
    }

    pub fn console_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3001".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            upstream_timeout: Duration::from_secs(30),
            login_timeout: Duration::from_secs(15),
            stats_timeout: Duration::from_secs(5),
            open_browser: false,
        }
    }
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        key,
        reason: e.to_string(),
        value,
    })
}
