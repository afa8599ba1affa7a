use crate::domain::news::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::domain::news::recency::{DEFAULT_RETENTION_DAYS, MAX_RETENTION_DAYS};
use crate::infrastructure::repositories::DEFAULT_FETCH_TIMEOUT;
use serde::Deserialize;
use std::env;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str =
    "PhillyNewsAggregator/0.1 (+https://github.com/philly-news/philly-news-backend)";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Aggregation
    pub feed_timeout_ms: u64,
    pub retention_days: i64,
    pub default_items_per_page: u32,
    pub max_items_per_page: u32,
    pub feed_cache_ttl_secs: u64,
    pub feed_user_agent: String,
    pub sources_file: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            feed_timeout_ms: env::var("FEED_TIMEOUT_MS")
                .map_or(Ok(DEFAULT_FETCH_TIMEOUT.as_millis() as u64), |v| v.parse::<u64>())?,
            retention_days: env::var("RETENTION_DAYS")
                .map_or(Ok(DEFAULT_RETENTION_DAYS), |v| v.parse::<i64>())?,
            default_items_per_page: env::var("DEFAULT_ITEMS_PER_PAGE")
                .map_or(Ok(DEFAULT_ITEMS_PER_PAGE), |v| v.parse::<u32>())?,
            max_items_per_page: env::var("MAX_ITEMS_PER_PAGE")
                .unwrap_or_else(|_| "100".to_string())
                .parse()?,
            feed_cache_ttl_secs: env::var("FEED_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()?,
            feed_user_agent: env::var("FEED_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            sources_file: env::var("SOURCES_FILE").ok().filter(|p| !p.trim().is_empty()),
        };

        config.validate()?;

        Ok(config)
    }

    /// Reject values the aggregation pipeline cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_RETENTION_DAYS).contains(&self.retention_days) {
            return Err(ConfigError::Invalid(format!(
                "RETENTION_DAYS must be between 1 and {}, got {}",
                MAX_RETENTION_DAYS, self.retention_days
            )));
        }
        if self.feed_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "FEED_TIMEOUT_MS must be greater than 0".to_string(),
            ));
        }
        if self.max_items_per_page == 0 || self.default_items_per_page == 0 {
            return Err(ConfigError::Invalid(
                "DEFAULT_ITEMS_PER_PAGE and MAX_ITEMS_PER_PAGE must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_millis(self.feed_timeout_ms)
    }

    pub fn feed_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.feed_cache_ttl_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_format: LogFormat::Pretty,
            feed_timeout_ms: DEFAULT_FETCH_TIMEOUT.as_millis() as u64,
            retention_days: DEFAULT_RETENTION_DAYS,
            default_items_per_page: DEFAULT_ITEMS_PER_PAGE,
            max_items_per_page: 100,
            feed_cache_ttl_secs: 300,
            feed_user_agent: DEFAULT_USER_AGENT.to_string(),
            sources_file: None,
        }
    }
}
