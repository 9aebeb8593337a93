//! # Coordinator Configuration Module
//!
//! Configuration for one tracked download page: where it lives, how long a
//! fetch may take, and the health policy applied to failed updates.
//!
//! ## Key Components
//!
//! - `CoordinatorConfig`: The configuration struct
//! - `CoordinatorConfigBuilder`: Builder pattern implementation
//!
//! Defaults point at the CTGP Deluxe download page with a 10 second fetch
//! bound and a 24 hour outage window.

use std::time::Duration;

use url::Url;

use crate::consts::{DOMAIN, FETCH_TIMEOUT, URL};
use crate::error::{Error, Result};
use crate::health::HealthConfig;

/// Configuration for the update coordinator
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Name used in logs
    pub name: String,

    /// Address of the tracked page
    pub url: String,

    /// Upper bound on a single fetch
    pub fetch_timeout: Duration,

    /// Health tracking policy
    pub health: HealthConfig,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            name: DOMAIN.to_string(),
            url: URL.to_string(),
            fetch_timeout: FETCH_TIMEOUT,
            health: HealthConfig::default(),
        }
    }
}

/// Builder for CoordinatorConfig
#[derive(Debug, Default)]
pub struct CoordinatorConfigBuilder {
    config: CoordinatorConfig,
}

impl CoordinatorConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CoordinatorConfig::default(),
        }
    }

    /// Set the name used in logs
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the tracked page address
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    /// Set the fetch timeout
    pub fn fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.config.fetch_timeout = fetch_timeout;
        self
    }

    /// Set the health tracking policy
    pub fn health(mut self, health: HealthConfig) -> Self {
        self.config.health = health;
        self
    }

    /// Build the configuration
    pub fn build(self) -> CoordinatorConfig {
        self.config
    }
}

impl CoordinatorConfig {
    /// Create a new builder
    pub fn builder() -> CoordinatorConfigBuilder {
        CoordinatorConfigBuilder::new()
    }

    /// Parse the configured page address
    pub fn parsed_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.url)?)
    }

    /// Check the configuration before first use
    pub fn validate(&self) -> Result<()> {
        self.parsed_url()?;

        if self.fetch_timeout.is_zero() {
            return Err(Error::Config("fetch timeout must be non-zero".to_string()));
        }
        if self.health.outage_threshold <= chrono::TimeDelta::zero() {
            return Err(Error::Config(
                "outage threshold must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_defaults() {
        let config = CoordinatorConfig::default();

        assert_eq!(config.name, "ctgpdx");
        assert_eq!(config.url, "https://www.ctgpdx.com/download");
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.health.outage_threshold, TimeDelta::hours(24));
        assert!(config.validate().is_ok());
        assert_eq!(
            config.parsed_url().unwrap().host_str(),
            Some("www.ctgpdx.com")
        );
    }

    #[test]
    fn test_builder() {
        let config = CoordinatorConfig::builder()
            .name("mirror")
            .url("https://mirror.example.com/download")
            .fetch_timeout(Duration::from_secs(3))
            .build();

        assert_eq!(config.name, "mirror");
        assert_eq!(config.url, "https://mirror.example.com/download");
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_url = CoordinatorConfig::builder().url("not a url").build();
        assert!(matches!(bad_url.validate(), Err(Error::Config(_))));

        let zero_timeout = CoordinatorConfig::builder()
            .fetch_timeout(Duration::ZERO)
            .build();
        assert!(matches!(zero_timeout.validate(), Err(Error::Config(_))));

        let zero_window = CoordinatorConfig::builder()
            .health(
                HealthConfig::builder()
                    .outage_threshold(TimeDelta::zero())
                    .build(),
            )
            .build();
        assert!(matches!(zero_window.validate(), Err(Error::Config(_))));
    }
}
