//! # Health Tracker Configuration
//!
//! Identifiers for the degraded-source notice and the outage window after
//! which it is raised. Uses the same builder pattern as the coordinator
//! configuration.

use chrono::TimeDelta;

use crate::consts::{DOMAIN, ISSUE_WEBSITE_CHANGE, LEARN_MORE_URL, OUTAGE_THRESHOLD_HOURS};
use crate::health::notice::{IssueSeverity, RepairIssue};

/// Configuration for the health tracker
#[derive(Debug, Clone)]
pub struct HealthConfig {
    /// Continuous failure time after which the notice is raised
    pub outage_threshold: TimeDelta,

    /// Namespace of the notice
    pub domain: String,

    /// Key of the notice
    pub issue_id: String,

    pub severity: IssueSeverity,

    /// Reference link shown with the notice
    pub learn_more_url: Option<String>,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            outage_threshold: TimeDelta::hours(OUTAGE_THRESHOLD_HOURS),
            domain: DOMAIN.to_string(),
            issue_id: ISSUE_WEBSITE_CHANGE.to_string(),
            severity: IssueSeverity::Warning,
            learn_more_url: Some(LEARN_MORE_URL.to_string()),
        }
    }
}

/// Builder for HealthConfig
#[derive(Debug, Default)]
pub struct HealthConfigBuilder {
    config: HealthConfig,
}

impl HealthConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: HealthConfig::default(),
        }
    }

    /// Set the outage window
    pub fn outage_threshold(mut self, outage_threshold: TimeDelta) -> Self {
        self.config.outage_threshold = outage_threshold;
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.config.domain = domain.into();
        self
    }

    pub fn issue_id(mut self, issue_id: impl Into<String>) -> Self {
        self.config.issue_id = issue_id.into();
        self
    }

    pub fn severity(mut self, severity: IssueSeverity) -> Self {
        self.config.severity = severity;
        self
    }

    pub fn learn_more_url(mut self, learn_more_url: Option<String>) -> Self {
        self.config.learn_more_url = learn_more_url;
        self
    }

    /// Build the configuration
    pub fn build(self) -> HealthConfig {
        self.config
    }
}

impl HealthConfig {
    /// Create a new builder
    pub fn builder() -> HealthConfigBuilder {
        HealthConfigBuilder::new()
    }

    /// The notice raised and cleared by the tracker
    pub fn issue(&self) -> RepairIssue {
        RepairIssue {
            domain: self.domain.clone(),
            issue_id: self.issue_id.clone(),
            severity: self.severity,
            is_fixable: false,
            learn_more_url: self.learn_more_url.clone(),
        }
    }
}
