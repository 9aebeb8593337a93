//! # Health Tracking Module
//!
//! Remembers when the page was last read successfully and raises a notice
//! to the host after a sustained outage.
//!
//! The tracker is a two-state machine:
//!
//! - `Healthy`: the initial state. Failures inside the outage window are
//!   silent.
//! - `Degraded`: entered on the first failure more than the outage window
//!   after the last success. Entering raises the notice once; later
//!   failures raise nothing.
//!
//! Any success returns to `Healthy` and records the success time. Leaving
//! `Degraded` clears the notice.
//!
//! Each tracked source owns its own tracker; nothing here is shared.

mod config;
mod notice;

pub use config::{HealthConfig, HealthConfigBuilder};
pub use notice::{IssueNotifier, IssueSeverity, LogNotifier, RepairIssue};

#[cfg(test)]
pub(crate) use notice::testing;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

/// Health of a tracked source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Tracks update outcomes for one source
#[derive(Debug)]
pub struct HealthTracker<N> {
    config: HealthConfig,
    notifier: N,
    last_success: DateTime<Utc>,
    status: HealthStatus,
}

impl<N: IssueNotifier> HealthTracker<N> {
    /// Create a tracker with the default configuration, starting now
    pub fn new(notifier: N) -> Self {
        Self::with_config(HealthConfig::default(), notifier)
    }

    /// Create a tracker with a custom configuration, starting now
    pub fn with_config(config: HealthConfig, notifier: N) -> Self {
        Self::starting_at(config, notifier, Utc::now())
    }

    /// Create a tracker whose last success is `started`
    ///
    /// No check has run yet, so the tracker optimistically counts its own
    /// start as a success.
    pub fn starting_at(config: HealthConfig, notifier: N, started: DateTime<Utc>) -> Self {
        Self {
            config,
            notifier,
            last_success: started,
            status: HealthStatus::Healthy,
        }
    }

    pub fn last_success(&self) -> DateTime<Utc> {
        self.last_success
    }

    pub fn status(&self) -> HealthStatus {
        self.status
    }

    pub fn is_degraded(&self) -> bool {
        self.status == HealthStatus::Degraded
    }

    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Whether more than the outage window has passed since the last success
    pub fn outage_exceeded(&self, now: DateTime<Utc>) -> bool {
        now - self.last_success > self.config.outage_threshold
    }

    /// Record a successful update now
    pub fn record_success(&mut self) {
        self.record_success_at(Utc::now());
    }

    /// Record a successful update at `now`
    #[instrument(skip(self), level = "debug")]
    pub fn record_success_at(&mut self, now: DateTime<Utc>) {
        self.last_success = now;

        if self.status == HealthStatus::Degraded {
            debug!("Leaving degraded state");
            self.status = HealthStatus::Healthy;
            self.notifier.clear(&self.config.issue());
        }
    }

    /// Record a failed update now
    pub fn record_failure(&mut self) {
        self.record_failure_at(Utc::now());
    }

    /// Record a failed update at `now`
    ///
    /// The last success time is left untouched.
    #[instrument(skip(self), level = "debug")]
    pub fn record_failure_at(&mut self, now: DateTime<Utc>) {
        if self.status == HealthStatus::Degraded {
            return;
        }

        if self.outage_exceeded(now) {
            debug!(
                last_success = %self.last_success,
                "Outage window exceeded, entering degraded state"
            );
            self.status = HealthStatus::Degraded;
            self.notifier.raise(&self.config.issue());
        }
    }
}
