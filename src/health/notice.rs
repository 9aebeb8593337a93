//! Degraded-source notices and the notifier seam

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Severity attached to a repair issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Warning,
    Error,
}

/// The notice shown to the host while the source is degraded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairIssue {
    /// Namespace of the issue, e.g. "ctgpdx"
    pub domain: String,

    /// Stable issue key, e.g. "website_change"
    pub issue_id: String,

    pub severity: IssueSeverity,

    /// Whether the host can offer an automatic fix
    pub is_fixable: bool,

    /// Where users can read about the problem
    pub learn_more_url: Option<String>,
}

/// Host capability for raising and clearing notices
///
/// Both calls are fire-and-forget and must be safe to repeat.
pub trait IssueNotifier {
    /// Show the notice
    fn raise(&self, issue: &RepairIssue);

    /// Remove the notice; a no-op when it was never raised
    fn clear(&self, issue: &RepairIssue);
}

impl<N: IssueNotifier + ?Sized> IssueNotifier for Arc<N> {
    fn raise(&self, issue: &RepairIssue) {
        (**self).raise(issue)
    }

    fn clear(&self, issue: &RepairIssue) {
        (**self).clear(issue)
    }
}

impl<N: IssueNotifier + ?Sized> IssueNotifier for &N {
    fn raise(&self, issue: &RepairIssue) {
        (**self).raise(issue)
    }

    fn clear(&self, issue: &RepairIssue) {
        (**self).clear(issue)
    }
}

/// Notifier that only writes to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl IssueNotifier for LogNotifier {
    fn raise(&self, issue: &RepairIssue) {
        warn!(
            domain = %issue.domain,
            issue_id = %issue.issue_id,
            severity = ?issue.severity,
            learn_more_url = issue.learn_more_url.as_deref().unwrap_or(""),
            "Source degraded: no successful update within the outage window"
        );
    }

    fn clear(&self, issue: &RepairIssue) {
        info!(
            domain = %issue.domain,
            issue_id = %issue.issue_id,
            "Source recovered, notice cleared"
        );
    }
}
