//! Fixed identifiers and defaults for the CTGP Deluxe download page tracker.

use std::time::Duration;

/// Domain used to namespace repair issues raised to the host
pub const DOMAIN: &str = "ctgpdx";

/// Page the tracker reads
pub const URL: &str = "https://www.ctgpdx.com/download";

/// How often the host is expected to refresh; scheduling itself is external
pub const UPDATE_INTERVAL: Duration = Duration::from_secs(6 * 60 * 60);

/// Upper bound on a single fetch
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Continuous failure window after which the degraded notice is raised
pub const OUTAGE_THRESHOLD_HOURS: i64 = 24;

/// Issue key for the degraded-source notice
pub const ISSUE_WEBSITE_CHANGE: &str = "website_change";

/// Where users are pointed when the notice is raised
pub const LEARN_MORE_URL: &str = "https://github.com/FaserF/ha-ctgpdx/issues";
