//! # Update Coordinator Module
//!
//! Runs one update cycle for a tracked download page:
//!
//! 1. fetch the raw document from a [`PageSource`], bounded by a timeout
//! 2. normalize it to plain text
//! 3. extract fields
//! 4. report the outcome to the [`HealthTracker`]
//!
//! The last good result is kept across failures so consumers can keep
//! showing stale values instead of blanking them. Scheduling is left to the
//! caller; there is no retry loop here.

mod config;
mod error;
mod source;

pub use config::{CoordinatorConfig, CoordinatorConfigBuilder};
pub use error::{FetchError, UpdateError};
pub use source::{FileSource, PageSource, StaticSource};

use chrono::{DateTime, Utc};
use tracing::{debug, error, instrument, warn};

use crate::extract::{ExtractionResult, Extractor, normalize_html};
use crate::health::{HealthTracker, IssueNotifier};

/// Drives update cycles for one page
#[derive(Debug)]
pub struct UpdateCoordinator<S, N> {
    config: CoordinatorConfig,
    source: S,
    extractor: Extractor,
    health: HealthTracker<N>,
    data: Option<ExtractionResult>,
    last_update_success: bool,
}

impl<S: PageSource, N: IssueNotifier> UpdateCoordinator<S, N> {
    /// Create a coordinator with the default configuration
    pub fn new(source: S, notifier: N) -> Self {
        Self::with_config(CoordinatorConfig::default(), source, notifier)
    }

    /// Create a coordinator with a custom configuration
    pub fn with_config(config: CoordinatorConfig, source: S, notifier: N) -> Self {
        let health = HealthTracker::with_config(config.health.clone(), notifier);
        Self::with_health(config, source, health)
    }

    /// Create a coordinator around an existing health tracker
    pub fn with_health(config: CoordinatorConfig, source: S, health: HealthTracker<N>) -> Self {
        Self {
            config,
            source,
            extractor: Extractor::default(),
            health,
            data: None,
            last_update_success: false,
        }
    }

    /// Replace the extraction rules
    pub fn extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Last successful result, kept after later failures
    pub fn data(&self) -> Option<&ExtractionResult> {
        self.data.as_ref()
    }

    /// Whether the most recent cycle succeeded
    pub fn last_update_success(&self) -> bool {
        self.last_update_success
    }

    pub fn health(&self) -> &HealthTracker<N> {
        &self.health
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one update cycle
    pub async fn refresh(&mut self) -> Result<ExtractionResult, UpdateError> {
        let outcome = self.fetch_and_extract().await;
        self.apply(outcome, Utc::now())
    }

    /// Run one update cycle, recording the outcome at `now`
    pub async fn refresh_at(&mut self, now: DateTime<Utc>) -> Result<ExtractionResult, UpdateError> {
        let outcome = self.fetch_and_extract().await;
        self.apply(outcome, now)
    }

    #[instrument(skip(self), fields(name = %self.config.name, source = %self.source.location()))]
    async fn fetch_and_extract(&self) -> Result<ExtractionResult, UpdateError> {
        let timeout = self.config.fetch_timeout;

        let html = match tokio::time::timeout(timeout, self.source.fetch()).await {
            Ok(Ok(html)) => html,
            Ok(Err(e)) => {
                error!("Error communicating with {}: {}", self.config.url, e);
                return Err(UpdateError::Fetch(e));
            }
            Err(_) => {
                error!("Fetching {} timed out after {:?}", self.config.url, timeout);
                return Err(UpdateError::Fetch(FetchError::Timeout(timeout)));
            }
        };

        let text = normalize_html(&html);
        debug!("Normalized page to {} characters", text.len());

        self.extractor.extract(&text).map_err(|e| {
            error!("Error parsing {}: {}", self.config.url, e);
            UpdateError::Parse(e)
        })
    }

    fn apply(
        &mut self,
        outcome: Result<ExtractionResult, UpdateError>,
        now: DateTime<Utc>,
    ) -> Result<ExtractionResult, UpdateError> {
        match outcome {
            Ok(result) => {
                self.health.record_success_at(now);
                self.last_update_success = true;

                if result.version().is_none() {
                    warn!("Version not found, but extracted other data: {:?}", result);
                }
                debug!("Successfully fetched CTGP-DX data: {:?}", result);

                self.data = Some(result.clone());
                Ok(result)
            }
            Err(err) => {
                self.health.record_failure_at(now);
                self.last_update_success = false;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{ExtractError, Field};
    use crate::health::testing::{NoticeCall, RecordingNotifier};
    use crate::health::{HealthConfig, HealthStatus, LogNotifier};
    use chrono::TimeDelta;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const SAMPLE_PAGE: &str = r#"
    <html>
        <body>
            <h1>Download</h1>
            <p>Version: 1.1.1</p>
            <p>Download size: 3.86 GB</p>
            <p>Unpacked size: 4.52 GB</p>
            <h3>v1.1.1 - March 23rd, 2025</h3>
        </body>
    </html>
    "#;

    /// Replays a fixed sequence of fetch outcomes
    #[derive(Default)]
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<String, FetchError>>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<String, FetchError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    impl PageSource for ScriptedSource {
        async fn fetch(&self) -> Result<String, FetchError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Transport("no more responses".to_string())))
        }

        fn location(&self) -> String {
            "scripted".to_string()
        }
    }

    struct SlowSource(Duration);

    impl PageSource for SlowSource {
        async fn fetch(&self) -> Result<String, FetchError> {
            tokio::time::sleep(self.0).await;
            Ok(SAMPLE_PAGE.to_string())
        }

        fn location(&self) -> String {
            "slow".to_string()
        }
    }

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-23T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn transport_error() -> Result<String, FetchError> {
        Err(FetchError::Transport("Connection failed".to_string()))
    }

    fn coordinator(
        responses: Vec<Result<String, FetchError>>,
    ) -> (
        UpdateCoordinator<ScriptedSource, Arc<RecordingNotifier>>,
        Arc<RecordingNotifier>,
    ) {
        let recorder = Arc::new(RecordingNotifier::default());
        let health = HealthTracker::starting_at(HealthConfig::default(), recorder.clone(), t0());
        let coordinator = UpdateCoordinator::with_health(
            CoordinatorConfig::default(),
            ScriptedSource::new(responses),
            health,
        );
        (coordinator, recorder)
    }

    #[tokio::test]
    async fn test_refresh_extracts_all_fields() {
        let mut coordinator = UpdateCoordinator::new(StaticSource::new(SAMPLE_PAGE), LogNotifier);

        let data = coordinator.refresh().await.unwrap();

        assert_eq!(data.get(Field::Version), Some("1.1.1"));
        assert_eq!(data.get(Field::DownloadSize), Some("3.86 GB"));
        assert_eq!(data.get(Field::UnpackedSize), Some("4.52 GB"));
        assert_eq!(data.get(Field::ReleaseDate), Some("March 23rd, 2025"));
        assert_eq!(coordinator.data(), Some(&data));
        assert!(coordinator.last_update_success());
    }

    #[tokio::test]
    async fn test_fetch_error_keeps_stale_data() {
        let (mut coordinator, recorder) =
            coordinator(vec![Ok(SAMPLE_PAGE.to_string()), transport_error()]);

        let first = coordinator.refresh_at(t0() + TimeDelta::hours(6)).await.unwrap();
        let err = coordinator
            .refresh_at(t0() + TimeDelta::hours(12))
            .await
            .unwrap_err();

        assert!(err.is_fetch());
        assert!(err.to_string().starts_with("Error communicating with CTGP-DX server"));
        assert_eq!(coordinator.data(), Some(&first));
        assert!(!coordinator.last_update_success());
        assert_eq!(coordinator.health().last_success(), t0() + TimeDelta::hours(6));
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unrecognized_page_is_parse_failure() {
        let (mut coordinator, _) =
            coordinator(vec![Ok("<html><body><p>Welcome!</p></body></html>".to_string())]);

        let err = coordinator.refresh_at(t0()).await.unwrap_err();

        assert!(matches!(err, UpdateError::Parse(ExtractError::NoFields)));
        assert!(coordinator.data().is_none());
    }

    #[tokio::test]
    async fn test_partial_result_is_success() {
        let (mut coordinator, _) =
            coordinator(vec![Ok("<p>Download size: 3.86 GB</p>".to_string())]);

        let data = coordinator.refresh_at(t0() + TimeDelta::hours(1)).await.unwrap();

        assert_eq!(data.version(), None);
        assert_eq!(data.download_size(), Some("3.86 GB"));
        assert_eq!(coordinator.health().last_success(), t0() + TimeDelta::hours(1));
    }

    #[tokio::test]
    async fn test_sustained_outage_raises_and_recovery_clears() {
        let (mut coordinator, recorder) = coordinator(vec![
            transport_error(),
            Ok("<p>Welcome!</p>".to_string()),
            Ok(SAMPLE_PAGE.to_string()),
        ]);

        assert!(coordinator.refresh_at(t0() + TimeDelta::hours(25)).await.is_err());
        assert_eq!(coordinator.health().status(), HealthStatus::Degraded);

        // parse failures take the same path and do not raise again
        let err = coordinator
            .refresh_at(t0() + TimeDelta::hours(26))
            .await
            .unwrap_err();
        assert!(err.is_parse());
        assert_eq!(recorder.raised(), 1);

        coordinator.refresh_at(t0() + TimeDelta::hours(27)).await.unwrap();
        assert_eq!(coordinator.health().status(), HealthStatus::Healthy);
        assert_eq!(coordinator.health().last_success(), t0() + TimeDelta::hours(27));
        assert_eq!(
            recorder.calls(),
            vec![
                NoticeCall::Raise("website_change".to_string()),
                NoticeCall::Clear("website_change".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_slow_fetch_times_out() {
        let config = CoordinatorConfig::builder()
            .fetch_timeout(Duration::from_millis(10))
            .build();
        let mut coordinator = UpdateCoordinator::with_config(
            config,
            SlowSource(Duration::from_secs(5)),
            LogNotifier,
        );

        let err = coordinator.refresh().await.unwrap_err();

        assert!(matches!(
            err,
            UpdateError::Fetch(FetchError::Timeout(d)) if d == Duration::from_millis(10)
        ));
        assert!(!coordinator.last_update_success());
    }

    #[tokio::test]
    async fn test_custom_extractor() {
        use crate::extract::{DEFAULT_RULES, Extractor};

        let rules = DEFAULT_RULES
            .iter()
            .copied()
            .filter(|rule| rule.field() == Field::Version)
            .collect();
        let mut coordinator = UpdateCoordinator::new(StaticSource::new(SAMPLE_PAGE), LogNotifier)
            .extractor(Extractor::with_rules(rules));

        let data = coordinator.refresh().await.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.version(), Some("1.1.1"));
    }
}
