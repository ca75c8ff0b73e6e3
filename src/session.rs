//! Search session: the transient state behind the forecast screen
//!
//! A search sets the loading flag, fetches the forecast, normalizes it and
//! stores either the daily forecasts or a single error line. Every search
//! takes a sequence number; only the most recently issued search may write
//! its outcome, so a slow earlier response can never overwrite a later one.

use crate::api::ForecastSource;
use crate::models::DailyForecast;
use crate::normalizer::ForecastNormalizer;
use crate::Result;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, instrument};

/// Snapshot of what the screen shows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    /// A search is in flight
    pub loading: bool,
    /// User-facing error from the last search
    pub error: Option<String>,
    /// Daily forecasts from the last successful search
    pub forecasts: Vec<DailyForecast>,
}

/// What happened to a call to [`SearchSession::search`]
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// City was blank, nothing was requested
    Skipped,
    /// The result (success or error) was written to the state; carries
    /// the state exactly as this search left it
    Applied(SearchState),
    /// A newer search was issued meanwhile; the result was dropped
    Stale,
}

#[derive(Debug, Default)]
struct Inner {
    state: SearchState,
    latest: u64,
}

/// Owns the screen state and drives searches against a [`ForecastSource`]
pub struct SearchSession {
    source: Arc<dyn ForecastSource>,
    inner: Mutex<Inner>,
}

impl SearchSession {
    pub fn new(source: Arc<dyn ForecastSource>) -> Self {
        Self {
            source,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Clone of the current state for rendering
    #[must_use]
    pub fn snapshot(&self) -> SearchState {
        self.lock().state.clone()
    }

    /// Run one search action for `city`
    #[instrument(skip(self))]
    pub async fn search(&self, city: &str) -> SearchOutcome {
        let city = city.trim();
        if city.is_empty() {
            debug!("Ignoring search for blank city");
            return SearchOutcome::Skipped;
        }

        let guard = self.begin();
        debug!("Search #{} started", guard.ticket);

        let result = self.fetch_daily(city).await;

        let mut inner = self.lock();
        if inner.latest != guard.ticket {
            debug!(
                "Dropping stale result of search #{} (latest is #{})",
                guard.ticket, inner.latest
            );
            return SearchOutcome::Stale;
        }

        match result {
            Ok(forecasts) => {
                info!("Showing {} days for '{}'", forecasts.len(), city);
                inner.state.forecasts = forecasts;
            }
            Err(e) => {
                error!("Fetch error for '{}': {}", city, e);
                inner.state.error = Some(e.user_message());
                inner.state.forecasts.clear();
            }
        }
        inner.state.loading = false;
        SearchOutcome::Applied(inner.state.clone())
    }

    async fn fetch_daily(&self, city: &str) -> Result<Vec<DailyForecast>> {
        let response = self.source.fetch_forecast(city).await?;
        ForecastNormalizer::normalize(&response.list)
    }

    /// Issue a new sequence number and reset the state for it
    fn begin(&self) -> LoadingGuard<'_> {
        let mut inner = self.lock();
        inner.latest += 1;
        inner.state.loading = true;
        inner.state.error = None;
        inner.state.forecasts.clear();
        LoadingGuard {
            session: self,
            ticket: inner.latest,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the loading flag when a search ends, however it ends
struct LoadingGuard<'a> {
    session: &'a SearchSession,
    ticket: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.session.lock();
        // A newer search owns the flag now.
        if inner.latest == self.ticket {
            inner.state.loading = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ForecastError;
    use crate::models::{ForecastResponse, MainReadings, RawForecastEntry};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    #[derive(Clone)]
    enum Reply {
        Days(Vec<&'static str>),
        Status(u16),
        Network(&'static str),
        Malformed,
    }

    /// Answers per city after an optional delay
    #[derive(Default)]
    struct StubSource {
        replies: HashMap<&'static str, (Duration, Reply)>,
    }

    impl StubSource {
        fn with(mut self, city: &'static str, delay_ms: u64, reply: Reply) -> Self {
            self.replies
                .insert(city, (Duration::from_millis(delay_ms), reply));
            self
        }
    }

    fn readings(base: f64) -> MainReadings {
        MainReadings {
            temp_min: base,
            temp_max: base + 2.0,
            pressure: 1012.0,
            humidity: 55.0,
        }
    }

    #[async_trait]
    impl ForecastSource for StubSource {
        async fn fetch_forecast(&self, city: &str) -> Result<ForecastResponse> {
            let (delay, reply) = self
                .replies
                .get(city)
                .cloned()
                .unwrap_or((Duration::ZERO, Reply::Status(404)));
            tokio::time::sleep(delay).await;
            match reply {
                Reply::Days(dates) => Ok(ForecastResponse {
                    list: dates
                        .iter()
                        .enumerate()
                        .map(|(i, date)| {
                            RawForecastEntry::new(format!("{date} 00:00:00"), readings(270.0 + i as f64))
                        })
                        .collect(),
                }),
                Reply::Status(status) => Err(ForecastError::HttpStatus { status }),
                Reply::Network(message) => Err(ForecastError::network(message)),
                Reply::Malformed => Ok(ForecastResponse {
                    list: vec![RawForecastEntry::new("no-space", readings(0.0))],
                }),
            }
        }
    }

    fn session(source: StubSource) -> SearchSession {
        SearchSession::new(Arc::new(source))
    }

    #[tokio::test]
    async fn test_successful_search() {
        let session = session(
            StubSource::default().with("Oslo", 0, Reply::Days(vec!["2024-05-01", "2024-05-02"])),
        );

        let outcome = session.search("Oslo").await;
        assert!(matches!(outcome, SearchOutcome::Applied(_)));

        let state = session.snapshot();
        assert_eq!(outcome, SearchOutcome::Applied(state.clone()));
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.forecasts.len(), 2);
        assert_eq!(state.forecasts[0].date, "2024-05-01");
    }

    #[tokio::test]
    async fn test_http_500_sets_error_and_clears_loading() {
        let session = session(StubSource::default().with("Oslo", 0, Reply::Status(500)));

        assert!(matches!(
            session.search("Oslo").await,
            SearchOutcome::Applied(_)
        ));

        let state = session.snapshot();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Network response was not ok"));
        assert!(state.forecasts.is_empty());
    }

    #[tokio::test]
    async fn test_network_error_message_is_verbatim() {
        let session = session(
            StubSource::default().with("Oslo", 0, Reply::Network("error sending request")),
        );
        session.search("Oslo").await;
        assert_eq!(
            session.snapshot().error.as_deref(),
            Some("error sending request")
        );
    }

    #[tokio::test]
    async fn test_malformed_payload_fails_whole_search() {
        let session = session(StubSource::default().with("Oslo", 0, Reply::Malformed));
        session.search("Oslo").await;

        let state = session.snapshot();
        assert!(state.error.is_some());
        assert!(state.forecasts.is_empty());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_blank_city_is_skipped() {
        let session = session(StubSource::default());
        assert_eq!(session.search("   ").await, SearchOutcome::Skipped);
        assert_eq!(session.snapshot(), SearchState::default());
    }

    #[tokio::test]
    async fn test_new_search_discards_previous_results() {
        let session = session(
            StubSource::default()
                .with("Oslo", 0, Reply::Days(vec!["2024-05-01"]))
                .with("Bergen", 0, Reply::Status(503)),
        );

        session.search("Oslo").await;
        assert_eq!(session.snapshot().forecasts.len(), 1);

        session.search("Bergen").await;
        let state = session.snapshot();
        assert!(state.forecasts.is_empty());
        assert!(state.error.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_does_not_overwrite_newer_one() {
        let session = session(
            StubSource::default()
                .with("Slow", 500, Reply::Days(vec!["2024-01-01", "2024-01-02", "2024-01-03"]))
                .with("Fast", 10, Reply::Days(vec!["2024-06-01"])),
        );

        let (slow, fast) = tokio::join!(session.search("Slow"), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            session.search("Fast").await
        });

        assert_eq!(slow, SearchOutcome::Stale);
        assert!(matches!(fast, SearchOutcome::Applied(_)));

        let state = session.snapshot();
        assert!(!state.loading);
        assert_eq!(state.forecasts.len(), 1);
        assert_eq!(state.forecasts[0].date, "2024-06-01");
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_stays_set_while_newer_search_is_pending() {
        let session = session(
            StubSource::default()
                .with("First", 10, Reply::Days(vec!["2024-01-01"]))
                .with("Second", 500, Reply::Days(vec!["2024-06-01"])),
        );

        let (first, _) = tokio::join!(
            async {
                let outcome = session.search("First").await;
                (outcome, session.snapshot())
            },
            async {
                tokio::time::sleep(Duration::from_millis(1)).await;
                session.search("Second").await
            }
        );

        let (outcome, state_after_first) = first;
        assert_eq!(outcome, SearchOutcome::Stale);
        assert!(state_after_first.loading);
        assert!(!session.snapshot().loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_applied_state_is_unaffected_by_next_search() {
        let session = Arc::new(session(
            StubSource::default()
                .with("Oslo", 0, Reply::Days(vec!["2024-05-01"]))
                .with("Bergen", 500, Reply::Days(vec!["2024-07-01", "2024-07-02"])),
        ));

        let outcome = session.search("Oslo").await;

        let next = Arc::clone(&session);
        let bergen = tokio::spawn(async move { next.search("Bergen").await });
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(1)).await;

        // The live state now belongs to the pending Bergen search.
        let live = session.snapshot();
        assert!(live.loading);
        assert!(live.forecasts.is_empty());

        let SearchOutcome::Applied(state) = outcome else {
            panic!("expected the Oslo search to be applied");
        };
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.forecasts.len(), 1);
        assert_eq!(state.forecasts[0].date, "2024-05-01");

        assert!(matches!(bergen.await.unwrap(), SearchOutcome::Applied(_)));
    }

    #[tokio::test]
    async fn test_applied_error_state() {
        let session = session(StubSource::default().with("Oslo", 0, Reply::Status(500)));

        let SearchOutcome::Applied(state) = session.search("Oslo").await else {
            panic!("expected the failed search to be applied");
        };
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Network response was not ok"));
        assert!(state.forecasts.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_search_clears_loading() {
        let session = session(StubSource::default().with("Slow", 10_000, Reply::Days(vec![])));

        let result =
            tokio::time::timeout(Duration::from_millis(100), session.search("Slow")).await;
        assert!(result.is_err());

        let state = session.snapshot();
        assert!(!state.loading);
        assert!(state.error.is_none());
    }
}
