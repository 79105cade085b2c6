//! Stats loading
//!
//! Performs the single fetch a dashboard makes when it is mounted and turns the
//! outcome into a terminal [`LoadState`].

use crate::events::{Event, EventType};
use crate::graphql::StatsSource;
use crate::graphql::error::FetchError;
use crate::logging::LogLevel;
use crate::model::DatasetSnapshot;
use log::debug;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// What the dashboard shows. Exactly one applies at any time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    /// User-visible error message.
    Failed(String),
    /// The endpoint answered without data.
    Empty,
    Ready(Arc<DatasetSnapshot>),
}

impl LoadState {
    pub fn from_outcome(outcome: Result<Option<DatasetSnapshot>, FetchError>) -> Self {
        match outcome {
            Ok(Some(snapshot)) => LoadState::Ready(Arc::new(snapshot)),
            Ok(None) => LoadState::Empty,
            Err(e) => LoadState::Failed(e.user_message()),
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, LoadState::Loading)
    }

    /// Move out of `Loading`. Once resolved the state is final, so later
    /// resolutions are ignored and `false` is returned.
    pub fn resolve(&mut self, next: LoadState) -> bool {
        if self.is_resolved() || !next.is_resolved() {
            return false;
        }
        *self = next;
        true
    }

    pub fn snapshot(&self) -> Option<&Arc<DatasetSnapshot>> {
        match self {
            LoadState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Messages from the loader task to the UI.
#[derive(Debug)]
pub enum LoaderMessage {
    Activity(Event),
    Resolved(LoadState),
}

/// Fetch once and describe the result.
pub async fn fetch_state(source: &dyn StatsSource) -> (LoadState, Event) {
    let outcome = source.fetch_snapshot().await;
    let event = match &outcome {
        Ok(Some(snapshot)) => Event::loader(
            format!(
                "Loaded {} transfer days, {} trait transfer days, {} holders",
                snapshot.daily_transfers.len(),
                snapshot.daily_trait_transfers.len(),
                snapshot.top_holders.len()
            ),
            EventType::Success,
            LogLevel::Info,
        ),
        Ok(None) => Event::loader(
            "Endpoint returned no data".to_string(),
            EventType::Error,
            LogLevel::Warn,
        ),
        Err(e) => Event::loader(
            format!("Failed to fetch collection stats: {}", e),
            EventType::Error,
            e.log_level(),
        ),
    };
    event.log();
    (LoadState::from_outcome(outcome), event)
}

/// Spawn the one-shot loader for a mounted dashboard.
///
/// If `shutdown` fires first the fetch is abandoned; if the UI has already
/// dropped its receiver the result is discarded.
pub fn spawn_loader(
    source: Box<dyn StatsSource>,
    sender: mpsc::Sender<LoaderMessage>,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let started = Event::loader(
            format!("Fetching collection stats from {}", source.describe()),
            EventType::Refresh,
            LogLevel::Info,
        );
        started.log();
        let _ = sender.send(LoaderMessage::Activity(started)).await;

        let (state, event) = tokio::select! {
            result = fetch_state(source.as_ref()) => result,
            _ = shutdown.recv() => {
                debug!("Shutdown before stats arrived; abandoning fetch");
                return;
            }
        };

        if sender.send(LoaderMessage::Activity(event)).await.is_err()
            || sender.send(LoaderMessage::Resolved(state)).await.is_err()
        {
            debug!("Dashboard closed; discarding loaded stats");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
    use crate::graphql::MockStatsSource;
    use crate::model::{HolderRecord, TimeSeriesPoint};
    use std::time::Duration;

    fn sample_snapshot() -> DatasetSnapshot {
        DatasetSnapshot::new(
            vec![TimeSeriesPoint::new(1000, 5), TimeSeriesPoint::new(2000, 9)],
            vec![TimeSeriesPoint::new(1000, 1)],
            vec![HolderRecord::new("0xA", 1_000_000)],
        )
    }

    fn mock_returning(
        outcome: fn() -> Result<Option<DatasetSnapshot>, FetchError>,
    ) -> MockStatsSource {
        let mut mock = MockStatsSource::new();
        mock.expect_describe()
            .returning(|| "mock://stats".to_string());
        mock.expect_fetch_snapshot().times(1).returning(outcome);
        mock
    }

    async fn collect(mut receiver: mpsc::Receiver<LoaderMessage>) -> Vec<LoaderMessage> {
        let mut messages = Vec::new();
        while let Some(message) = receiver.recv().await {
            messages.push(message);
        }
        messages
    }

    #[tokio::test]
    // The loader fetches exactly once and resolves to Ready.
    async fn test_loader_resolves_ready() {
        let mock = mock_returning(|| Ok(Some(sample_snapshot())));
        let (sender, receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
        let (shutdown_sender, _) = broadcast::channel(1);

        let handle = spawn_loader(Box::new(mock), sender, shutdown_sender.subscribe());
        handle.await.unwrap();

        let messages = collect(receiver).await;
        assert_eq!(messages.len(), 3);
        match &messages[0] {
            LoaderMessage::Activity(event) => {
                assert_eq!(event.event_type, EventType::Refresh);
                assert!(event.msg.contains("mock://stats"));
            }
            other => panic!("unexpected message: {other:?}"),
        }
        match &messages[2] {
            LoaderMessage::Resolved(LoadState::Ready(snapshot)) => {
                assert_eq!(**snapshot, sample_snapshot());
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_data_resolves_empty() {
        let mock = mock_returning(|| Ok(None));
        let (state, event) = fetch_state(&mock).await;
        assert_eq!(state, LoadState::Empty);
        assert_eq!(event.event_type, EventType::Error);
    }

    #[tokio::test]
    async fn test_fetch_error_resolves_failed() {
        let mock = mock_returning(|| {
            Err(FetchError::Http {
                status: 500,
                message: "down".to_string(),
            })
        });
        let (state, event) = fetch_state(&mock).await;
        assert_eq!(
            state,
            LoadState::Failed("Stats endpoint returned HTTP 500".to_string())
        );
        assert_eq!(event.log_level, LogLevel::Warn);
    }

    struct SlowSource;

    #[async_trait::async_trait]
    impl StatsSource for SlowSource {
        fn describe(&self) -> String {
            "slow".to_string()
        }

        async fn fetch_snapshot(&self) -> Result<Option<DatasetSnapshot>, FetchError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(None)
        }
    }

    #[tokio::test]
    // Tearing the dashboard down before the fetch completes drops the result.
    async fn test_shutdown_abandons_pending_fetch() {
        let (sender, receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
        let (shutdown_sender, _) = broadcast::channel(1);

        let handle = spawn_loader(Box::new(SlowSource), sender, shutdown_sender.subscribe());
        shutdown_sender.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();

        let messages = collect(receiver).await;
        assert!(
            messages
                .iter()
                .all(|m| !matches!(m, LoaderMessage::Resolved(_)))
        );
    }

    #[tokio::test]
    async fn test_closed_receiver_is_not_an_error() {
        let mock = mock_returning(|| Ok(Some(sample_snapshot())));
        let (sender, receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
        drop(receiver);
        let (shutdown_sender, _) = broadcast::channel(1);

        let handle = spawn_loader(Box::new(mock), sender, shutdown_sender.subscribe());
        assert!(handle.await.is_ok());
    }

    #[test]
    fn test_resolve_is_terminal() {
        let mut state = LoadState::default();
        assert!(!state.is_resolved());
        assert!(!state.resolve(LoadState::Loading));

        assert!(state.resolve(LoadState::Empty));
        assert!(!state.resolve(LoadState::Failed("late".to_string())));
        assert_eq!(state, LoadState::Empty);
        assert!(state.snapshot().is_none());
    }
}
