use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::service::QuoteService;
use crate::models::quote::QuoteQuery;

/// Default cadence of the background refresh, matching the cache
/// freshness window.
pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(30);

/// Periodically re-runs one query so the cache entry the UI reads
/// stays warm.
///
/// The task is aborted when the refresher is dropped, so a torn-down
/// session can never keep fetching in the background. Refresh failures
/// are logged and the loop keeps going — the next user-initiated fetch
/// surfaces the error.
pub struct QuoteRefresher {
    handle: JoinHandle<()>,
}

impl QuoteRefresher {
    /// Spawn the refresh task on the current tokio runtime.
    #[must_use]
    pub fn spawn(service: Arc<QuoteService>, query: QuoteQuery, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick resolves immediately; skip it so the task
            // only re-fetches after a full period has elapsed.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = service.fetch_quotes(&query).await {
                    log::warn!("background quote refresh failed: {e}");
                }
            }
        });
        Self { handle }
    }

    /// Stop the background task. Also happens automatically on drop.
    pub fn stop(&self) {
        self.handle.abort();
    }

    /// Whether the task has exited (only after `stop` or runtime
    /// shutdown; the loop itself never returns).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for QuoteRefresher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
