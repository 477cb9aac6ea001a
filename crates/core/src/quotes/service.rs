use chrono::Utc;
use std::sync::Mutex;

use super::cache::QuoteCache;
use super::source::QuoteSource;
use crate::errors::CoreError;
use crate::models::quote::{QuoteBatch, QuoteQuery};

/// Fetches quote pages from the configured source with a short-lived
/// cache in front.
///
/// Cache strategy:
/// - An entry younger than 30 seconds is returned as-is, no network.
/// - Anything older (or missing) goes to the source; on success the
///   entry is replaced wholesale with a new timestamp.
/// - A source failure propagates unchanged: no stale fallback, and the
///   existing entry is left untouched.
///
/// The cache sits behind a `Mutex` so one service can be shared with a
/// background refresher. Two concurrent misses may both fetch; the
/// later response overwrites the entry (last writer wins, acceptable
/// for this feed).
pub struct QuoteService {
    source: Box<dyn QuoteSource>,
    cache: Mutex<QuoteCache>,
}

impl QuoteService {
    pub fn new(source: Box<dyn QuoteSource>) -> Self {
        Self {
            source,
            cache: Mutex::new(QuoteCache::new()),
        }
    }

    /// Cached-or-network fetch for an arbitrary query.
    pub async fn fetch_quotes(&self, query: &QuoteQuery) -> Result<QuoteBatch, CoreError> {
        let now = Utc::now();
        {
            let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(entry) = cache.get_fresh(query, now) {
                log::debug!("quote cache hit for {}", query.order_by);
                return Ok(QuoteBatch {
                    quotes: entry.quotes.clone(),
                    last_updated: entry.fetched_at,
                });
            }
        }

        log::debug!(
            "quote cache miss for {}; fetching from {}",
            query.order_by,
            self.source.name()
        );
        let quotes = self.source.fetch(query).await?;
        let fetched_at = Utc::now();

        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.insert(query.clone(), quotes.clone(), fetched_at);

        Ok(QuoteBatch {
            quotes,
            last_updated: fetched_at,
        })
    }

    // ── Convenience views (fixed presets over the same path) ────────

    pub async fn top_gainers(&self) -> Result<QuoteBatch, CoreError> {
        self.fetch_quotes(&QuoteQuery::top_gainers()).await
    }

    pub async fn top_losers(&self) -> Result<QuoteBatch, CoreError> {
        self.fetch_quotes(&QuoteQuery::top_losers()).await
    }

    pub async fn most_active(&self) -> Result<QuoteBatch, CoreError> {
        self.fetch_quotes(&QuoteQuery::most_active()).await
    }

    // ── Cache management ────────────────────────────────────────────

    /// Unconditionally discard all cached entries.
    pub fn clear_cache(&self) {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Number of cached entries, fresh or stale.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether an entry (fresh or stale) exists for `query`.
    #[must_use]
    pub fn cache_contains(&self, query: &QuoteQuery) -> bool {
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(query)
    }
}
