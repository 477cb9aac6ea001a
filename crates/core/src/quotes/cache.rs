use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use crate::models::quote::{Quote, QuoteQuery};

/// How long a cache entry stays fresh, in seconds.
pub const FRESHNESS_WINDOW_SECS: i64 = 30;

/// One cached fetch result.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Ordered as returned by the feed
    pub quotes: Vec<Quote>,
    pub fetched_at: DateTime<Utc>,
}

/// In-memory cache of quote fetches, keyed by the exact query
/// signature.
///
/// Entries older than the freshness window are treated as absent and
/// replaced wholesale on the next fetch — never patched. Nothing here
/// survives a process restart.
///
/// Freshness checks take `now` as a parameter (the caller supplies the
/// clock), which keeps the cache deterministic under test.
#[derive(Debug, Default)]
pub struct QuoteCache {
    entries: HashMap<QuoteQuery, CacheEntry>,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entry for `query` if it is still fresh at `now`.
    pub fn get_fresh(&self, query: &QuoteQuery, now: DateTime<Utc>) -> Option<&CacheEntry> {
        let entry = self.entries.get(query)?;
        if now - entry.fetched_at < Duration::seconds(FRESHNESS_WINDOW_SECS) {
            Some(entry)
        } else {
            None
        }
    }

    /// Replace the entry for `query` wholesale.
    pub fn insert(&mut self, query: QuoteQuery, quotes: Vec<Quote>, fetched_at: DateTime<Utc>) {
        self.entries.insert(query, CacheEntry { quotes, fetched_at });
    }

    /// Whether any entry — fresh or stale — exists for `query`.
    /// A failed refresh leaves the previous entry in place.
    #[must_use]
    pub fn contains(&self, query: &QuoteQuery) -> bool {
        self.entries.contains_key(query)
    }

    /// Number of cached entries, fresh or stale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discard every entry; the next fetch always goes to the network.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
