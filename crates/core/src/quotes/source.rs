use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::quote::{Quote, QuoteQuery};

/// Trait abstraction over the external quote feed.
///
/// The HTTP implementation talks to the configured endpoint; tests
/// substitute counting or failing sources. If the feed changes, only
/// the one implementation is touched.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait QuoteSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch one page of quotes for the given query.
    /// An ordered sequence, as ranked by the feed.
    async fn fetch(&self, query: &QuoteQuery) -> Result<Vec<Quote>, CoreError>;
}
