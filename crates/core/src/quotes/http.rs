use async_trait::async_trait;
use reqwest::Client;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::source::QuoteSource;
use crate::errors::CoreError;
use crate::models::quote::{Quote, QuoteQuery};

/// Quote source backed by the configured HTTP endpoint.
///
/// The endpoint takes `market`, `sector`, `orderby`, `pageSize` and
/// `pageNo` query parameters and returns a JSON array of quote
/// records. Any non-2xx response is a hard failure.
pub struct HttpQuoteSource {
    client: Client,
    endpoint: String,
}

impl HttpQuoteSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            endpoint: endpoint.into(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl QuoteSource for HttpQuoteSource {
    fn name(&self) -> &str {
        "StocksApi"
    }

    async fn fetch(&self, query: &QuoteQuery) -> Result<Vec<Quote>, CoreError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("market", query.market.as_str()),
                ("sector", query.sector.as_str()),
                ("orderby", query.order_by.as_param()),
                ("pageSize", &query.page_size.to_string()),
                ("pageNo", &query.page_no.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::QuoteFetch(format!(
                "{} returned HTTP {status}",
                self.name()
            )));
        }

        let quotes: Vec<Quote> = response.json().await.map_err(|e| {
            CoreError::QuoteFetch(format!("failed to parse quote payload: {e}"))
        })?;

        // Validate on ingestion so malformed feed data never reaches
        // the ledger: close prices must be finite and non-negative.
        for quote in &quotes {
            if !quote.close.is_finite() || quote.close < 0.0 {
                return Err(CoreError::QuoteFetch(format!(
                    "invalid close price {} for {}",
                    quote.close, quote.symbol
                )));
            }
        }

        Ok(quotes)
    }
}
