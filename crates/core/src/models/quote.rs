use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordering presets understood by the quote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteOrdering {
    /// Largest percent gain first
    TopGainers,
    /// Largest percent loss first
    TopLosers,
    /// Highest traded volume first
    MostActive,
}

impl QuoteOrdering {
    /// Wire value for the `orderby` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            QuoteOrdering::TopGainers => "TopGainers",
            QuoteOrdering::TopLosers => "TopLosers",
            QuoteOrdering::MostActive => "MostActive",
        }
    }
}

impl std::fmt::Display for QuoteOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

/// A point-in-time market snapshot for one tradable symbol.
///
/// Field names map to the upstream feed's JSON keys. Quotes are
/// immutable once fetched — a newer quote for the same symbol
/// supersedes the old one, it never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Numeric id assigned by the feed
    #[serde(rename = "Id")]
    pub id: i64,

    /// Ticker symbol (e.g., "COMI")
    #[serde(rename = "Symbol")]
    pub symbol: String,

    /// Full company name
    #[serde(rename = "Company2")]
    pub company: String,

    /// Market classification
    #[serde(rename = "Market")]
    pub market: String,

    /// Sector classification
    #[serde(rename = "Sector")]
    pub sector: String,

    /// Previous session's closing price
    #[serde(rename = "PrevClosingPrice")]
    pub prev_close: f64,

    #[serde(rename = "OpeningPrice")]
    pub open: f64,

    #[serde(rename = "HighPrice")]
    pub high: f64,

    #[serde(rename = "LowPrice")]
    pub low: f64,

    /// Latest close — the price all buy costs are computed from
    #[serde(rename = "ClosePrice")]
    pub close: f64,

    /// Absolute change vs. the previous close
    #[serde(rename = "Change")]
    pub change: f64,

    /// Percent change vs. the previous close
    #[serde(rename = "PercChange")]
    pub percent_change: f64,

    /// Number of trades in the session
    #[serde(rename = "Trades")]
    pub trades: u64,

    /// Shares traded in the session
    #[serde(rename = "Volume")]
    pub volume: f64,

    /// Currency value traded in the session
    #[serde(rename = "Value")]
    pub value: f64,

    /// Trading date, as reported by the feed
    #[serde(rename = "TradeDate")]
    pub trade_date: String,
}

/// Signature of one quote request. Two requests with an identical
/// signature share one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteQuery {
    /// Market filter, empty for all markets
    pub market: String,
    /// Sector filter, empty for all sectors
    pub sector: String,
    pub order_by: QuoteOrdering,
    pub page_size: u32,
    pub page_no: u32,
}

impl QuoteQuery {
    pub fn new(
        market: impl Into<String>,
        sector: impl Into<String>,
        order_by: QuoteOrdering,
        page_size: u32,
        page_no: u32,
    ) -> Self {
        Self {
            market: market.into(),
            sector: sector.into(),
            order_by,
            page_size,
            page_no,
        }
    }

    // ── Convenience presets over the same fetch path ────────────────

    pub fn top_gainers() -> Self {
        Self::new("", "", QuoteOrdering::TopGainers, 10, 0)
    }

    pub fn top_losers() -> Self {
        Self::new("", "", QuoteOrdering::TopLosers, 10, 0)
    }

    pub fn most_active() -> Self {
        Self::new("", "", QuoteOrdering::MostActive, 10, 0)
    }
}

impl Default for QuoteQuery {
    fn default() -> Self {
        Self::new("", "", QuoteOrdering::TopGainers, 20, 0)
    }
}

/// A fetched page of quotes plus the moment it was (re)fetched.
/// When served from cache, `last_updated` is the original fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBatch {
    pub quotes: Vec<Quote>,
    pub last_updated: DateTime<Utc>,
}
