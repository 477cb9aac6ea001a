use thiserror::Error;

/// Unified error type for the entire fincoach-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
///
/// Failures are never swallowed: every error reaches the caller as one
/// of these variants, each carrying a human-readable message.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Quotes / Network ────────────────────────────────────────────
    #[error("Quote fetch failed: {0}")]
    QuoteFetch(String),

    // ── External store ──────────────────────────────────────────────
    #[error("Store read failed: {0}")]
    StoreRead(String),

    #[error("Store write failed: {0}")]
    StoreWrite(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Insufficient virtual balance: need {required:.2}, have {available:.2}")]
    InsufficientBalance { required: f64, available: f64 },

    #[error("Validation failed: {0}")]
    Validation(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs.
        // reqwest errors often contain the full request URL.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::QuoteFetch(sanitized)
    }
}
