use serde::{Deserialize, Serialize};
use std::env;

use crate::errors::CoreError;

/// Environment variable holding the stock-quote endpoint URL.
pub const ENV_STOCKS_API_URL: &str = "FINCOACH_STOCKS_API_URL";

/// Environment variable holding the review/demo override identity.
pub const ENV_REVIEW_IDENTITY: &str = "FINCOACH_REVIEW_IDENTITY";

/// Environment variable overriding the savings target.
pub const ENV_SAVINGS_TARGET: &str = "FINCOACH_SAVINGS_TARGET";

/// Savings target (currency units) used when none is configured.
pub const DEFAULT_SAVINGS_TARGET: f64 = 10_000.0;

/// Injected configuration for a session.
///
/// Components receive these values through the session constructor —
/// nothing in the core reads the environment ad hoc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Base URL of the stock-quote endpoint.
    pub stocks_api_url: String,

    /// Identity granted investing access regardless of savings progress
    /// (operational bypass for demo/review accounts). Compared for
    /// exact equality, never as a pattern.
    pub review_identity: Option<String>,

    /// Savings target that gates the investing feature.
    pub savings_target: f64,
}

impl CoreConfig {
    pub fn new(stocks_api_url: impl Into<String>) -> Self {
        Self {
            stocks_api_url: stocks_api_url.into(),
            review_identity: None,
            savings_target: DEFAULT_SAVINGS_TARGET,
        }
    }

    /// Set the override identity.
    #[must_use]
    pub fn with_review_identity(mut self, identity: impl Into<String>) -> Self {
        self.review_identity = Some(identity.into());
        self
    }

    /// Set the savings target. Must be a positive finite amount.
    #[must_use]
    pub fn with_savings_target(mut self, target: f64) -> Self {
        self.savings_target = target;
        self
    }

    /// Build the configuration from environment variables.
    ///
    /// `FINCOACH_STOCKS_API_URL` is required; `FINCOACH_REVIEW_IDENTITY`
    /// and `FINCOACH_SAVINGS_TARGET` are optional.
    pub fn from_env() -> Result<Self, CoreError> {
        let stocks_api_url = env::var(ENV_STOCKS_API_URL)
            .map_err(|_| CoreError::Config(format!("{ENV_STOCKS_API_URL} is not set")))?;
        if stocks_api_url.trim().is_empty() {
            return Err(CoreError::Config(format!("{ENV_STOCKS_API_URL} is empty")));
        }

        let review_identity = env::var(ENV_REVIEW_IDENTITY)
            .ok()
            .filter(|v| !v.trim().is_empty());

        let savings_target = match env::var(ENV_SAVINGS_TARGET) {
            Ok(raw) => {
                let target: f64 = raw.trim().parse().map_err(|_| {
                    CoreError::Config(format!("{ENV_SAVINGS_TARGET} is not a number: '{raw}'"))
                })?;
                if !target.is_finite() || target <= 0.0 {
                    return Err(CoreError::Config(format!(
                        "{ENV_SAVINGS_TARGET} must be a positive amount, got {target}"
                    )));
                }
                target
            }
            Err(_) => DEFAULT_SAVINGS_TARGET,
        };

        Ok(Self {
            stocks_api_url,
            review_identity,
            savings_target,
        })
    }
}
