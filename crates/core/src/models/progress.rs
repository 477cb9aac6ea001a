use serde::{Deserialize, Serialize};

use super::holding::Holding;

/// Income/expense aggregates, recomputed in full from the transaction
/// set on every refresh — never accumulated incrementally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub total_income: f64,
    pub total_expenses: f64,

    /// `total_income - total_expenses` for the active period
    pub weekly_profit: f64,

    /// Distinguishes "no transactions at all" from "transactions that
    /// net to zero" — the two render differently upstream.
    pub has_data: bool,
}

/// Progress toward the savings target that unlocks investing.
///
/// Derived, never stored: `saved` is the non-negative part of the
/// weekly profit and `percentage` is capped to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsProgress {
    pub target: f64,
    pub saved: f64,
    pub percentage: f64,
}

/// Derived totals over a user's holdings.
///
/// Valuation is only as fresh as the read that produced it; there is
/// no continuous mark-to-market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub holdings: Vec<Holding>,

    /// `Σ shares * purchase_price`
    pub total_invested: f64,

    /// `Σ total_value`
    pub total_value: f64,

    /// `total_value - total_invested`
    pub total_profit: f64,
}
