use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::balance::VirtualBalance;
use crate::errors::CoreError;
use crate::models::holding::{Holding, NewHolding};
use crate::models::progress::PortfolioSummary;
use crate::models::quote::Quote;
use crate::store::traits::PortfolioStore;

/// The simulated-trading ledger: buys, sells, and portfolio valuation
/// over the external `portfolio` table.
///
/// A holding moves `{nonexistent} --buy--> {held} --sell--> {nonexistent}`;
/// there is no partial-sell state.
pub struct InvestmentService {
    store: Arc<dyn PortfolioStore>,
}

impl InvestmentService {
    pub fn new(store: Arc<dyn PortfolioStore>) -> Self {
        Self { store }
    }

    /// Buy `shares` of `quote` at its close price.
    ///
    /// Fails with `InsufficientBalance` — leaving balance and holdings
    /// unchanged — when `shares * close` exceeds the balance. On
    /// success the new holding starts with purchase and current price
    /// both at the close, so profit/loss is zero, and the balance is
    /// debited by the full cost.
    pub async fn buy(
        &self,
        user_id: &str,
        quote: &Quote,
        shares: f64,
        balance: &mut VirtualBalance,
    ) -> Result<Holding, CoreError> {
        if !shares.is_finite() || shares <= 0.0 {
            return Err(CoreError::Validation(format!(
                "Share count must be positive, got {shares}"
            )));
        }

        let cost = quote.close * shares;
        if cost > balance.amount() {
            return Err(CoreError::InsufficientBalance {
                required: cost,
                available: balance.amount(),
            });
        }

        let holding = self
            .store
            .insert_holding(NewHolding {
                user_id: user_id.to_string(),
                symbol: quote.symbol.clone(),
                company_name: quote.company.clone(),
                shares,
                purchase_price: quote.close,
                current_price: quote.close,
                total_value: cost,
                profit_loss: 0.0,
                profit_loss_percent: 0.0,
                purchase_date: Utc::now(),
            })
            .await?;

        // Debit only after the write succeeded, so a failed insert
        // leaves the balance untouched.
        balance.debit(cost)?;

        log::info!(
            "bought {} {} at {} for {}",
            shares,
            quote.symbol,
            quote.close,
            user_id
        );
        Ok(holding)
    }

    /// Liquidate the holding `holding_id` entirely.
    ///
    /// The requested share count is accepted but ignored — the whole
    /// position is removed regardless, matching current product
    /// behavior — and no proceeds are credited back to the virtual
    /// balance. `NotFound` if the holding does not exist or belongs to
    /// another user.
    pub async fn sell(
        &self,
        user_id: &str,
        holding_id: Uuid,
        _shares: f64,
    ) -> Result<(), CoreError> {
        let holding = self.store.get_holding(holding_id).await?;
        if holding.user_id != user_id {
            return Err(CoreError::NotFound(format!(
                "holding {holding_id} for user {user_id}"
            )));
        }

        self.store.delete_holding(holding_id).await?;

        log::info!(
            "sold {} ({} shares) for {}",
            holding.symbol,
            holding.shares,
            user_id
        );
        Ok(())
    }

    /// Load all holdings for `user_id` and derive portfolio totals.
    ///
    /// Read-only and idempotent. Valuation reflects whatever the store
    /// returns — the core never re-prices rows itself.
    pub async fn fetch_portfolio(&self, user_id: &str) -> Result<PortfolioSummary, CoreError> {
        let holdings = self.store.holdings_for_user(user_id).await?;

        let total_invested: f64 = holdings.iter().map(Holding::invested).sum();
        let total_value: f64 = holdings.iter().map(|h| h.total_value).sum();

        Ok(PortfolioSummary {
            total_invested,
            total_value,
            total_profit: total_value - total_invested,
            holdings,
        })
    }
}
