pub mod assistant;
pub mod config;
pub mod errors;
pub mod models;
pub mod quotes;
pub mod services;
pub mod store;

use std::sync::Arc;
use uuid::Uuid;

use config::CoreConfig;
use errors::CoreError;
use models::progress::{FinancialSnapshot, PortfolioSummary, SavingsProgress};
use models::quote::{Quote, QuoteBatch, QuoteQuery};
use models::transaction::{NewTransaction, Transaction};
#[cfg(not(target_arch = "wasm32"))]
use quotes::refresher::{QuoteRefresher, DEFAULT_REFRESH_PERIOD};
use quotes::http::HttpQuoteSource;
use quotes::service::QuoteService;
use quotes::source::QuoteSource;
use services::balance::VirtualBalance;
use services::finance_service::FinanceService;
use services::investment_service::InvestmentService;
use services::unlock::UnlockPolicy;
use store::traits::{PortfolioStore, TransactionStore};

/// Main entry point: one `FinCoach` per authenticated user session.
///
/// Owns the session-scoped state (virtual balance, last financial
/// snapshot) and the services that operate on the external stores and
/// the quote feed. Never share one instance between users — the
/// balance and portfolio belong to exactly one of them.
#[must_use]
pub struct FinCoach {
    user_id: String,
    config: CoreConfig,
    quotes: Arc<QuoteService>,
    finance: FinanceService,
    investments: InvestmentService,
    unlock: UnlockPolicy,
    balance: VirtualBalance,
    snapshot: Option<FinancialSnapshot>,
}

impl std::fmt::Debug for FinCoach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinCoach")
            .field("user_id", &self.user_id)
            .field("balance", &self.balance.amount())
            .field("cached_queries", &self.quotes.cache_len())
            .field("has_snapshot", &self.snapshot.is_some())
            .finish()
    }
}

impl FinCoach {
    /// Build a session talking HTTP to the configured quote endpoint.
    pub fn new(
        user_id: impl Into<String>,
        config: CoreConfig,
        transactions: Arc<dyn TransactionStore>,
        portfolio: Arc<dyn PortfolioStore>,
    ) -> Self {
        let source = Box::new(HttpQuoteSource::new(config.stocks_api_url.clone()));
        Self::with_quote_source(user_id, config, transactions, portfolio, source)
    }

    /// Build a session with a custom quote source (tests, recordings).
    pub fn with_quote_source(
        user_id: impl Into<String>,
        config: CoreConfig,
        transactions: Arc<dyn TransactionStore>,
        portfolio: Arc<dyn PortfolioStore>,
        source: Box<dyn QuoteSource>,
    ) -> Self {
        let unlock = UnlockPolicy::new(config.review_identity.clone());
        Self {
            user_id: user_id.into(),
            quotes: Arc::new(QuoteService::new(source)),
            finance: FinanceService::new(transactions),
            investments: InvestmentService::new(portfolio),
            unlock,
            balance: VirtualBalance::new(),
            snapshot: None,
            config,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    // ── Financial overview ──────────────────────────────────────────

    /// Re-read the transaction set and recompute totals from scratch.
    ///
    /// Applies the balance policy: whenever the weekly profit changes
    /// to a new positive value, the virtual balance is overwritten
    /// with it (overwritten — not added to; see `VirtualBalance::set`).
    pub async fn refresh_financials(&mut self) -> Result<FinancialSnapshot, CoreError> {
        let snapshot = self.finance.snapshot(&self.user_id).await?;

        let profit_changed = self
            .snapshot
            .map_or(true, |prev| prev.weekly_profit != snapshot.weekly_profit);
        if profit_changed && snapshot.weekly_profit > 0.0 {
            self.balance.set(snapshot.weekly_profit)?;
            log::debug!(
                "virtual balance reset to weekly profit {} for {}",
                snapshot.weekly_profit,
                self.user_id
            );
        }

        self.snapshot = Some(snapshot);
        Ok(snapshot)
    }

    /// Latest snapshot; all-zero with `has_data = false` before the
    /// first refresh.
    #[must_use]
    pub fn snapshot(&self) -> FinancialSnapshot {
        self.snapshot.unwrap_or_default()
    }

    /// Progress toward the configured savings target, derived from the
    /// latest snapshot.
    #[must_use]
    pub fn savings_progress(&self) -> SavingsProgress {
        FinanceService::progress(&self.snapshot(), self.config.savings_target)
    }

    /// Whether simulated investing is unlocked for this session.
    /// Re-derived on every call from current progress and identity.
    #[must_use]
    pub fn can_invest(&self) -> bool {
        self.unlock
            .can_invest(self.savings_progress().percentage, &self.user_id)
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Record a transaction for this session's user (the payload's
    /// `user_id` is overridden with the session's).
    pub async fn add_transaction(
        &self,
        mut new: NewTransaction,
    ) -> Result<Transaction, CoreError> {
        new.user_id = self.user_id.clone();
        self.finance.add_transaction(new).await
    }

    pub async fn update_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Transaction, CoreError> {
        self.finance.update_transaction(transaction).await
    }

    pub async fn delete_transaction(&self, id: Uuid) -> Result<(), CoreError> {
        self.finance.delete_transaction(id).await
    }

    pub async fn get_transaction(&self, id: Uuid) -> Result<Transaction, CoreError> {
        self.finance.get_transaction(id).await
    }

    /// All of this user's transactions, newest first.
    pub async fn transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        self.finance.transactions_for_user(&self.user_id).await
    }

    /// The `limit` most recent transactions, newest first.
    pub async fn recent_transactions(&self, limit: usize) -> Result<Vec<Transaction>, CoreError> {
        self.finance.recent_transactions(&self.user_id, limit).await
    }

    // ── Quotes ──────────────────────────────────────────────────────

    pub async fn market_quotes(&self, query: &QuoteQuery) -> Result<QuoteBatch, CoreError> {
        self.quotes.fetch_quotes(query).await
    }

    pub async fn top_gainers(&self) -> Result<QuoteBatch, CoreError> {
        self.quotes.top_gainers().await
    }

    pub async fn top_losers(&self) -> Result<QuoteBatch, CoreError> {
        self.quotes.top_losers().await
    }

    pub async fn most_active(&self) -> Result<QuoteBatch, CoreError> {
        self.quotes.most_active().await
    }

    /// Discard all cached quotes; the next fetch goes to the network.
    pub fn clear_quote_cache(&self) {
        self.quotes.clear_cache();
    }

    /// Shared handle to the quote service, e.g. for a refresher.
    #[must_use]
    pub fn quote_service(&self) -> Arc<QuoteService> {
        Arc::clone(&self.quotes)
    }

    /// Keep the top-gainers cache entry warm on a 30-second cadence.
    /// Dropping the returned refresher cancels the task; must be
    /// called within a tokio runtime.
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn spawn_quote_refresher(&self) -> QuoteRefresher {
        QuoteRefresher::spawn(
            Arc::clone(&self.quotes),
            QuoteQuery::top_gainers(),
            DEFAULT_REFRESH_PERIOD,
        )
    }

    // ── Investing ───────────────────────────────────────────────────

    /// Buy, then re-read the portfolio. The external write fully
    /// completes before the refresh starts.
    pub async fn buy_stock(
        &mut self,
        quote: &Quote,
        shares: f64,
    ) -> Result<PortfolioSummary, CoreError> {
        self.investments
            .buy(&self.user_id, quote, shares, &mut self.balance)
            .await?;
        self.investments.fetch_portfolio(&self.user_id).await
    }

    /// Sell — a full liquidation regardless of `shares`; see
    /// `InvestmentService::sell` — then re-read the portfolio.
    pub async fn sell_holding(
        &mut self,
        holding_id: Uuid,
        shares: f64,
    ) -> Result<PortfolioSummary, CoreError> {
        self.investments
            .sell(&self.user_id, holding_id, shares)
            .await?;
        self.investments.fetch_portfolio(&self.user_id).await
    }

    /// Load this user's holdings and derive totals. Read-only.
    pub async fn portfolio(&self) -> Result<PortfolioSummary, CoreError> {
        self.investments.fetch_portfolio(&self.user_id).await
    }

    // ── Virtual balance ─────────────────────────────────────────────

    #[must_use]
    pub fn virtual_balance(&self) -> f64 {
        self.balance.amount()
    }

    /// Overwrite the virtual balance (not an accumulator — see
    /// `VirtualBalance::set`).
    pub fn set_virtual_balance(&mut self, amount: f64) -> Result<(), CoreError> {
        self.balance.set(amount)
    }
}
