use std::sync::Arc;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::progress::{FinancialSnapshot, SavingsProgress};
use crate::models::transaction::{NewTransaction, Transaction, TransactionType};
use crate::store::traits::TransactionStore;

/// Savings-progress calculation plus transaction CRUD.
///
/// Aggregates are recomputed in full from the store on every call —
/// no incremental accumulation — so filtered reads elsewhere can never
/// desync the numbers.
pub struct FinanceService {
    store: Arc<dyn TransactionStore>,
}

impl FinanceService {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    // ── Aggregation ─────────────────────────────────────────────────

    /// Re-read the user's transactions and recompute totals from
    /// scratch.
    pub async fn snapshot(&self, user_id: &str) -> Result<FinancialSnapshot, CoreError> {
        let transactions = self.store.transactions_for_user(user_id).await?;
        Ok(Self::snapshot_from(&transactions))
    }

    /// Pure aggregation over an already-loaded transaction set.
    ///
    /// An empty set produces all-zero totals with `has_data = false`,
    /// distinct from a populated set that nets to zero.
    #[must_use]
    pub fn snapshot_from(transactions: &[Transaction]) -> FinancialSnapshot {
        if transactions.is_empty() {
            return FinancialSnapshot::default();
        }

        let mut total_income = 0.0;
        let mut total_expenses = 0.0;
        for transaction in transactions {
            match transaction.transaction_type {
                TransactionType::Income => total_income += transaction.amount,
                TransactionType::Expense => total_expenses += transaction.amount,
            }
        }

        FinancialSnapshot {
            total_income,
            total_expenses,
            weekly_profit: total_income - total_expenses,
            has_data: true,
        }
    }

    /// Progress toward `target`.
    ///
    /// `saved` is the non-negative part of the weekly profit;
    /// `percentage` is `100 * saved / target` capped at 100. A
    /// non-positive target yields zero progress.
    #[must_use]
    pub fn progress(snapshot: &FinancialSnapshot, target: f64) -> SavingsProgress {
        let saved = snapshot.weekly_profit.max(0.0);
        let percentage = if target > 0.0 {
            (saved / target * 100.0).min(100.0)
        } else {
            0.0
        };
        SavingsProgress {
            target,
            saved,
            percentage,
        }
    }

    // ── Transaction CRUD ────────────────────────────────────────────

    /// Record a new transaction. Validates before writing.
    pub async fn add_transaction(&self, new: NewTransaction) -> Result<Transaction, CoreError> {
        Self::validate(&new.name, new.amount)?;
        let transaction = self.store.insert_transaction(new).await?;
        log::debug!(
            "recorded {} transaction {} for {}",
            transaction.transaction_type,
            transaction.id,
            transaction.user_id
        );
        Ok(transaction)
    }

    /// Replace an existing transaction. Validates before writing;
    /// `NotFound` if the row is gone.
    pub async fn update_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Transaction, CoreError> {
        Self::validate(&transaction.name, transaction.amount)?;
        self.store.update_transaction(transaction).await
    }

    pub async fn delete_transaction(&self, id: Uuid) -> Result<(), CoreError> {
        self.store.delete_transaction(id).await
    }

    pub async fn get_transaction(&self, id: Uuid) -> Result<Transaction, CoreError> {
        self.store.get_transaction(id).await
    }

    /// All of the user's transactions, newest first.
    pub async fn transactions_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Transaction>, CoreError> {
        self.store.transactions_for_user(user_id).await
    }

    /// The `limit` most recent transactions, newest first.
    pub async fn recent_transactions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Transaction>, CoreError> {
        let mut rows = self.store.transactions_for_user(user_id).await?;
        rows.truncate(limit);
        Ok(rows)
    }

    fn validate(name: &str, amount: f64) -> Result<(), CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Transaction name must not be empty".into(),
            ));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::Validation(format!(
                "Transaction amount must be positive, got {amount}"
            )));
        }
        Ok(())
    }
}
