use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::holding::{Holding, NewHolding};
use crate::models::transaction::{NewTransaction, Transaction};

/// Access to the external `transactions` table.
///
/// Implementations wrap a remote relational API. Only per-call
/// atomicity is assumed — nothing in the core relies on transactions
/// spanning calls. Read failures surface as `StoreRead`, write
/// failures as `StoreWrite`, missing rows as `NotFound`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait TransactionStore: Send + Sync {
    /// All transactions for one user, newest first.
    async fn transactions_for_user(&self, user_id: &str) -> Result<Vec<Transaction>, CoreError>;

    /// Single-row lookup by id.
    async fn get_transaction(&self, id: Uuid) -> Result<Transaction, CoreError>;

    /// Insert one row; the store assigns the id.
    async fn insert_transaction(&self, new: NewTransaction) -> Result<Transaction, CoreError>;

    /// Replace the row with the same id.
    async fn update_transaction(&self, transaction: Transaction) -> Result<Transaction, CoreError>;

    /// Delete the row by id.
    async fn delete_transaction(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Access to the external `portfolio` table. Same contract rules as
/// [`TransactionStore`].
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PortfolioStore: Send + Sync {
    /// All holdings for one user.
    async fn holdings_for_user(&self, user_id: &str) -> Result<Vec<Holding>, CoreError>;

    /// Single-row lookup by id.
    async fn get_holding(&self, id: Uuid) -> Result<Holding, CoreError>;

    /// Insert one row; the store assigns the id.
    async fn insert_holding(&self, new: NewHolding) -> Result<Holding, CoreError>;

    /// Replace the row with the same id. The core itself never
    /// re-prices holdings; this is the hook an external mark-to-market
    /// process would use.
    async fn update_holding(&self, holding: Holding) -> Result<Holding, CoreError>;

    /// Delete the row by id.
    async fn delete_holding(&self, id: Uuid) -> Result<(), CoreError>;
}
