use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use super::traits::{PortfolioStore, TransactionStore};
use crate::errors::CoreError;
use crate::models::holding::{Holding, NewHolding};
use crate::models::transaction::{NewTransaction, Transaction};

/// In-memory implementation of both store traits.
///
/// Stands in for the remote relational store in tests and demos, with
/// the same contract: per-call atomicity only, rows keyed by id,
/// `NotFound` for missing ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: Mutex<HashMap<Uuid, Transaction>>,
    holdings: Mutex<HashMap<Uuid, Holding>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total transaction rows across all users.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transactions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Total holding rows across all users.
    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.holdings.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl TransactionStore for MemoryStore {
    async fn transactions_for_user(&self, user_id: &str) -> Result<Vec<Transaction>, CoreError> {
        let map = self.transactions.lock().unwrap_or_else(|e| e.into_inner());
        let mut rows: Vec<Transaction> = map
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    async fn get_transaction(&self, id: Uuid) -> Result<Transaction, CoreError> {
        let map = self.transactions.lock().unwrap_or_else(|e| e.into_inner());
        map.get(&id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("transaction {id}")))
    }

    async fn insert_transaction(&self, new: NewTransaction) -> Result<Transaction, CoreError> {
        let transaction = Transaction {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            name: new.name,
            amount: new.amount,
            category: new.category,
            transaction_type: new.transaction_type,
            description: new.description,
            icon: new.icon,
            date: new.date,
        };
        let mut map = self.transactions.lock().unwrap_or_else(|e| e.into_inner());
        map.insert(transaction.id, transaction.clone());
        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Transaction, CoreError> {
        let mut map = self.transactions.lock().unwrap_or_else(|e| e.into_inner());
        if !map.contains_key(&transaction.id) {
            return Err(CoreError::NotFound(format!("transaction {}", transaction.id)));
        }
        map.insert(transaction.id, transaction.clone());
        Ok(transaction)
    }

    async fn delete_transaction(&self, id: Uuid) -> Result<(), CoreError> {
        let mut map = self.transactions.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound(format!("transaction {id}")))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PortfolioStore for MemoryStore {
    async fn holdings_for_user(&self, user_id: &str) -> Result<Vec<Holding>, CoreError> {
        let map = self.holdings.lock().unwrap_or_else(|e| e.into_inner());
        let mut rows: Vec<Holding> = map
            .values()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date));
        Ok(rows)
    }

    async fn get_holding(&self, id: Uuid) -> Result<Holding, CoreError> {
        let map = self.holdings.lock().unwrap_or_else(|e| e.into_inner());
        map.get(&id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("holding {id}")))
    }

    async fn insert_holding(&self, new: NewHolding) -> Result<Holding, CoreError> {
        let holding = Holding {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            symbol: new.symbol,
            company_name: new.company_name,
            shares: new.shares,
            purchase_price: new.purchase_price,
            current_price: new.current_price,
            total_value: new.total_value,
            profit_loss: new.profit_loss,
            profit_loss_percent: new.profit_loss_percent,
            purchase_date: new.purchase_date,
        };
        let mut map = self.holdings.lock().unwrap_or_else(|e| e.into_inner());
        map.insert(holding.id, holding.clone());
        Ok(holding)
    }

    async fn update_holding(&self, holding: Holding) -> Result<Holding, CoreError> {
        let mut map = self.holdings.lock().unwrap_or_else(|e| e.into_inner());
        if !map.contains_key(&holding.id) {
            return Err(CoreError::NotFound(format!("holding {}", holding.id)));
        }
        map.insert(holding.id, holding.clone());
        Ok(holding)
    }

    async fn delete_holding(&self, id: Uuid) -> Result<(), CoreError> {
        let mut map = self.holdings.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound(format!("holding {id}")))
    }
}
