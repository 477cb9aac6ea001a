// ═══════════════════════════════════════════════════════════════════
// Service Tests — FinanceService, UnlockPolicy, VirtualBalance,
// InvestmentService over the in-memory store
// ═══════════════════════════════════════════════════════════════════

use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use fincoach_core::errors::CoreError;
use fincoach_core::models::quote::Quote;
use fincoach_core::models::transaction::{NewTransaction, Transaction, TransactionType};
use fincoach_core::services::balance::VirtualBalance;
use fincoach_core::services::finance_service::FinanceService;
use fincoach_core::services::investment_service::InvestmentService;
use fincoach_core::services::unlock::UnlockPolicy;
use fincoach_core::store::memory::MemoryStore;
use fincoach_core::store::traits::{PortfolioStore, TransactionStore};

// ═══════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════

const USER: &str = "user-1";

fn new_tx(amount: f64, transaction_type: TransactionType, days_ago: i64) -> NewTransaction {
    NewTransaction {
        user_id: USER.into(),
        name: match transaction_type {
            TransactionType::Income => "Salary".into(),
            TransactionType::Expense => "Groceries".into(),
        },
        amount,
        category: "General".into(),
        transaction_type,
        description: None,
        icon: None,
        date: Utc::now() - Duration::days(days_ago),
    }
}

fn tx(amount: f64, transaction_type: TransactionType) -> Transaction {
    Transaction {
        id: Uuid::new_v4(),
        user_id: USER.into(),
        name: "row".into(),
        amount,
        category: "General".into(),
        transaction_type,
        description: None,
        icon: None,
        date: Utc::now(),
    }
}

fn quote(symbol: &str, close: f64) -> Quote {
    Quote {
        id: 1,
        symbol: symbol.into(),
        company: format!("{symbol} Corp"),
        market: "Main Market".into(),
        sector: "Banks".into(),
        prev_close: close,
        open: close,
        high: close,
        low: close,
        close,
        change: 0.0,
        percent_change: 0.0,
        trades: 100,
        volume: 1000.0,
        value: 1000.0 * close,
        trade_date: "2025-06-02".into(),
    }
}

fn finance_over_memory() -> (FinanceService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let service = FinanceService::new(store.clone() as Arc<dyn TransactionStore>);
    (service, store)
}

fn investments_over_memory() -> (InvestmentService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let service = InvestmentService::new(store.clone() as Arc<dyn PortfolioStore>);
    (service, store)
}

// ═══════════════════════════════════════════════════════════════════
//  FinanceService — snapshot aggregation
// ═══════════════════════════════════════════════════════════════════

mod snapshot {
    use super::*;

    #[test]
    fn empty_set_is_the_no_data_state() {
        let s = FinanceService::snapshot_from(&[]);
        assert!(!s.has_data);
        assert_eq!(s.total_income, 0.0);
        assert_eq!(s.total_expenses, 0.0);
        assert_eq!(s.weekly_profit, 0.0);
    }

    #[test]
    fn zero_net_with_rows_still_has_data() {
        let rows = vec![
            tx(100.0, TransactionType::Income),
            tx(100.0, TransactionType::Expense),
        ];
        let s = FinanceService::snapshot_from(&rows);
        assert!(s.has_data);
        assert_eq!(s.weekly_profit, 0.0);
    }

    #[test]
    fn income_minus_expenses_is_the_weekly_profit() {
        let rows = vec![
            tx(2500.0, TransactionType::Income),
            tx(500.0, TransactionType::Expense),
        ];
        let s = FinanceService::snapshot_from(&rows);
        assert_eq!(s.total_income, 2500.0);
        assert_eq!(s.total_expenses, 500.0);
        assert_eq!(s.weekly_profit, 2000.0);
        assert_eq!(s.total_income - s.total_expenses, s.weekly_profit);
    }

    #[test]
    fn expenses_can_exceed_income() {
        let rows = vec![
            tx(300.0, TransactionType::Income),
            tx(1000.0, TransactionType::Expense),
        ];
        let s = FinanceService::snapshot_from(&rows);
        assert_eq!(s.weekly_profit, -700.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FinanceService — savings progress
// ═══════════════════════════════════════════════════════════════════

mod progress {
    use super::*;

    #[test]
    fn two_thousand_saved_of_ten_thousand_is_twenty_percent() {
        let rows = vec![
            tx(2500.0, TransactionType::Income),
            tx(500.0, TransactionType::Expense),
        ];
        let snapshot = FinanceService::snapshot_from(&rows);
        let p = FinanceService::progress(&snapshot, 10_000.0);
        assert_eq!(p.saved, 2000.0);
        assert_eq!(p.percentage, 20.0);
        assert_eq!(p.target, 10_000.0);
    }

    #[test]
    fn negative_profit_saves_nothing() {
        let rows = vec![tx(1000.0, TransactionType::Expense)];
        let snapshot = FinanceService::snapshot_from(&rows);
        let p = FinanceService::progress(&snapshot, 10_000.0);
        assert_eq!(p.saved, 0.0);
        assert_eq!(p.percentage, 0.0);
    }

    #[test]
    fn percentage_caps_at_one_hundred() {
        let rows = vec![tx(25_000.0, TransactionType::Income)];
        let snapshot = FinanceService::snapshot_from(&rows);
        let p = FinanceService::progress(&snapshot, 10_000.0);
        assert_eq!(p.saved, 25_000.0);
        assert_eq!(p.percentage, 100.0);
    }

    #[test]
    fn percentage_stays_within_bounds() {
        for income in [0.0f64, 1.0, 9_999.0, 10_000.0, 50_000.0] {
            let rows = vec![tx(income.max(0.01), TransactionType::Income)];
            let snapshot = FinanceService::snapshot_from(&rows);
            let p = FinanceService::progress(&snapshot, 10_000.0);
            assert!((0.0..=100.0).contains(&p.percentage), "income {income}");
        }
    }

    #[test]
    fn custom_target_scales_the_percentage() {
        let rows = vec![tx(500.0, TransactionType::Income)];
        let snapshot = FinanceService::snapshot_from(&rows);
        let p = FinanceService::progress(&snapshot, 1_000.0);
        assert_eq!(p.percentage, 50.0);
    }

    #[test]
    fn non_positive_target_yields_zero_progress() {
        let rows = vec![tx(500.0, TransactionType::Income)];
        let snapshot = FinanceService::snapshot_from(&rows);
        assert_eq!(FinanceService::progress(&snapshot, 0.0).percentage, 0.0);
        assert_eq!(FinanceService::progress(&snapshot, -5.0).percentage, 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FinanceService — transaction CRUD
// ═══════════════════════════════════════════════════════════════════

mod transactions {
    use super::*;

    #[tokio::test]
    async fn add_then_read_back() {
        let (service, _store) = finance_over_memory();
        let created = service
            .add_transaction(new_tx(2500.0, TransactionType::Income, 0))
            .await
            .unwrap();

        let fetched = service.get_transaction(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let (service, _store) = finance_over_memory();
        service
            .add_transaction(new_tx(10.0, TransactionType::Expense, 3))
            .await
            .unwrap();
        service
            .add_transaction(new_tx(20.0, TransactionType::Expense, 1))
            .await
            .unwrap();
        service
            .add_transaction(new_tx(30.0, TransactionType::Expense, 2))
            .await
            .unwrap();

        let rows = service.transactions_for_user(USER).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].amount, 20.0);
        assert_eq!(rows[1].amount, 30.0);
        assert_eq!(rows[2].amount, 10.0);
    }

    #[tokio::test]
    async fn recent_transactions_truncates() {
        let (service, _store) = finance_over_memory();
        for days_ago in 0..7 {
            service
                .add_transaction(new_tx(10.0 + days_ago as f64, TransactionType::Expense, days_ago))
                .await
                .unwrap();
        }

        let recent = service.recent_transactions(USER, 5).await.unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].amount, 10.0); // today's row first
    }

    #[tokio::test]
    async fn snapshot_recomputes_from_the_store() {
        let (service, _store) = finance_over_memory();
        service
            .add_transaction(new_tx(2500.0, TransactionType::Income, 0))
            .await
            .unwrap();
        service
            .add_transaction(new_tx(500.0, TransactionType::Expense, 1))
            .await
            .unwrap();

        let s = service.snapshot(USER).await.unwrap();
        assert!(s.has_data);
        assert_eq!(s.weekly_profit, 2000.0);
    }

    #[tokio::test]
    async fn rejects_empty_name() {
        let (service, store) = finance_over_memory();
        let mut new = new_tx(10.0, TransactionType::Expense, 0);
        new.name = "   ".into();

        let err = service.add_transaction(new).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(store.transaction_count(), 0);
    }

    #[tokio::test]
    async fn rejects_non_positive_amounts() {
        let (service, _store) = finance_over_memory();
        for amount in [0.0, -5.0, f64::NAN] {
            let err = service
                .add_transaction(new_tx(amount, TransactionType::Expense, 0))
                .await
                .unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "amount {amount}");
        }
    }

    #[tokio::test]
    async fn update_replaces_the_row() {
        let (service, _store) = finance_over_memory();
        let mut created = service
            .add_transaction(new_tx(100.0, TransactionType::Expense, 0))
            .await
            .unwrap();

        created.amount = 150.0;
        created.name = "Groceries (corrected)".into();
        let updated = service.update_transaction(created.clone()).await.unwrap();
        assert_eq!(updated.amount, 150.0);

        let fetched = service.get_transaction(created.id).await.unwrap();
        assert_eq!(fetched.name, "Groceries (corrected)");
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() {
        let (service, _store) = finance_over_memory();
        let err = service
            .update_transaction(tx(50.0, TransactionType::Expense))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_then_lookup_is_not_found() {
        let (service, _store) = finance_over_memory();
        let created = service
            .add_transaction(new_tx(100.0, TransactionType::Expense, 0))
            .await
            .unwrap();

        service.delete_transaction(created.id).await.unwrap();
        let err = service.get_transaction(created.id).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn listing_filters_by_user() {
        let (service, store) = finance_over_memory();
        service
            .add_transaction(new_tx(100.0, TransactionType::Income, 0))
            .await
            .unwrap();
        let mut other = new_tx(999.0, TransactionType::Income, 0);
        other.user_id = "user-2".into();
        service.add_transaction(other).await.unwrap();

        let rows = service.transactions_for_user(USER).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(store.transaction_count(), 2);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  UnlockPolicy
// ═══════════════════════════════════════════════════════════════════

mod unlock {
    use super::*;

    #[test]
    fn locked_below_one_hundred_percent() {
        let policy = UnlockPolicy::new(None);
        assert!(!policy.can_invest(0.0, "anyone"));
        assert!(!policy.can_invest(20.0, "anyone"));
        assert!(!policy.can_invest(99.9, "anyone"));
    }

    #[test]
    fn unlocked_at_and_above_one_hundred_percent() {
        let policy = UnlockPolicy::new(None);
        assert!(policy.can_invest(100.0, "anyone"));
        assert!(policy.can_invest(250.0, "anyone"));
    }

    #[test]
    fn monotonic_in_percentage() {
        let policy = UnlockPolicy::new(Some("reviewer".into()));
        let points = [0.0, 10.0, 50.0, 99.9, 100.0, 150.0];
        for (i, &p1) in points.iter().enumerate() {
            for &p2 in &points[i..] {
                if policy.can_invest(p1, "someone") {
                    assert!(policy.can_invest(p2, "someone"), "{p1} -> {p2}");
                }
            }
        }
    }

    #[test]
    fn override_identity_bypasses_progress() {
        let policy = UnlockPolicy::new(Some("reviewer@fincoach.app".into()));
        assert!(policy.can_invest(0.0, "reviewer@fincoach.app"));
    }

    #[test]
    fn override_comparison_is_exact() {
        let policy = UnlockPolicy::new(Some("reviewer@fincoach.app".into()));
        assert!(!policy.can_invest(0.0, "Reviewer@fincoach.app"));
        assert!(!policy.can_invest(0.0, "reviewer@fincoach.ap"));
        assert!(!policy.can_invest(0.0, ""));
    }

    #[test]
    fn no_override_configured_means_no_bypass() {
        let policy = UnlockPolicy::new(None);
        assert!(!policy.can_invest(0.0, "reviewer@fincoach.app"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  VirtualBalance
// ═══════════════════════════════════════════════════════════════════

mod balance {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(VirtualBalance::new().amount(), 0.0);
    }

    #[test]
    fn set_overwrites_rather_than_accumulates() {
        let mut b = VirtualBalance::new();
        b.set(100.0).unwrap();
        b.set(40.0).unwrap();
        assert_eq!(b.amount(), 40.0);
    }

    #[test]
    fn debit_subtracts_exactly() {
        let mut b = VirtualBalance::new();
        b.set(2000.0).unwrap();
        b.debit(1500.0).unwrap();
        assert_eq!(b.amount(), 500.0);
    }

    #[test]
    fn overdraw_fails_and_leaves_the_balance() {
        let mut b = VirtualBalance::new();
        b.set(1000.0).unwrap();
        let err = b.debit(1500.0).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientBalance {
                required,
                available,
            } if required == 1500.0 && available == 1000.0
        ));
        assert_eq!(b.amount(), 1000.0);
    }

    #[test]
    fn debit_of_the_full_balance_reaches_zero() {
        let mut b = VirtualBalance::new();
        b.set(750.0).unwrap();
        b.debit(750.0).unwrap();
        assert_eq!(b.amount(), 0.0);
    }

    #[test]
    fn rejects_negative_and_non_finite_sets() {
        let mut b = VirtualBalance::new();
        assert!(b.set(-1.0).is_err());
        assert!(b.set(f64::NAN).is_err());
        assert!(b.set(f64::INFINITY).is_err());
        assert_eq!(b.amount(), 0.0);
    }

    #[test]
    fn rejects_negative_debits() {
        let mut b = VirtualBalance::new();
        b.set(100.0).unwrap();
        assert!(b.debit(-10.0).is_err());
        assert_eq!(b.amount(), 100.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  InvestmentService — buy / sell / fetch_portfolio
// ═══════════════════════════════════════════════════════════════════

mod investments {
    use super::*;

    #[tokio::test]
    async fn buy_debits_and_creates_one_holding() {
        let (service, store) = investments_over_memory();
        let mut balance = VirtualBalance::new();
        balance.set(2000.0).unwrap();

        let holding = service
            .buy(USER, &quote("COMI", 150.0), 10.0, &mut balance)
            .await
            .unwrap();

        assert_eq!(balance.amount(), 500.0);
        assert_eq!(store.holding_count(), 1);
        assert_eq!(holding.shares, 10.0);
        assert_eq!(holding.purchase_price, 150.0);
        assert_eq!(holding.current_price, 150.0);
        assert_eq!(holding.total_value, 1500.0);
        assert_eq!(holding.profit_loss, 0.0);
        assert_eq!(holding.profit_loss_percent, 0.0);
    }

    #[tokio::test]
    async fn buy_beyond_the_balance_changes_nothing() {
        let (service, store) = investments_over_memory();
        let mut balance = VirtualBalance::new();
        balance.set(1000.0).unwrap();

        let err = service
            .buy(USER, &quote("COMI", 150.0), 10.0, &mut balance)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientBalance {
                required,
                available,
            } if required == 1500.0 && available == 1000.0
        ));
        assert_eq!(balance.amount(), 1000.0);
        assert_eq!(store.holding_count(), 0);
    }

    #[tokio::test]
    async fn buy_of_the_exact_balance_succeeds() {
        let (service, _store) = investments_over_memory();
        let mut balance = VirtualBalance::new();
        balance.set(1500.0).unwrap();

        service
            .buy(USER, &quote("COMI", 150.0), 10.0, &mut balance)
            .await
            .unwrap();
        assert_eq!(balance.amount(), 0.0);
    }

    #[tokio::test]
    async fn buy_rejects_non_positive_share_counts() {
        let (service, store) = investments_over_memory();
        let mut balance = VirtualBalance::new();
        balance.set(2000.0).unwrap();

        for shares in [0.0, -1.0, f64::NAN] {
            let err = service
                .buy(USER, &quote("COMI", 150.0), shares, &mut balance)
                .await
                .unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "shares {shares}");
        }
        assert_eq!(store.holding_count(), 0);
        assert_eq!(balance.amount(), 2000.0);
    }

    #[tokio::test]
    async fn sell_removes_the_holding_wholesale() {
        let (service, store) = investments_over_memory();
        let mut balance = VirtualBalance::new();
        balance.set(2000.0).unwrap();

        let holding = service
            .buy(USER, &quote("COMI", 150.0), 10.0, &mut balance)
            .await
            .unwrap();

        // A partial share count is requested but the whole position
        // goes away.
        service.sell(USER, holding.id, 3.0).await.unwrap();
        assert_eq!(store.holding_count(), 0);

        let summary = service.fetch_portfolio(USER).await.unwrap();
        assert!(summary.holdings.is_empty());
        assert_eq!(summary.total_profit, 0.0);
    }

    #[tokio::test]
    async fn sell_does_not_credit_the_balance() {
        let (service, _store) = investments_over_memory();
        let mut balance = VirtualBalance::new();
        balance.set(2000.0).unwrap();

        let holding = service
            .buy(USER, &quote("COMI", 150.0), 10.0, &mut balance)
            .await
            .unwrap();
        assert_eq!(balance.amount(), 500.0);

        service.sell(USER, holding.id, 10.0).await.unwrap();
        assert_eq!(balance.amount(), 500.0);
    }

    #[tokio::test]
    async fn sell_of_a_missing_holding_is_not_found() {
        let (service, _store) = investments_over_memory();
        let err = service.sell(USER, Uuid::new_v4(), 1.0).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn sell_of_someone_elses_holding_is_not_found() {
        let (service, store) = investments_over_memory();
        let mut balance = VirtualBalance::new();
        balance.set(2000.0).unwrap();

        let holding = service
            .buy(USER, &quote("COMI", 150.0), 10.0, &mut balance)
            .await
            .unwrap();

        let err = service
            .sell("user-2", holding.id, 10.0)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
        assert_eq!(store.holding_count(), 1);
    }

    #[tokio::test]
    async fn portfolio_totals_derive_from_stored_rows() {
        let (service, _store) = investments_over_memory();
        let mut balance = VirtualBalance::new();
        balance.set(5000.0).unwrap();

        service
            .buy(USER, &quote("COMI", 150.0), 10.0, &mut balance)
            .await
            .unwrap();
        service
            .buy(USER, &quote("SWDY", 50.0), 20.0, &mut balance)
            .await
            .unwrap();

        let summary = service.fetch_portfolio(USER).await.unwrap();
        assert_eq!(summary.holdings.len(), 2);
        assert_eq!(summary.total_invested, 2500.0);
        assert_eq!(summary.total_value, 2500.0);
        assert_eq!(summary.total_profit, 0.0);
    }

    #[tokio::test]
    async fn valuation_reflects_externally_updated_prices() {
        let (service, store) = investments_over_memory();
        let mut balance = VirtualBalance::new();
        balance.set(2000.0).unwrap();

        let holding = service
            .buy(USER, &quote("COMI", 150.0), 10.0, &mut balance)
            .await
            .unwrap();

        // Simulate an external mark-to-market process updating the row.
        let mut repriced = holding.clone();
        repriced.current_price = 180.0;
        repriced.total_value = 1800.0;
        repriced.profit_loss = 300.0;
        repriced.profit_loss_percent = 20.0;
        store.update_holding(repriced).await.unwrap();

        let summary = service.fetch_portfolio(USER).await.unwrap();
        assert_eq!(summary.total_invested, 1500.0);
        assert_eq!(summary.total_value, 1800.0);
        assert_eq!(summary.total_profit, 300.0);
    }

    #[tokio::test]
    async fn portfolio_is_scoped_to_the_user() {
        let (service, _store) = investments_over_memory();
        let mut balance = VirtualBalance::new();
        balance.set(5000.0).unwrap();

        service
            .buy(USER, &quote("COMI", 150.0), 10.0, &mut balance)
            .await
            .unwrap();
        service
            .buy("user-2", &quote("SWDY", 50.0), 20.0, &mut balance)
            .await
            .unwrap();

        let summary = service.fetch_portfolio(USER).await.unwrap();
        assert_eq!(summary.holdings.len(), 1);
        assert_eq!(summary.holdings[0].symbol, "COMI");
    }
}
