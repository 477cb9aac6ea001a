use crate::errors::CoreError;

/// Spendable simulated cash for one user session.
///
/// `set` overwrites — this is NOT an accumulator. The session applies
/// it whenever the weekly profit recomputes to a new positive value,
/// which also restores any amount previously spent on purchases.
/// Session-scoped: never persisted, never shared across users.
///
/// Invariant: the balance is always `>= 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VirtualBalance {
    amount: f64,
}

impl VirtualBalance {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Overwrite the balance. Negative or non-finite values are
    /// rejected so the balance can never go below zero.
    pub fn set(&mut self, amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::Validation(format!(
                "Balance must be a non-negative amount, got {amount}"
            )));
        }
        self.amount = amount;
        Ok(())
    }

    /// Spend `amount`. Fails without changing the balance if the
    /// debit would overdraw it.
    pub fn debit(&mut self, amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::Validation(format!(
                "Debit amount must be non-negative, got {amount}"
            )));
        }
        if amount > self.amount {
            return Err(CoreError::InsufficientBalance {
                required: amount,
                available: self.amount,
            });
        }
        self.amount -= amount;
        Ok(())
    }
}
