use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One simulated position: a row of the external `portfolio` table.
///
/// Created by a buy, deleted wholesale by a sell. `current_price` is
/// whatever was stored at buy time until an external process updates
/// the row — the core never rewrites it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: Uuid,

    /// Owning user — each holding has exactly one owner
    pub user_id: String,

    pub symbol: String,
    pub company_name: String,
    pub shares: f64,

    /// Close price at the moment of purchase
    pub purchase_price: f64,

    /// Last stored market price for the position
    pub current_price: f64,

    /// `shares * current_price`, as stored
    pub total_value: f64,

    /// `total_value - shares * purchase_price`, as stored
    pub profit_loss: f64,

    pub profit_loss_percent: f64,

    pub purchase_date: DateTime<Utc>,
}

impl Holding {
    /// Cost basis of the position.
    #[must_use]
    pub fn invested(&self) -> f64 {
        self.shares * self.purchase_price
    }
}

/// Payload for inserting a new holding; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHolding {
    pub user_id: String,
    pub symbol: String,
    pub company_name: String,
    pub shares: f64,
    pub purchase_price: f64,
    pub current_price: f64,
    pub total_value: f64,
    pub profit_loss: f64,
    pub profit_loss_percent: f64,
    pub purchase_date: DateTime<Utc>,
}
