//! Order records and their lifecycle state

use crate::events::OrderRecord;
use crate::utils::{Address, Amount};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an order. `Filled` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderState {
    Open,
    Filled,
    Cancelled,
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderState::Open => write!(f, "OPEN"),
            OrderState::Filled => write!(f, "FILLED"),
            OrderState::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A standing offer to give `amount_give` of `token_give` in exchange for
/// `amount_get` of `token_get`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub creator: Address,
    pub token_get: Address,
    pub amount_get: Amount,
    pub token_give: Address,
    pub amount_give: Amount,
    /// Creation time (ms since epoch)
    pub created_at: u64,
    pub state: OrderState,
    /// When the order was filled or cancelled
    pub closed_at: Option<u64>,
}

impl Order {
    pub fn is_open(&self) -> bool {
        self.state == OrderState::Open
    }

    /// Event record for this order stamped with `timestamp`
    pub fn record(&self, timestamp: u64) -> OrderRecord {
        OrderRecord {
            id: self.id,
            creator: self.creator,
            token_get: self.token_get,
            amount_get: self.amount_get,
            token_give: self.token_give,
            amount_give: self.amount_give,
            timestamp,
        }
    }
}
