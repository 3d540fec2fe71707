//! Exchange snapshot for reporting and persistence

use crate::error::LedgerError;
use crate::orderbook::{Order, OrderState};
use crate::token::TokenInfo;
use crate::utils::{Address, Amount};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One escrowed balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyBalance {
    pub asset: Address,
    pub user: Address,
    pub amount: Amount,
}

/// A snapshot of the exchange state at a specific point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeSnapshot {
    /// Custody account of the exchange
    pub address: Address,

    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    pub fee_account: Address,

    pub fee_percent: u8,

    /// Number of orders ever created
    pub order_count: u64,

    /// Deployed tokens, ordered by asset id
    pub tokens: Vec<TokenInfo>,

    /// Every order, oldest first
    pub orders: Vec<Order>,

    /// Non-zero custody balances, ordered by (asset, user)
    pub balances: Vec<CustodyBalance>,
}

impl ExchangeSnapshot {
    /// Escrowed balance of `user` in `asset`
    pub fn balance_of(&self, asset: Address, user: Address) -> Amount {
        self.balances
            .iter()
            .find(|entry| entry.asset == asset && entry.user == user)
            .map_or(0, |entry| entry.amount)
    }

    /// Sum of escrowed balances in `asset`
    pub fn total(&self, asset: Address) -> Amount {
        let total = self
            .balances
            .iter()
            .filter(|entry| entry.asset == asset)
            .map(|entry| entry.amount)
            .sum();
        trace!("total {}: {}", asset, total);
        total
    }

    /// Orders still open when the snapshot was taken
    pub fn open_orders(&self) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| order.state == OrderState::Open)
            .collect()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        Ok(serde_json::from_str(json)?)
    }
}
