//! Append-only event records and the sinks that receive them

use crate::utils::{Address, Amount};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use tracing::info;
use uuid::Uuid;

/// Fields shared by the `Order` and `Cancel` records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order id
    pub id: u64,
    /// Account that created the order
    pub creator: Address,
    /// Asset the creator wants
    pub token_get: Address,
    /// Quantity of `token_get` the creator wants
    pub amount_get: Amount,
    /// Asset the creator offers
    pub token_give: Address,
    /// Quantity of `token_give` the creator offers
    pub amount_give: Amount,
    /// Creation time for `Order`, cancellation time for `Cancel` (ms since epoch)
    pub timestamp: u64,
}

/// A settled fill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Order id
    pub id: u64,
    /// Stable identifier for this settlement
    pub trade_id: Uuid,
    /// Account that filled the order
    pub filler: Address,
    /// Asset the creator received
    pub token_get: Address,
    /// Quantity the creator received
    pub amount_get: Amount,
    /// Asset the filler received
    pub token_give: Address,
    /// Quantity the filler received
    pub amount_give: Amount,
    /// Account that created the order
    pub creator: Address,
    /// Protocol fee paid by the filler in `token_get`
    pub fee: Amount,
    /// Fill time (ms since epoch)
    pub timestamp: u64,
}

/// One entry of the event log, emitted once per successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Transfer {
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    },
    Approval {
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    },
    Deposit {
        token: Address,
        user: Address,
        amount: Amount,
        balance: Amount,
    },
    Withdraw {
        token: Address,
        user: Address,
        amount: Amount,
        balance: Amount,
    },
    Order(OrderRecord),
    Cancel(OrderRecord),
    Trade(TradeRecord),
}

impl Event {
    /// The record's name as it appears in the log
    pub fn name(&self) -> &'static str {
        match self {
            Event::Transfer { .. } => "Transfer",
            Event::Approval { .. } => "Approval",
            Event::Deposit { .. } => "Deposit",
            Event::Withdraw { .. } => "Withdraw",
            Event::Order(_) => "Order",
            Event::Cancel(_) => "Cancel",
            Event::Trade(_) => "Trade",
        }
    }

    /// The order id carried by `Order`, `Cancel` and `Trade` records
    pub fn order_id(&self) -> Option<u64> {
        match self {
            Event::Order(record) | Event::Cancel(record) => Some(record.id),
            Event::Trade(record) => Some(record.id),
            _ => None,
        }
    }
}

/// Receives event records after their mutation has been committed.
///
/// Sinks are called while the exchange still holds its write guard, so they see
/// records in commit order. A sink must not call back into the exchange.
pub trait EventSink: Send + Sync {
    /// Append one record
    fn emit(&self, event: &Event);
}

impl<F> EventSink for F
where
    F: Fn(&Event) + Send + Sync,
{
    fn emit(&self, event: &Event) {
        self(event)
    }
}

/// Sink that writes every record to `tracing` at INFO level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &Event) {
        info!(event = event.name(), "{:?}", event);
    }
}

/// In-memory append-only log, mostly useful for tests and demos
#[derive(Debug, Default)]
pub struct MemoryEventLog {
    events: Mutex<Vec<Event>>,
}

impl MemoryEventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every record so far, oldest first
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of records so far
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been logged
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The most recent record
    pub fn last(&self) -> Option<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Records emitted at or after position `index`
    pub fn since(&self, index: usize) -> Vec<Event> {
        let events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        events.get(index..).map(<[Event]>::to_vec).unwrap_or_default()
    }
}

impl EventSink for MemoryEventLog {
    fn emit(&self, event: &Event) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
