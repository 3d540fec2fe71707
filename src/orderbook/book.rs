//! Order storage and read access

use super::order::{Order, OrderState};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Every order ever created, indexed by id.
///
/// Ids start at 1 and increase by one per order, so `order_count` is both the
/// number of orders created and the most recently assigned id.
#[derive(Debug, Clone)]
pub struct OrderBook {
    pub(super) orders: BTreeMap<u64, Order>,

    pub(super) order_count: u64,

    /// Namespace for deterministic trade identifiers
    pub(super) trade_namespace: Uuid,
}

impl OrderBook {
    /// Create an empty book whose trade ids are derived from `trade_namespace`
    pub fn new(trade_namespace: Uuid) -> Self {
        Self {
            orders: BTreeMap::new(),
            order_count: 0,
            trade_namespace,
        }
    }

    pub fn order_count(&self) -> u64 {
        self.order_count
    }

    /// Look up an order by id
    pub fn order(&self, id: u64) -> Option<&Order> {
        self.orders.get(&id)
    }

    /// Whether order `id` has been filled
    pub fn is_filled(&self, id: u64) -> bool {
        self.state_of(id) == Some(OrderState::Filled)
    }

    /// Whether order `id` has been cancelled
    pub fn is_cancelled(&self, id: u64) -> bool {
        self.state_of(id) == Some(OrderState::Cancelled)
    }

    pub fn state_of(&self, id: u64) -> Option<OrderState> {
        self.orders.get(&id).map(|order| order.state)
    }

    /// All orders, oldest first
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    /// Orders currently in `state`, oldest first
    pub fn orders_in_state(&self, state: OrderState) -> Vec<&Order> {
        self.orders
            .values()
            .filter(|order| order.state == state)
            .collect()
    }

    /// Trade id for the fill of order `id`
    pub fn trade_id(&self, id: u64) -> Uuid {
        Uuid::new_v5(&self.trade_namespace, &id.to_be_bytes())
    }
}
