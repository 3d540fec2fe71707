//! Order book operations: placing and cancelling orders

use super::book::OrderBook;
use super::order::{Order, OrderState};
use crate::custody::CustodyLedger;
use crate::error::LedgerError;
use crate::utils::{Address, Amount};
use tracing::{debug, trace};

impl OrderBook {
    /// Place an order offering `amount_give` of `token_give` for `amount_get` of `token_get`.
    ///
    /// The creator must hold at least `amount_give` of `token_give` in custody.
    /// The funds are not reserved; they are checked again when the order is filled.
    #[allow(clippy::too_many_arguments)]
    pub fn make_order(
        &mut self,
        custody: &CustodyLedger,
        creator: Address,
        token_get: Address,
        amount_get: Amount,
        token_give: Address,
        amount_give: Amount,
        now: u64,
    ) -> Result<Order, LedgerError> {
        trace!(
            "Order book: {} offers {} of {} for {} of {}",
            creator, amount_give, token_give, amount_get, token_get
        );
        let available = custody.balance_of(token_give, creator);
        if available < amount_give {
            return Err(LedgerError::InsufficientBalance {
                asset: token_give,
                account: creator,
                required: amount_give,
                available,
            });
        }

        self.order_count += 1;
        let order = Order {
            id: self.order_count,
            creator,
            token_get,
            amount_get,
            token_give,
            amount_give,
            created_at: now,
            state: OrderState::Open,
            closed_at: None,
        };
        self.orders.insert(order.id, order.clone());

        debug!("Order book: created order {} for {}", order.id, creator);
        Ok(order)
    }

    /// Cancel an open order. Only its creator may do so.
    pub fn cancel_order(
        &mut self,
        caller: Address,
        id: u64,
        now: u64,
    ) -> Result<Order, LedgerError> {
        trace!("Order book: {} cancels order {}", caller, id);
        let order = self
            .orders
            .get_mut(&id)
            .ok_or(LedgerError::OrderNotFound(id))?;

        if order.creator != caller {
            return Err(LedgerError::Unauthorized {
                order_id: id,
                caller,
            });
        }
        ensure_open(order)?;

        order.state = OrderState::Cancelled;
        order.closed_at = Some(now);

        debug!("Order book: cancelled order {}", id);
        Ok(order.clone())
    }
}

/// Reject orders that already reached a terminal state
pub(super) fn ensure_open(order: &Order) -> Result<(), LedgerError> {
    match order.state {
        OrderState::Open => Ok(()),
        OrderState::Filled => Err(LedgerError::OrderAlreadyFilled(order.id)),
        OrderState::Cancelled => Err(LedgerError::OrderAlreadyCancelled(order.id)),
    }
}
