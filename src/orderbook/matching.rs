//! Settlement of a fill between an order's creator and a filler.

use super::book::OrderBook;
use super::operations::ensure_open;
use super::order::OrderState;
use crate::custody::{CustodyLedger, Leg};
use crate::error::LedgerError;
use crate::events::TradeRecord;
use crate::fees::FeeConfig;
use crate::utils::Address;
use tracing::{debug, trace, warn};

impl OrderBook {
    /// Fill an open order in full.
    ///
    /// The filler pays `amount_get` plus the fee in `token_get` and receives
    /// `amount_give` of `token_give`. The creator receives `amount_get` and the
    /// fee account receives the fee. Both sides are checked against their
    /// current custody balances before anything moves; on any error neither
    /// the balances nor the order change.
    pub fn fill_order(
        &mut self,
        custody: &mut CustodyLedger,
        fees: &FeeConfig,
        filler: Address,
        id: u64,
        now: u64,
    ) -> Result<TradeRecord, LedgerError> {
        trace!("Order book: {} fills order {}", filler, id);
        let trade_id = self.trade_id(id);
        let order = self
            .orders
            .get_mut(&id)
            .ok_or(LedgerError::OrderNotFound(id))?;
        ensure_open(order)?;

        let fee = fees.fee_for(order.amount_get);
        let cost = order.amount_get.saturating_add(fee);

        let filler_funds = custody.balance_of(order.token_get, filler);
        if filler_funds < cost {
            warn!(
                "Order book: {} cannot cover {} of {} for order {}",
                filler, cost, order.token_get, id
            );
            return Err(LedgerError::InsufficientBalance {
                asset: order.token_get,
                account: filler,
                required: cost,
                available: filler_funds,
            });
        }

        let creator_funds = custody.balance_of(order.token_give, order.creator);
        if creator_funds < order.amount_give {
            warn!(
                "Order book: creator {} no longer holds {} of {} for order {}",
                order.creator, order.amount_give, order.token_give, id
            );
            return Err(LedgerError::InsufficientBalance {
                asset: order.token_give,
                account: order.creator,
                required: order.amount_give,
                available: creator_funds,
            });
        }

        custody.settle(&[
            Leg {
                asset: order.token_give,
                from: order.creator,
                to: filler,
                amount: order.amount_give,
            },
            Leg {
                asset: order.token_get,
                from: filler,
                to: order.creator,
                amount: order.amount_get,
            },
            Leg {
                asset: order.token_get,
                from: filler,
                to: fees.fee_account(),
                amount: fee,
            },
        ])?;

        let trade = TradeRecord {
            id,
            trade_id,
            filler,
            token_get: order.token_get,
            amount_get: order.amount_get,
            token_give: order.token_give,
            amount_give: order.amount_give,
            creator: order.creator,
            fee,
            timestamp: now,
        };

        order.state = OrderState::Filled;
        order.closed_at = Some(now);

        debug!(
            "Order book: order {} filled by {}, fee {} of {}",
            id, filler, fee, trade.token_get
        );
        Ok(trade)
    }
}
