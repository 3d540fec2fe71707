//! Core Exchange state and read access

use super::config::ExchangeConfig;
use super::snapshot::{CustodyBalance, ExchangeSnapshot};
use crate::custody::CustodyLedger;
use crate::error::LedgerError;
use crate::events::{Event, EventSink, TracingEventSink};
use crate::fees::FeeConfig;
use crate::orderbook::{Order, OrderBook, OrderState};
use crate::token::{TokenInfo, TokenLedger};
use crate::utils::{Address, AddressExt, Amount, current_time_millis};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;
use uuid::Uuid;

/// Every table the exchange mutates. Held behind one lock so a reader never
/// sees half of a multi-leg operation.
pub(super) struct LedgerState {
    /// Deployed tokens keyed by asset id
    pub(super) tokens: HashMap<Address, TokenLedger>,

    pub(super) custody: CustodyLedger,

    pub(super) book: OrderBook,

    /// Number of tokens deployed so far, used to derive asset ids
    pub(super) deployed: u64,
}

impl LedgerState {
    pub(super) fn token_mut(&mut self, asset: Address) -> Result<&mut TokenLedger, LedgerError> {
        self.tokens
            .get_mut(&asset)
            .ok_or(LedgerError::UnknownAsset(asset))
    }
}

/// A custodial exchange: a registry of tokens, the escrow ledger the exchange
/// keeps on its users' behalf, and the order book that trades escrowed funds.
///
/// Mutations run one at a time under a write guard and are all-or-nothing.
/// Reads share a read guard and always see committed state. Each successful
/// mutation forwards its event records to the configured [`EventSink`].
pub struct Exchange {
    /// Custody account holding escrowed tokens
    pub(super) address: Address,

    pub(super) fees: FeeConfig,

    /// Namespace for asset ids and trade ids
    pub(super) namespace: Uuid,

    pub(super) state: RwLock<LedgerState>,

    pub(super) sink: Arc<dyn EventSink>,
}

impl fmt::Debug for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exchange")
            .field("address", &self.address)
            .field("fees", &self.fees)
            .finish_non_exhaustive()
    }
}

impl Exchange {
    /// Create an exchange that logs its events through `tracing`
    pub fn new(config: ExchangeConfig) -> Result<Self, LedgerError> {
        Self::with_event_sink(config, Arc::new(TracingEventSink))
    }

    /// Create an exchange that forwards its events to `sink`
    pub fn with_event_sink(
        config: ExchangeConfig,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, LedgerError> {
        let fees = config.validate()?;
        let namespace = Uuid::new_v4();
        let address = config
            .address
            .unwrap_or_else(|| Address::from_uuid(namespace));

        trace!(
            "Exchange {}: created with fee account {} at {}%",
            address,
            fees.fee_account(),
            fees.fee_percent()
        );

        Ok(Self {
            address,
            fees,
            namespace,
            state: RwLock::new(LedgerState {
                tokens: HashMap::new(),
                custody: CustodyLedger::new(address),
                book: OrderBook::new(namespace),
                deployed: 0,
            }),
            sink,
        })
    }

    /// The custody account users approve before depositing
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn fee_account(&self) -> Address {
        self.fees.fee_account()
    }

    pub fn fee_percent(&self) -> u8 {
        self.fees.fee_percent()
    }

    /// Metadata of the token deployed under `asset`
    pub fn token_info(&self, asset: Address) -> Option<TokenInfo> {
        self.read().tokens.get(&asset).map(|token| token.info().clone())
    }

    /// Metadata of every deployed token
    pub fn tokens(&self) -> Vec<TokenInfo> {
        let state = self.read();
        let mut tokens: Vec<TokenInfo> = state
            .tokens
            .values()
            .map(|token| token.info().clone())
            .collect();
        tokens.sort_by_key(|info| info.address);
        tokens
    }

    /// Token balance of `owner` outside custody
    pub fn token_balance_of(&self, asset: Address, owner: Address) -> Amount {
        self.read()
            .tokens
            .get(&asset)
            .map_or(0, |token| token.balance_of(owner))
    }

    /// Remaining allowance of `spender` over `owner`'s tokens
    pub fn allowance(&self, asset: Address, owner: Address, spender: Address) -> Amount {
        self.read()
            .tokens
            .get(&asset)
            .map_or(0, |token| token.allowance(owner, spender))
    }

    /// Escrowed balance of `user` in `asset`
    pub fn balance_of(&self, asset: Address, user: Address) -> Amount {
        self.read().custody.balance_of(asset, user)
    }

    /// Sum of every user's escrowed balance in `asset`
    pub fn custody_total(&self, asset: Address) -> Amount {
        self.read().custody.total(asset)
    }

    /// Number of orders ever created, which is also the latest order id
    pub fn order_count(&self) -> u64 {
        self.read().book.order_count()
    }

    pub fn order(&self, id: u64) -> Option<Order> {
        self.read().book.order(id).cloned()
    }

    pub fn orders_filled(&self, id: u64) -> bool {
        self.read().book.is_filled(id)
    }

    pub fn orders_cancelled(&self, id: u64) -> bool {
        self.read().book.is_cancelled(id)
    }

    pub fn open_orders(&self) -> Vec<Order> {
        self.orders_in_state(OrderState::Open)
    }

    pub fn filled_orders(&self) -> Vec<Order> {
        self.orders_in_state(OrderState::Filled)
    }

    pub fn cancelled_orders(&self) -> Vec<Order> {
        self.orders_in_state(OrderState::Cancelled)
    }

    fn orders_in_state(&self, state: OrderState) -> Vec<Order> {
        self.read()
            .book
            .orders_in_state(state)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Point-in-time copy of the exchange state
    pub fn create_snapshot(&self) -> ExchangeSnapshot {
        let state = self.read();

        let mut balances: Vec<CustodyBalance> = state
            .custody
            .balances()
            .map(|(asset, user, amount)| CustodyBalance {
                asset,
                user,
                amount,
            })
            .collect();
        balances.sort_by_key(|entry| (entry.asset, entry.user));

        let mut tokens: Vec<TokenInfo> = state
            .tokens
            .values()
            .map(|token| token.info().clone())
            .collect();
        tokens.sort_by_key(|info| info.address);

        ExchangeSnapshot {
            address: self.address,
            timestamp: current_time_millis(),
            fee_account: self.fees.fee_account(),
            fee_percent: self.fees.fee_percent(),
            order_count: state.book.order_count(),
            tokens,
            orders: state.book.orders().cloned().collect(),
            balances,
        }
    }

    pub(super) fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Forward committed records to the sink. Called with the write guard held.
    pub(super) fn emit(&self, events: &[Event]) {
        for event in events {
            self.sink.emit(event);
        }
    }
}
