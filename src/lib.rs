//! # Custodial Token Exchange
//!
//! A custodial token ledger coupled to an on-demand order exchange. Users hold
//! fungible tokens on ERC20-style ledgers, deposit them into the exchange's
//! escrow, post orders offering one token for another, and other users fill
//! those orders. Every fill pays a protocol fee to a fixed fee account.
//!
//! ## Components
//!
//! - **[`TokenLedger`]**: balances and delegated-transfer allowances of one token.
//!   Quantities are `u128` base units with 18 fractional decimal digits.
//!
//! - **[`CustodyLedger`]**: balances the exchange holds on each user's behalf,
//!   keyed by (asset, user). Funds enter through `deposit`, which pulls tokens
//!   with `transfer_from` against an allowance the user granted to the exchange,
//!   and leave through `withdraw`.
//!
//! - **[`fees`]**: the fee owed on a fill, `floor(amount_get * fee_percent / 100)`.
//!
//! - **[`OrderBook`]**: order lifecycle. Orders move from `Open` to either
//!   `Filled` or `Cancelled`; both are terminal. A fill settles three custody
//!   legs at once (give leg to the filler, get leg to the creator, fee leg to
//!   the fee account) or none of them.
//!
//! - **[`Exchange`]**: the thread-safe facade tying the above together. All
//!   tables live behind one lock; mutations are applied one at a time and
//!   readers always observe committed state. Event records go to an injected
//!   [`EventSink`] after each successful mutation.
//!
//! ## Example
//!
//! ```rust
//! use custody_exchange::{Address, AddressExt, Exchange, ExchangeConfig, ONE_TOKEN};
//!
//! let deployer = Address::from_u64(1);
//! let fee_account = Address::from_u64(2);
//! let exchange = Exchange::new(ExchangeConfig::new(fee_account, 10)).unwrap();
//!
//! let dapp = exchange.deploy_token(deployer, "Dapp Token", "DAPP", 1_000_000).unwrap();
//! exchange.approve(dapp, deployer, exchange.address(), 10 * ONE_TOKEN).unwrap();
//! exchange.deposit(dapp, deployer, 10 * ONE_TOKEN).unwrap();
//!
//! assert_eq!(exchange.balance_of(dapp, deployer), 10 * ONE_TOKEN);
//! ```
//!
//! ## Fills and over-commitment
//!
//! Creating an order checks that the creator holds `amount_give` in custody but
//! does not reserve it, so a creator may post several orders backed by the
//! same funds. A fill checks both parties against their current balances and
//! fails with `InsufficientBalance`, leaving the order open, when either side
//! can no longer pay.

pub mod custody;
pub mod error;
pub mod events;
pub mod exchange;
pub mod fees;
pub mod orderbook;
pub mod token;

mod utils;

pub use custody::CustodyLedger;
pub use error::LedgerError;
pub use events::{Event, EventSink, MemoryEventLog, OrderRecord, TracingEventSink, TradeRecord};
pub use exchange::{CustodyBalance, Exchange, ExchangeConfig, ExchangeSnapshot};
pub use fees::FeeConfig;
pub use orderbook::{Order, OrderBook, OrderState};
pub use token::{TokenInfo, TokenLedger};
pub use utils::{
    Address, AddressExt, Amount, DECIMALS, ONE_TOKEN, current_time_millis, format_units,
    setup_logger, to_base_units,
};
