//! Thread-safe exchange facade over the token, custody and order ledgers.

mod config;
mod engine;
mod operations;
mod snapshot;

pub use config::ExchangeConfig;
pub use engine::Exchange;
pub use snapshot::{CustodyBalance, ExchangeSnapshot};
