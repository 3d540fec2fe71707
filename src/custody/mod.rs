//! Escrowed balances held by the exchange on behalf of its users.

mod ledger;

pub use ledger::{CustodyLedger, Leg};
