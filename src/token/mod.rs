//! ERC20-style fungible token ledger.

mod ledger;

pub use ledger::{TokenInfo, TokenLedger};
