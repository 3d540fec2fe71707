//! Ledger and exchange error types

use crate::utils::{Address, Amount};
use std::fmt;

/// Errors raised by the token ledger, the custody ledger and the order book.
///
/// Every failed operation leaves all ledger state exactly as it was before the
/// call, so callers may correct the cause (e.g. raise an allowance) and retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A recipient or spender was the null address
    InvalidAddress,

    /// An account does not hold enough of an asset
    InsufficientBalance {
        /// Asset being debited
        asset: Address,
        /// Account being debited
        account: Address,
        /// Quantity the operation needs
        required: Amount,
        /// Quantity the account holds
        available: Amount,
    },

    /// A delegated transfer exceeds the remaining allowance
    InsufficientAllowance {
        /// Asset being transferred
        asset: Address,
        /// Account whose funds are being moved
        owner: Address,
        /// Account moving them
        spender: Address,
        /// Quantity the transfer needs
        required: Amount,
        /// Allowance left
        available: Amount,
    },

    /// No order was ever assigned this id
    OrderNotFound(u64),

    /// The caller is not allowed to act on the order
    Unauthorized {
        /// Order the caller tried to act on
        order_id: u64,
        /// The rejected caller
        caller: Address,
    },

    /// The order has already been filled
    OrderAlreadyFilled(u64),

    /// The order has already been cancelled
    OrderAlreadyCancelled(u64),

    /// No token is deployed under this asset id
    UnknownAsset(Address),

    /// Fee percentage outside `0..=100`
    InvalidFeePercent(u8),

    /// The declared whole-token supply does not fit in base units
    SupplyOverflow {
        /// Declared supply in whole tokens
        supply: u128,
    },

    /// Configuration could not be parsed or validated
    InvalidConfig {
        /// Description of the error
        message: String,
    },
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::InvalidAddress => write!(f, "Invalid address"),
            LedgerError::InsufficientBalance {
                asset,
                account,
                required,
                available,
            } => write!(
                f,
                "Insufficient balance: {} holds {} of {}, needs {}",
                account, available, asset, required
            ),
            LedgerError::InsufficientAllowance {
                asset,
                owner,
                spender,
                required,
                available,
            } => write!(
                f,
                "Transfer amount exceeds allowance: {} may move {} of {}'s {}, needs {}",
                spender, available, owner, asset, required
            ),
            LedgerError::OrderNotFound(id) => write!(f, "Order not found: {}", id),
            LedgerError::Unauthorized { order_id, caller } => {
                write!(f, "Unauthorized: {} did not create order {}", caller, order_id)
            }
            LedgerError::OrderAlreadyFilled(id) => write!(f, "Order already filled: {}", id),
            LedgerError::OrderAlreadyCancelled(id) => {
                write!(f, "Order already cancelled: {}", id)
            }
            LedgerError::UnknownAsset(asset) => write!(f, "Unknown asset: {}", asset),
            LedgerError::InvalidFeePercent(percent) => {
                write!(f, "Invalid fee percent: {} (must be 0..=100)", percent)
            }
            LedgerError::SupplyOverflow { supply } => {
                write!(f, "Supply overflow: {} tokens do not fit in base units", supply)
            }
            LedgerError::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::InvalidConfig {
            message: err.to_string(),
        }
    }
}
