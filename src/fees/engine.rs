use crate::error::LedgerError;
use crate::utils::{Address, Amount};
use serde::{Deserialize, Serialize};

/// Largest accepted fee percentage
pub const MAX_FEE_PERCENT: u8 = 100;

/// Fee owed on a fill: `floor(amount_get * fee_percent / 100)`.
///
/// Computed as `(a / 100) * p + (a % 100) * p / 100`, which equals the floored
/// product for every `u128` amount without forming `a * p`.
pub fn fee(amount_get: Amount, fee_percent: u8) -> Amount {
    let percent = fee_percent as Amount;
    (amount_get / 100)
        .saturating_mul(percent)
        .saturating_add((amount_get % 100) * percent / 100)
}

/// Fee account and percentage, fixed when the exchange is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeConfig {
    fee_account: Address,
    fee_percent: u8,
}

impl FeeConfig {
    /// Validate and build a fee configuration.
    ///
    /// The percentage must lie in `0..=100` and the fee account must not be
    /// the null address.
    pub fn new(fee_account: Address, fee_percent: u8) -> Result<Self, LedgerError> {
        if fee_percent > MAX_FEE_PERCENT {
            return Err(LedgerError::InvalidFeePercent(fee_percent));
        }
        if fee_account.is_zero() {
            return Err(LedgerError::InvalidAddress);
        }
        Ok(Self {
            fee_account,
            fee_percent,
        })
    }

    /// Account credited with every fee
    pub fn fee_account(&self) -> Address {
        self.fee_account
    }

    pub fn fee_percent(&self) -> u8 {
        self.fee_percent
    }

    /// Fee owed on a fill with the given `amount_get`
    pub fn fee_for(&self, amount_get: Amount) -> Amount {
        fee(amount_get, self.fee_percent)
    }
}
