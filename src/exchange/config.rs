//! Exchange configuration

use crate::error::LedgerError;
use crate::fees::FeeConfig;
use crate::utils::Address;
use serde::{Deserialize, Serialize};

/// Settings fixed when an exchange is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Account credited with every fill's fee
    pub fee_account: Address,

    /// Fee charged to fillers, as a percentage of `amount_get`
    pub fee_percent: u8,

    /// Custody account of the exchange. A fresh one is generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl ExchangeConfig {
    pub fn new(fee_account: Address, fee_percent: u8) -> Self {
        Self {
            fee_account,
            fee_percent,
            address: None,
        }
    }

    /// Use a fixed custody account instead of a generated one
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Parse a JSON document such as
    /// `{"fee_account": "0x…", "fee_percent": 10}`
    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the settings and produce the fee configuration
    pub fn validate(&self) -> Result<FeeConfig, LedgerError> {
        if self.address.is_some_and(|address| address.is_zero()) {
            return Err(LedgerError::InvalidConfig {
                message: "exchange address must not be the null address".to_string(),
            });
        }
        if self.address == Some(self.fee_account) {
            return Err(LedgerError::InvalidConfig {
                message: "fee account must differ from the exchange address".to_string(),
            });
        }
        FeeConfig::new(self.fee_account, self.fee_percent)
    }
}
