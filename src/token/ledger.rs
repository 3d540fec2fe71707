//! Balance and allowance bookkeeping for a single fungible token

use crate::error::LedgerError;
use crate::events::Event;
use crate::utils::{Address, Amount, DECIMALS, to_base_units};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

/// Static metadata of a deployed token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Asset id the token is deployed under
    pub address: Address,
    /// Human-readable name
    pub name: String,
    /// Ticker symbol
    pub symbol: String,
    /// Fractional decimal digits of the base unit
    pub decimals: u8,
    /// Total supply in base units
    pub total_supply: Amount,
}

/// Balances and delegated-transfer allowances of one token.
///
/// Every mutating method either applies its whole effect and returns the
/// resulting event record, or returns an error and changes nothing.
#[derive(Debug, Clone)]
pub struct TokenLedger {
    info: TokenInfo,

    /// Base-unit balance per owner; absent means zero
    balances: HashMap<Address, Amount>,

    /// Remaining allowance keyed by (owner, spender)
    allowances: HashMap<(Address, Address), Amount>,
}

impl TokenLedger {
    /// Deploy a token, minting `total_supply` whole tokens to `deployer`.
    pub fn new(
        address: Address,
        deployer: Address,
        name: &str,
        symbol: &str,
        total_supply: u128,
    ) -> Result<Self, LedgerError> {
        let supply = to_base_units(total_supply).ok_or(LedgerError::SupplyOverflow {
            supply: total_supply,
        })?;

        let mut balances = HashMap::new();
        if supply > 0 {
            balances.insert(deployer, supply);
        }

        trace!(
            "Token {} ({}): minted {} base units to {}",
            symbol, address, supply, deployer
        );

        Ok(Self {
            info: TokenInfo {
                address,
                name: name.to_string(),
                symbol: symbol.to_string(),
                decimals: DECIMALS,
                total_supply: supply,
            },
            balances,
            allowances: HashMap::new(),
        })
    }

    /// Asset id of this token
    pub fn address(&self) -> Address {
        self.info.address
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn symbol(&self) -> &str {
        &self.info.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.info.decimals
    }

    /// Total supply in base units
    pub fn total_supply(&self) -> Amount {
        self.info.total_supply
    }

    /// Token metadata
    pub fn info(&self) -> &TokenInfo {
        &self.info
    }

    /// Balance of `owner` in base units
    pub fn balance_of(&self, owner: Address) -> Amount {
        self.balances.get(&owner).copied().unwrap_or(0)
    }

    /// Remaining quantity `spender` may move out of `owner`'s balance
    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances.get(&(owner, spender)).copied().unwrap_or(0)
    }

    /// Move `amount` from `from` to `to`
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<Event, LedgerError> {
        trace!(
            "Token {}: transfer {} from {} to {}",
            self.info.symbol, amount, from, to
        );
        if to.is_zero() {
            return Err(LedgerError::InvalidAddress);
        }
        self.ensure_balance(from, amount)?;

        self.move_balance(from, to, amount);
        Ok(Event::Transfer {
            token: self.info.address,
            from,
            to,
            amount,
        })
    }

    /// Set the allowance of `spender` over `owner`'s balance, replacing any previous value
    pub fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<Event, LedgerError> {
        trace!(
            "Token {}: {} approves {} for {}",
            self.info.symbol, owner, spender, amount
        );
        if spender.is_zero() {
            return Err(LedgerError::InvalidAddress);
        }

        if amount == 0 {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
        Ok(Event::Approval {
            token: self.info.address,
            owner,
            spender,
            amount,
        })
    }

    /// Move `amount` from `from` to `to` on behalf of `spender`, consuming allowance
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<Event, LedgerError> {
        trace!(
            "Token {}: {} moves {} from {} to {}",
            self.info.symbol, spender, amount, from, to
        );
        if to.is_zero() {
            return Err(LedgerError::InvalidAddress);
        }
        let allowance = self.allowance(from, spender);
        if allowance < amount {
            return Err(LedgerError::InsufficientAllowance {
                asset: self.info.address,
                owner: from,
                spender,
                required: amount,
                available: allowance,
            });
        }
        self.ensure_balance(from, amount)?;

        let remaining = allowance - amount;
        if remaining == 0 {
            self.allowances.remove(&(from, spender));
        } else {
            self.allowances.insert((from, spender), remaining);
        }
        self.move_balance(from, to, amount);

        Ok(Event::Transfer {
            token: self.info.address,
            from,
            to,
            amount,
        })
    }

    fn ensure_balance(&self, account: Address, amount: Amount) -> Result<(), LedgerError> {
        let available = self.balance_of(account);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                asset: self.info.address,
                account,
                required: amount,
                available,
            });
        }
        Ok(())
    }

    /// Caller has already checked that `from` holds `amount`. Credits cannot
    /// overflow because every balance is bounded by the total supply.
    fn move_balance(&mut self, from: Address, to: Address, amount: Amount) {
        let debited = self.balance_of(from) - amount;
        if debited == 0 {
            self.balances.remove(&from);
        } else {
            self.balances.insert(from, debited);
        }
        *self.balances.entry(to).or_insert(0) += amount;
    }
}
