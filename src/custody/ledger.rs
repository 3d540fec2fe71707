//! Per-(asset, user) custody balances and the deposit/withdraw boundary

use crate::error::LedgerError;
use crate::events::Event;
use crate::token::TokenLedger;
use crate::utils::{Address, Amount};
use std::collections::HashMap;
use tracing::{debug, trace};

/// One movement of custody funds between two users of the same asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    pub asset: Address,
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
}

/// Balances the exchange holds in escrow, keyed by (asset, user).
///
/// For each asset the sum of custody balances never exceeds the token balance
/// of the custody account: funds only enter through [`CustodyLedger::deposit`],
/// only leave through [`CustodyLedger::withdraw`], and [`CustodyLedger::settle`]
/// merely moves them between users.
#[derive(Debug, Clone)]
pub struct CustodyLedger {
    /// Account that holds the escrowed tokens on every token ledger
    account: Address,

    balances: HashMap<(Address, Address), Amount>,
}

impl CustodyLedger {
    pub fn new(account: Address) -> Self {
        Self {
            account,
            balances: HashMap::new(),
        }
    }

    /// The custody account
    pub fn account(&self) -> Address {
        self.account
    }

    /// Escrowed balance of `user` in `asset`
    pub fn balance_of(&self, asset: Address, user: Address) -> Amount {
        self.balances.get(&(asset, user)).copied().unwrap_or(0)
    }

    /// Sum of every user's escrowed balance in `asset`
    pub fn total(&self, asset: Address) -> Amount {
        self.balances
            .iter()
            .filter(|((held, _), _)| *held == asset)
            .map(|(_, amount)| *amount)
            .sum()
    }

    /// Non-zero balances as `(asset, user, amount)`
    pub fn balances(&self) -> impl Iterator<Item = (Address, Address, Amount)> + '_ {
        self.balances
            .iter()
            .map(|(&(asset, user), &amount)| (asset, user, amount))
    }

    /// Pull `amount` of `token` from `user` into custody.
    ///
    /// The user must have approved the custody account for at least `amount`.
    /// The custody account itself cannot deposit (`InvalidAddress`).
    /// Returns the token's `Transfer` record followed by the `Deposit` record.
    pub fn deposit(
        &mut self,
        token: &mut TokenLedger,
        user: Address,
        amount: Amount,
    ) -> Result<Vec<Event>, LedgerError> {
        let asset = token.address();
        trace!("Custody: deposit {} of {} from {}", amount, asset, user);
        // Custody never holds funds on its own behalf
        if user == self.account {
            return Err(LedgerError::InvalidAddress);
        }

        let transfer = token.transfer_from(self.account, user, self.account, amount)?;
        let balance = self.credit(asset, user, amount);

        debug!(
            "Custody: {} deposited {} of {}, balance {}",
            user, amount, asset, balance
        );
        Ok(vec![
            transfer,
            Event::Deposit {
                token: asset,
                user,
                amount,
                balance,
            },
        ])
    }

    /// Release `amount` of `token` from custody back to `user`.
    ///
    /// Returns the token's `Transfer` record followed by the `Withdraw` record.
    pub fn withdraw(
        &mut self,
        token: &mut TokenLedger,
        user: Address,
        amount: Amount,
    ) -> Result<Vec<Event>, LedgerError> {
        let asset = token.address();
        trace!("Custody: withdraw {} of {} to {}", amount, asset, user);
        if user == self.account {
            return Err(LedgerError::InvalidAddress);
        }

        let available = self.balance_of(asset, user);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                asset,
                account: user,
                required: amount,
                available,
            });
        }

        let transfer = token.transfer(self.account, user, amount)?;
        let balance = available - amount;
        self.store(asset, user, balance);

        debug!(
            "Custody: {} withdrew {} of {}, balance {}",
            user, amount, asset, balance
        );
        Ok(vec![
            transfer,
            Event::Withdraw {
                token: asset,
                user,
                amount,
                balance,
            },
        ])
    }

    /// Apply every leg or none of them.
    ///
    /// Legs run in order against a working copy of the touched balances; the
    /// first leg whose sender runs short aborts the whole batch.
    pub fn settle(&mut self, legs: &[Leg]) -> Result<(), LedgerError> {
        let mut working: HashMap<(Address, Address), Amount> = HashMap::new();

        for leg in legs {
            let from_key = (leg.asset, leg.from);
            let available = working
                .get(&from_key)
                .copied()
                .unwrap_or_else(|| self.balance_of(leg.asset, leg.from));
            if available < leg.amount {
                return Err(LedgerError::InsufficientBalance {
                    asset: leg.asset,
                    account: leg.from,
                    required: leg.amount,
                    available,
                });
            }
            working.insert(from_key, available - leg.amount);

            let to_key = (leg.asset, leg.to);
            let current = working
                .get(&to_key)
                .copied()
                .unwrap_or_else(|| self.balance_of(leg.asset, leg.to));
            working.insert(to_key, current + leg.amount);
        }

        for ((asset, user), amount) in working {
            self.store(asset, user, amount);
        }
        Ok(())
    }

    fn credit(&mut self, asset: Address, user: Address, amount: Amount) -> Amount {
        let balance = self.balance_of(asset, user) + amount;
        self.store(asset, user, balance);
        balance
    }

    fn store(&mut self, asset: Address, user: Address, amount: Amount) {
        if amount == 0 {
            self.balances.remove(&(asset, user));
        } else {
            self.balances.insert((asset, user), amount);
        }
    }
}
