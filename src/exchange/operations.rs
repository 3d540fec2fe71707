//! Exchange operations: token transfers, custody movements and order handling

use super::engine::Exchange;
use crate::error::LedgerError;
use crate::events::{Event, TradeRecord};
use crate::orderbook::Order;
use crate::token::TokenLedger;
use crate::utils::{Address, AddressExt, Amount, current_time_millis};
use tracing::{debug, trace};
use uuid::Uuid;

impl Exchange {
    /// Deploy a new token, minting `total_supply` whole tokens to `deployer`.
    ///
    /// Returns the asset id the token is registered under.
    pub fn deploy_token(
        &self,
        deployer: Address,
        name: &str,
        symbol: &str,
        total_supply: u128,
    ) -> Result<Address, LedgerError> {
        trace!("Exchange {}: deploying token {}", self.address, symbol);
        let mut state = self.write();

        let nonce = state.deployed + 1;
        let asset = Address::from_uuid(Uuid::new_v5(&self.namespace, &nonce.to_be_bytes()));
        let token = TokenLedger::new(asset, deployer, name, symbol, total_supply)?;

        state.tokens.insert(asset, token);
        state.deployed = nonce;

        debug!("Exchange {}: deployed {} at {}", self.address, symbol, asset);
        Ok(asset)
    }

    /// Move `amount` of `asset` from `from` to `to` outside custody
    pub fn transfer(
        &self,
        asset: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let mut state = self.write();
        let event = state.token_mut(asset)?.transfer(from, to, amount)?;
        self.emit(&[event]);
        Ok(())
    }

    /// Set `spender`'s allowance over `owner`'s `asset`
    pub fn approve(
        &self,
        asset: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let mut state = self.write();
        let event = state.token_mut(asset)?.approve(owner, spender, amount)?;
        self.emit(&[event]);
        Ok(())
    }

    /// Delegated transfer of `asset` by `spender` out of `from`'s balance
    pub fn transfer_from(
        &self,
        asset: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let mut state = self.write();
        let event = state
            .token_mut(asset)?
            .transfer_from(spender, from, to, amount)?;
        self.emit(&[event]);
        Ok(())
    }

    /// Move `amount` of `asset` from `user` into custody.
    ///
    /// `user` must first approve [`Exchange::address`] for at least `amount`.
    /// Returns the user's resulting custody balance.
    pub fn deposit(
        &self,
        asset: Address,
        user: Address,
        amount: Amount,
    ) -> Result<Amount, LedgerError> {
        let mut state = self.write();
        let state = &mut *state;
        let token = state
            .tokens
            .get_mut(&asset)
            .ok_or(LedgerError::UnknownAsset(asset))?;

        let events = state.custody.deposit(token, user, amount)?;
        self.emit(&events);
        Ok(state.custody.balance_of(asset, user))
    }

    /// Return `amount` of `asset` from custody to `user`.
    ///
    /// Returns the user's resulting custody balance.
    pub fn withdraw(
        &self,
        asset: Address,
        user: Address,
        amount: Amount,
    ) -> Result<Amount, LedgerError> {
        let mut state = self.write();
        let state = &mut *state;
        let token = state
            .tokens
            .get_mut(&asset)
            .ok_or(LedgerError::UnknownAsset(asset))?;

        let events = state.custody.withdraw(token, user, amount)?;
        self.emit(&events);
        Ok(state.custody.balance_of(asset, user))
    }

    /// Post an order offering `amount_give` of `token_give` for `amount_get` of `token_get`.
    ///
    /// Both assets must be deployed on this exchange.
    pub fn make_order(
        &self,
        creator: Address,
        token_get: Address,
        amount_get: Amount,
        token_give: Address,
        amount_give: Amount,
    ) -> Result<Order, LedgerError> {
        let mut state = self.write();
        let state = &mut *state;
        for asset in [token_get, token_give] {
            if !state.tokens.contains_key(&asset) {
                return Err(LedgerError::UnknownAsset(asset));
            }
        }

        let order = state.book.make_order(
            &state.custody,
            creator,
            token_get,
            amount_get,
            token_give,
            amount_give,
            current_time_millis(),
        )?;
        self.emit(&[Event::Order(order.record(order.created_at))]);
        Ok(order)
    }

    /// Cancel an open order created by `caller`
    pub fn cancel_order(&self, caller: Address, id: u64) -> Result<Order, LedgerError> {
        let mut state = self.write();
        let now = current_time_millis();

        let order = state.book.cancel_order(caller, id, now)?;
        self.emit(&[Event::Cancel(order.record(now))]);
        Ok(order)
    }

    /// Fill an open order on behalf of `filler`
    pub fn fill_order(&self, filler: Address, id: u64) -> Result<TradeRecord, LedgerError> {
        let mut state = self.write();
        let state = &mut *state;

        let trade = state.book.fill_order(
            &mut state.custody,
            &self.fees,
            filler,
            id,
            current_time_millis(),
        )?;
        self.emit(&[Event::Trade(trade.clone())]);
        Ok(trade)
    }
}
