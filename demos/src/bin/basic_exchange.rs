// demos/src/bin/basic_exchange.rs

use custody_exchange::{
    Address, AddressExt, Exchange, ExchangeConfig, ExchangeSnapshot, MemoryEventLog, ONE_TOKEN,
    setup_logger,
};
use std::sync::Arc;
use tracing::{info, warn};

fn main() {
    setup_logger();
    info!("Basic Exchange Example");

    let alice = Address::from_u64(0xa11ce);
    let bob = Address::from_u64(0xb0b);
    let fee_account = Address::from_u64(0xfee);

    let log = Arc::new(MemoryEventLog::new());
    let config = match ExchangeConfig::from_json(&format!(
        r#"{{"fee_account":"{}","fee_percent":10}}"#,
        fee_account
    )) {
        Ok(config) => config,
        Err(e) => {
            warn!("Bad config: {}", e);
            return;
        }
    };
    let exchange = match Exchange::with_event_sink(config, log.clone()) {
        Ok(exchange) => exchange,
        Err(e) => {
            warn!("Could not create exchange: {}", e);
            return;
        }
    };

    let (Ok(dapp), Ok(mdai)) = (
        exchange.deploy_token(alice, "Dapp Token", "DAPP", 1_000),
        exchange.deploy_token(bob, "Mock Dai", "mDAI", 1_000),
    ) else {
        warn!("Token deployment failed");
        return;
    };

    fund(&exchange, dapp, alice, 100 * ONE_TOKEN);
    fund(&exchange, mdai, bob, 100 * ONE_TOKEN);

    // Alice sells 10 DAPP for 20 mDAI, Bob takes it
    match exchange.make_order(alice, mdai, 20 * ONE_TOKEN, dapp, 10 * ONE_TOKEN) {
        Ok(order) => {
            info!("Alice posted order {}", order.id);
            match exchange.fill_order(bob, order.id) {
                Ok(trade) => info!("Bob filled order {} as trade {}", trade.id, trade.trade_id),
                Err(e) => warn!("Fill failed: {}", e),
            }
        }
        Err(e) => warn!("Order rejected: {}", e),
    }

    // Bob cannot pay 200 mDAI plus fee
    if let Ok(order) = exchange.make_order(alice, mdai, 200 * ONE_TOKEN, dapp, ONE_TOKEN) {
        if let Err(e) = exchange.fill_order(bob, order.id) {
            info!("Fill of order {} rejected: {}", order.id, e);
        }
        if let Err(e) = exchange.cancel_order(bob, order.id) {
            info!("Bob cannot cancel order {}: {}", order.id, e);
        }
    }

    info!("Recorded {} events", log.len());
    for event in log.events() {
        info!("  {}", event.name());
    }

    let snapshot = exchange.create_snapshot();
    match snapshot.to_json() {
        Ok(json) => {
            info!("Snapshot: {}", json);
            if let Ok(restored) = ExchangeSnapshot::from_json(&json) {
                info!(
                    "Restored snapshot: {} orders, {} open",
                    restored.order_count,
                    restored.open_orders().len()
                );
            }
        }
        Err(e) => warn!("Snapshot serialization failed: {}", e),
    }
}

fn fund(exchange: &Exchange, asset: Address, user: Address, amount: u128) {
    let result = exchange
        .approve(asset, user, exchange.address(), amount)
        .and_then(|_| exchange.deposit(asset, user, amount));
    match result {
        Ok(balance) => info!("{} escrowed {} of {}", user, balance, asset),
        Err(e) => warn!("Deposit failed for {}: {}", user, e),
    }
}
