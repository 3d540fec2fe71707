// demos/src/bin/seed_exchange.rs

use custody_exchange::{
    Address, AddressExt, Exchange, ExchangeConfig, LedgerError, format_units, setup_logger,
    to_base_units,
};
use tracing::{error, info};

const FEE_PERCENT: u8 = 10;

fn main() {
    setup_logger();
    info!("Seeding exchange");

    if let Err(e) = seed() {
        error!("Seeding failed: {}", e);
        std::process::exit(1);
    }
}

fn to_wei(whole: u128) -> u128 {
    to_base_units(whole).unwrap_or(u128::MAX)
}

fn seed() -> Result<(), LedgerError> {
    let user1 = Address::from_u64(1);
    let user2 = Address::from_u64(2);
    let fee_account = Address::from_u64(3);

    let exchange = Exchange::new(ExchangeConfig::new(fee_account, FEE_PERCENT))?;
    info!("Exchange created at {}", exchange.address());

    // user1 deploys all three tokens
    let dapp = exchange.deploy_token(user1, "Dapp Token", "DAPP", 1_000_000)?;
    info!("DApp Token deployed: {}", dapp);
    let meth = exchange.deploy_token(user1, "mETH", "mETH", 1_000_000)?;
    info!("mETH Token deployed: {}", meth);
    let mdai = exchange.deploy_token(user1, "mDAI", "mDAI", 1_000_000)?;
    info!("mDAI Token deployed: {}", mdai);

    let amount = to_wei(10_000);
    exchange.transfer(meth, user1, user2, amount)?;
    info!("Transferred {} mETH from {} to {}", format_units(amount), user1, user2);

    exchange.approve(dapp, user1, exchange.address(), amount)?;
    exchange.deposit(dapp, user1, amount)?;
    info!("Deposited {} DApp from {}", format_units(amount), user1);

    exchange.approve(meth, user2, exchange.address(), amount)?;
    exchange.deposit(meth, user2, amount)?;
    info!("Deposited {} mETH from {}", format_units(amount), user2);

    // A cancelled order
    let order = exchange.make_order(user1, meth, to_wei(100), dapp, to_wei(5))?;
    info!("Made order {} from {}", order.id, user1);
    exchange.cancel_order(user1, order.id)?;
    info!("Cancelled order {} from {}", order.id, user1);

    // Three filled orders
    for (get, give) in [(100, 10), (50, 15), (200, 20)] {
        let order = exchange.make_order(user1, meth, to_wei(get), dapp, to_wei(give))?;
        info!("Made order {} from {}", order.id, user1);
        let trade = exchange.fill_order(user2, order.id)?;
        info!(
            "Filled order {} from {}, fee {} mETH",
            trade.id,
            user2,
            format_units(trade.fee)
        );
    }

    // Open orders on both sides
    for i in 1..=10 {
        let order = exchange.make_order(user1, meth, to_wei(10 * i), dapp, to_wei(10))?;
        info!("Made order {} from {}", order.id, user1);
    }
    for i in 1..=10 {
        let order = exchange.make_order(user2, dapp, to_wei(10), meth, to_wei(10 * i))?;
        info!("Made order {} from {}", order.id, user2);
    }

    info!(
        "Seeded {} orders: {} open, {} filled, {} cancelled",
        exchange.order_count(),
        exchange.open_orders().len(),
        exchange.filled_orders().len(),
        exchange.cancelled_orders().len()
    );
    for (label, user) in [("user1", user1), ("user2", user2), ("fee", fee_account)] {
        info!(
            "{} custody: {} DApp, {} mETH",
            label,
            format_units(exchange.balance_of(dapp, user)),
            format_units(exchange.balance_of(meth, user))
        );
    }
    Ok(())
}
