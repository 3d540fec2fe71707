
use custody_exchange::{Address, AddressExt, Exchange, ExchangeConfig, ONE_TOKEN};

pub fn register_benchmarks(c: &mut criterion::Criterion) {
    custody::register_benchmarks(c);
    make_orders::register_benchmarks(c);
    fill_orders::register_benchmarks(c);
}

pub const MAKER: u64 = 10;
pub const TAKER: u64 = 11;

/// Exchange with two tokens where MAKER and TAKER each escrow `funding` whole tokens of both
pub fn funded_exchange(funding: u128) -> (Exchange, Address, Address) {
    let deployer = Address::from_u64(1);
    let exchange = Exchange::with_event_sink(
        ExchangeConfig::new(Address::from_u64(2), 10),
        std::sync::Arc::new(|_: &custody_exchange::Event| {}),
    )
    .expect("valid config");

    let token1 = exchange
        .deploy_token(deployer, "Dapp Token", "DAPP", 1_000_000_000)
        .expect("deploy DAPP");
    let token2 = exchange
        .deploy_token(deployer, "Mock Dai", "mDAI", 1_000_000_000)
        .expect("deploy mDAI");

    for user in [Address::from_u64(MAKER), Address::from_u64(TAKER)] {
        for asset in [token1, token2] {
            let amount = funding * ONE_TOKEN;
            exchange
                .transfer(asset, deployer, user, amount)
                .expect("fund user");
            exchange
                .approve(asset, user, exchange.address(), amount)
                .expect("approve custody");
            exchange.deposit(asset, user, amount).expect("deposit");
        }
    }
    (exchange, token1, token2)
}
