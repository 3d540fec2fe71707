use criterion::{BenchmarkId, Criterion};
use custody_exchange::{Address, AddressExt, Exchange, ExchangeConfig, ONE_TOKEN};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

/// Register benchmarks for traders hitting one exchange from many threads
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Exchange - Contention");

    for thread_count in [1, 2, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::new("concurrent_make_orders", thread_count),
            thread_count,
            |b, &thread_count| {
                b.iter_custom(|iters| measure_concurrent_makes(thread_count, iters));
            },
        );
    }

    // Percentage of snapshot reads among otherwise order-posting threads
    for read_ratio in [0, 50, 95].iter() {
        group.bench_with_input(
            BenchmarkId::new("read_write_ratio", read_ratio),
            read_ratio,
            |b, &read_ratio| {
                b.iter_custom(|iters| measure_read_write(8, iters, read_ratio));
            },
        );
    }

    group.finish();
}

fn trader(index: usize) -> Address {
    Address::from_u64(1_000 + index as u64)
}

fn setup(thread_count: usize, funding: u128) -> (Arc<Exchange>, Address, Address) {
    let deployer = Address::from_u64(1);
    let exchange = Exchange::with_event_sink(
        ExchangeConfig::new(Address::from_u64(2), 10),
        Arc::new(|_: &custody_exchange::Event| {}),
    )
    .expect("valid config");
    let token1 = exchange
        .deploy_token(deployer, "Dapp Token", "DAPP", u64::MAX as u128)
        .expect("deploy DAPP");
    let token2 = exchange
        .deploy_token(deployer, "Mock Dai", "mDAI", u64::MAX as u128)
        .expect("deploy mDAI");

    for index in 0..thread_count {
        let amount = funding * ONE_TOKEN;
        exchange
            .transfer(token1, deployer, trader(index), amount)
            .expect("fund trader");
        exchange
            .approve(token1, trader(index), exchange.address(), amount)
            .expect("approve custody");
        exchange
            .deposit(token1, trader(index), amount)
            .expect("deposit");
    }
    (Arc::new(exchange), token1, token2)
}

fn measure_concurrent_makes(thread_count: usize, iterations: u64) -> Duration {
    let (exchange, token1, token2) = setup(thread_count, 1);
    let barrier = Arc::new(Barrier::new(thread_count + 1));

    let handles: Vec<_> = (0..thread_count)
        .map(|index| {
            let exchange = Arc::clone(&exchange);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..iterations {
                    let _ = exchange.make_order(trader(index), token2, ONE_TOKEN, token1, 1);
                }
            })
        })
        .collect();

    barrier.wait();
    let start = Instant::now();
    for handle in handles {
        let _ = handle.join();
    }
    start.elapsed()
}

fn measure_read_write(thread_count: usize, iterations: u64, read_ratio: u64) -> Duration {
    let (exchange, token1, token2) = setup(thread_count, 1);
    let barrier = Arc::new(Barrier::new(thread_count + 1));

    let handles: Vec<_> = (0..thread_count)
        .map(|index| {
            let exchange = Arc::clone(&exchange);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..iterations {
                    if i % 100 < read_ratio {
                        let _ = exchange.custody_total(token1);
                    } else {
                        let _ = exchange.make_order(trader(index), token2, ONE_TOKEN, token1, 1);
                    }
                }
            })
        })
        .collect();

    barrier.wait();
    let start = Instant::now();
    for handle in handles {
        let _ = handle.join();
    }
    start.elapsed()
}
