//! Ledger-wide invariants checked across mixed operation sequences

use custody_exchange::{
    Address, AddressExt, Exchange, ExchangeConfig, LedgerError, ONE_TOKEN, fees,
};

fn deployer() -> Address {
    Address::from_u64(1)
}

fn fee_account() -> Address {
    Address::from_u64(2)
}

fn user(n: u64) -> Address {
    Address::from_u64(100 + n)
}

struct Market {
    exchange: Exchange,
    token1: Address,
    token2: Address,
}

// Three funded users with 50 of each token in custody
fn setup(fee_percent: u8) -> Market {
    let exchange = Exchange::new(ExchangeConfig::new(fee_account(), fee_percent)).unwrap();
    let token1 = exchange
        .deploy_token(deployer(), "Dapp Token", "DAPP", 1_000_000)
        .unwrap();
    let token2 = exchange
        .deploy_token(deployer(), "Mock Dai", "mDAI", 1_000_000)
        .unwrap();
    for n in 0..3 {
        for asset in [token1, token2] {
            exchange
                .transfer(asset, deployer(), user(n), 100 * ONE_TOKEN)
                .unwrap();
            exchange
                .approve(asset, user(n), exchange.address(), 50 * ONE_TOKEN)
                .unwrap();
            exchange.deposit(asset, user(n), 50 * ONE_TOKEN).unwrap();
        }
    }
    Market {
        exchange,
        token1,
        token2,
    }
}

fn assert_conserved(m: &Market) {
    for asset in [m.token1, m.token2] {
        assert_eq!(
            m.exchange.custody_total(asset),
            m.exchange.token_balance_of(asset, m.exchange.address()),
            "custody total must match the tokens held by the exchange"
        );
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    #[test]
    fn test_fills_never_change_custody_totals() {
        let m = setup(10);
        let totals = (
            m.exchange.custody_total(m.token1),
            m.exchange.custody_total(m.token2),
        );

        for i in 1..=6u128 {
            let creator = user((i % 3) as u64);
            let filler = user(((i + 1) % 3) as u64);
            let id = m
                .exchange
                .make_order(creator, m.token2, i * ONE_TOKEN / 3, m.token1, i * ONE_TOKEN / 7)
                .unwrap()
                .id;
            m.exchange.fill_order(filler, id).unwrap();

            assert_eq!(
                (
                    m.exchange.custody_total(m.token1),
                    m.exchange.custody_total(m.token2)
                ),
                totals
            );
            assert_conserved(&m);
        }
    }

    #[test]
    fn test_deposit_and_withdraw_move_totals_by_amount() {
        let m = setup(10);
        let before = m.exchange.custody_total(m.token1);

        m.exchange
            .withdraw(m.token1, user(0), 7 * ONE_TOKEN)
            .unwrap();
        assert_eq!(m.exchange.custody_total(m.token1), before - 7 * ONE_TOKEN);

        m.exchange
            .approve(m.token1, user(0), m.exchange.address(), 3 * ONE_TOKEN)
            .unwrap();
        m.exchange.deposit(m.token1, user(0), 3 * ONE_TOKEN).unwrap();
        assert_eq!(m.exchange.custody_total(m.token1), before - 4 * ONE_TOKEN);
        assert_conserved(&m);
    }

    #[test]
    fn test_round_trip_restores_balances() {
        let m = setup(10);
        let who = user(1);
        let token_before = m.exchange.token_balance_of(m.token2, who);
        let custody_before = m.exchange.balance_of(m.token2, who);

        m.exchange
            .approve(m.token2, who, m.exchange.address(), 12 * ONE_TOKEN)
            .unwrap();
        m.exchange.deposit(m.token2, who, 12 * ONE_TOKEN).unwrap();
        m.exchange.withdraw(m.token2, who, 12 * ONE_TOKEN).unwrap();

        assert_eq!(m.exchange.token_balance_of(m.token2, who), token_before);
        assert_eq!(m.exchange.balance_of(m.token2, who), custody_before);
    }

    #[test]
    fn test_terminal_states_reject_everyone() {
        let m = setup(10);
        let filled = m
            .exchange
            .make_order(user(0), m.token2, ONE_TOKEN, m.token1, ONE_TOKEN)
            .unwrap()
            .id;
        let cancelled = m
            .exchange
            .make_order(user(0), m.token2, ONE_TOKEN, m.token1, ONE_TOKEN)
            .unwrap()
            .id;
        m.exchange.fill_order(user(1), filled).unwrap();
        m.exchange.cancel_order(user(0), cancelled).unwrap();

        for n in 0..3 {
            assert_eq!(
                m.exchange.fill_order(user(n), filled),
                Err(LedgerError::OrderAlreadyFilled(filled))
            );
            assert_eq!(
                m.exchange.fill_order(user(n), cancelled),
                Err(LedgerError::OrderAlreadyCancelled(cancelled))
            );
        }
        assert_eq!(
            m.exchange.cancel_order(user(0), filled),
            Err(LedgerError::OrderAlreadyFilled(filled))
        );
        assert_eq!(
            m.exchange.cancel_order(user(0), cancelled),
            Err(LedgerError::OrderAlreadyCancelled(cancelled))
        );
    }

    #[test]
    fn test_only_creator_may_cancel_in_any_state() {
        let m = setup(10);
        let open = m
            .exchange
            .make_order(user(0), m.token2, ONE_TOKEN, m.token1, ONE_TOKEN)
            .unwrap()
            .id;
        let filled = m
            .exchange
            .make_order(user(0), m.token2, ONE_TOKEN, m.token1, ONE_TOKEN)
            .unwrap()
            .id;
        m.exchange.fill_order(user(2), filled).unwrap();

        for id in [open, filled] {
            for n in 1..3 {
                assert!(matches!(
                    m.exchange.cancel_order(user(n), id),
                    Err(LedgerError::Unauthorized { order_id, caller })
                        if order_id == id && caller == user(n)
                ));
            }
            assert!(matches!(
                m.exchange.cancel_order(fee_account(), id),
                Err(LedgerError::Unauthorized { .. })
            ));
        }
        assert!(m.exchange.order(open).is_some_and(|o| o.is_open()));
    }

    #[test]
    fn test_fee_is_exact_for_every_percentage() {
        for percent in [0u8, 1, 3, 10, 25, 100] {
            let m = setup(percent);
            let amount_get = 7 * ONE_TOKEN + 13;
            let expected_fee = fees::fee(amount_get, percent);
            let creator = user(0);
            let filler = user(1);
            let before = (
                m.exchange.balance_of(m.token2, creator),
                m.exchange.balance_of(m.token2, filler),
                m.exchange.balance_of(m.token2, fee_account()),
            );

            let id = m
                .exchange
                .make_order(creator, m.token2, amount_get, m.token1, ONE_TOKEN)
                .unwrap()
                .id;
            let trade = m.exchange.fill_order(filler, id).unwrap();

            assert_eq!(trade.fee, expected_fee);
            assert_eq!(expected_fee, amount_get * percent as u128 / 100);
            assert_eq!(
                m.exchange.balance_of(m.token2, creator),
                before.0 + amount_get
            );
            assert_eq!(
                m.exchange.balance_of(m.token2, filler),
                before.1 - amount_get - expected_fee
            );
            assert_eq!(
                m.exchange.balance_of(m.token2, fee_account()),
                before.2 + expected_fee
            );
        }
    }

    #[test]
    fn test_failed_operations_leave_state_untouched() {
        let m = setup(10);
        let id = m
            .exchange
            .make_order(user(0), m.token2, 60 * ONE_TOKEN, m.token1, ONE_TOKEN)
            .unwrap()
            .id;
        let snapshot = m.exchange.create_snapshot();

        assert!(m.exchange.fill_order(user(1), id).is_err());
        assert!(m.exchange.withdraw(m.token1, user(1), 51 * ONE_TOKEN).is_err());
        assert!(m.exchange.deposit(m.token1, user(1), ONE_TOKEN).is_err());
        assert!(
            m.exchange
                .make_order(user(2), m.token1, ONE_TOKEN, m.token2, 51 * ONE_TOKEN)
                .is_err()
        );
        assert!(m.exchange.cancel_order(user(1), id).is_err());

        let after = m.exchange.create_snapshot();
        assert_eq!(after.orders, snapshot.orders);
        assert_eq!(after.balances, snapshot.balances);
        assert_eq!(after.order_count, snapshot.order_count);
        assert_conserved(&m);
    }

    #[test]
    fn test_custody_account_self_deposit_is_rejected() {
        let m = setup(10);
        let custody = m.exchange.address();
        m.exchange
            .transfer(m.token1, deployer(), custody, 5 * ONE_TOKEN)
            .unwrap();

        for _ in 0..3 {
            m.exchange
                .approve(m.token1, custody, custody, 5 * ONE_TOKEN)
                .unwrap();
            assert_eq!(
                m.exchange.deposit(m.token1, custody, 5 * ONE_TOKEN),
                Err(LedgerError::InvalidAddress)
            );
            assert_conserved(&m);
        }

        assert_eq!(m.exchange.balance_of(m.token1, custody), 0);
        assert!(
            m.exchange
                .make_order(custody, m.token2, ONE_TOKEN, m.token1, ONE_TOKEN)
                .is_err()
        );
        assert!(m.exchange.withdraw(m.token1, custody, ONE_TOKEN).is_err());
        assert_conserved(&m);
    }

    #[test]
    fn test_same_asset_fills_conserve_totals() {
        let m = setup(10);
        let total = m.exchange.custody_total(m.token1);

        for (creator, filler) in [(0, 1), (1, 2), (2, 2)] {
            let id = m
                .exchange
                .make_order(user(creator), m.token1, 3 * ONE_TOKEN, m.token1, 2 * ONE_TOKEN)
                .unwrap()
                .id;
            m.exchange.fill_order(user(filler), id).unwrap();
            assert_eq!(m.exchange.custody_total(m.token1), total);
            assert_conserved(&m);
        }

        assert_eq!(
            m.exchange.balance_of(m.token1, fee_account()),
            3 * fees::fee(3 * ONE_TOKEN, 10)
        );
    }
}
