//! # Concurrent Callers
//!
//! Many tasks hitting one ledger on a multi-threaded runtime. Every call is
//! linearizable: supply always equals the sum of balances and no transfer
//! is lost or applied twice.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use proptest::prelude::*;
    use token_ledger::domain::check_all_invariants;
    use token_ledger::prelude::*;

    fn holder(i: usize) -> Address {
        Address::new([0x40 + i as u8; 20])
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_mints_sum_up() {
        let ledger = Arc::new(deploy_ledger(NoopSettlementClient));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                tokio::spawn(async move {
                    for _ in 0..100 {
                        ledger.mint(DEPLOYER, holder(i), units(1)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(ledger.total_supply(), units(800));
        for i in 0..8 {
            assert_eq!(ledger.balance_of(holder(i)), units(100));
        }
        assert_eq!(ledger.events().len(), 800);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_ring_transfers_conserve_supply() {
        let ledger = Arc::new(deploy_ledger(NoopSettlementClient));
        for i in 0..4 {
            ledger.mint(DEPLOYER, holder(i), units(50)).unwrap();
        }

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                tokio::spawn(async move {
                    let mut moved = 0u64;
                    for _ in 0..200 {
                        if ledger.transfer(holder(i), holder((i + 1) % 4), units(1)).is_ok() {
                            moved += 1;
                        }
                        tokio::task::yield_now().await;
                    }
                    moved
                })
            })
            .collect();

        let mut total_moved = 0;
        for handle in handles {
            total_moved += handle.await.unwrap();
        }

        let state = ledger.snapshot();
        assert!(check_all_invariants(&state).is_empty());
        assert_eq!(state.total_supply(), units(200));
        let transfers = ledger
            .events()
            .iter()
            .filter(|e| matches!(e, LedgerEvent::Transferred { .. }))
            .count() as u64;
        assert_eq!(transfers, total_moved);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_pause_races_transfers() {
        let ledger = Arc::new(funded_ledger(1_000));

        let mover = {
            let ledger = Arc::clone(&ledger);
            tokio::spawn(async move {
                let mut halted = 0;
                for _ in 0..500 {
                    match ledger.transfer(ALICE, BOB, Amount::one()) {
                        Ok(_) => {}
                        Err(LedgerError::ContractPaused { .. }) => halted += 1,
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                    tokio::task::yield_now().await;
                }
                halted
            })
        };
        let admin = {
            let ledger = Arc::clone(&ledger);
            tokio::spawn(async move {
                for _ in 0..50 {
                    ledger.pause(DEPLOYER).unwrap();
                    tokio::task::yield_now().await;
                    ledger.unpause(DEPLOYER).unwrap();
                    tokio::task::yield_now().await;
                }
            })
        };

        let halted: u64 = mover.await.unwrap();
        admin.await.unwrap();

        assert!(!ledger.paused());
        assert_eq!(ledger.balance_of(BOB), Amount::from(500 - halted));
        assert_eq!(ledger.balance_of(ALICE) + ledger.balance_of(BOB), units(1_000));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_threaded_transfers_conserve_supply(
            amounts in prop::collection::vec(1u64..20, 1..40)
        ) {
            let ledger = Arc::new(deploy_ledger(NoopSettlementClient));
            ledger.mint(DEPLOYER, holder(0), units(100)).unwrap();
            ledger.mint(DEPLOYER, holder(1), units(100)).unwrap();

            std::thread::scope(|scope| {
                for (n, amount) in amounts.iter().enumerate() {
                    let ledger = Arc::clone(&ledger);
                    let (from, to) = if n % 2 == 0 { (0, 1) } else { (1, 0) };
                    scope.spawn(move || {
                        let _ = ledger.transfer(holder(from), holder(to), units(*amount));
                    });
                }
            });

            prop_assert_eq!(ledger.total_supply(), units(200));
            prop_assert_eq!(
                ledger.balance_of(holder(0)) + ledger.balance_of(holder(1)),
                units(200)
            );
        }
    }
}
