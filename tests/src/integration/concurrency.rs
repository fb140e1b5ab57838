//! # Concurrent Callers
//!
//! Many threads against one ledger, and against a forwarding pair, must
//! observe the same totals a serial run would.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use parking_lot::Mutex;
    use std::thread;
    use token_ledger::prelude::*;

    const LEDGER_A: Address = Address::repeat_byte(0xa1);
    const LEDGER_B: Address = Address::repeat_byte(0xb2);
    const THREADS: u8 = 8;
    const ROUNDS: usize = 200;

    fn ring() -> Vec<Address> {
        (1..=THREADS).map(Address::repeat_byte).collect()
    }

    #[test]
    fn test_parallel_transfers_keep_supply() {
        let h = LedgerHarness::new(LEDGER_A);
        let accounts = ring();
        for account in &accounts {
            h.ledger.mint(OWNER, *account, wide(1_000)).unwrap();
        }
        let supply = h.ledger.total_supply().unwrap();

        thread::scope(|s| {
            for (i, from) in accounts.iter().enumerate() {
                let to = accounts[(i + 1) % accounts.len()];
                let ledger = &h.ledger;
                s.spawn(move || {
                    for _ in 0..ROUNDS {
                        ledger.transfer(*from, to, t(1)).unwrap();
                    }
                });
            }
        });

        // Every account sent and received the same amount.
        for account in &accounts {
            assert_eq!(h.ledger.balance_of(*account).unwrap(), t(1_000));
        }
        assert_eq!(h.ledger.total_supply().unwrap(), supply);
        assert!(h.ledger.invariant_violations(true).is_empty());

        let sequences: Vec<u64> = h.events.records().iter().map(|r| r.sequence).collect();
        let expected: Vec<u64> = (0..sequences.len() as u64).collect();
        assert_eq!(sequences, expected);
    }

    #[test]
    fn test_forwarded_and_direct_callers_do_not_deadlock() {
        let old = LedgerHarness::new(LEDGER_A);
        let new = LedgerHarness::new(LEDGER_B);
        let accounts = ring();
        for account in &accounts {
            new.ledger.mint(OWNER, *account, wide(1_000)).unwrap();
        }
        wire_delegation(&old, &new).unwrap();

        thread::scope(|s| {
            for (i, from) in accounts.iter().enumerate() {
                let to = accounts[(i + 3) % accounts.len()];
                // Half the threads enter through the old ledger.
                let ledger = if i % 2 == 0 { &old.ledger } else { &new.ledger };
                s.spawn(move || {
                    for _ in 0..ROUNDS {
                        ledger.transfer(*from, to, t(1)).unwrap();
                        let _ = ledger.balance_of(to).unwrap();
                    }
                });
            }
            s.spawn(|| {
                for _ in 0..ROUNDS {
                    let _ = old.ledger.total_supply().unwrap();
                }
            });
        });

        assert_eq!(
            new.ledger.total_supply().unwrap(),
            t(1_000) * U256::from(THREADS)
        );
        assert!(new.ledger.invariant_violations(true).is_empty());
    }

    #[test]
    fn test_concurrent_mints_respect_cap() {
        let cap = t(1_000);
        let h = LedgerHarness::with_config(LEDGER_A, LedgerConfig::default().with_total_tokens(cap));
        let accounts = ring();

        let minted: usize = thread::scope(|s| {
            let handles: Vec<_> = accounts
                .iter()
                .map(|account| {
                    let ledger = &h.ledger;
                    s.spawn(move || {
                        (0..100)
                            .filter(|_| ledger.mint(OWNER, *account, wide(3)).is_ok())
                            .count()
                    })
                })
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).sum()
        });

        // 333 mints of 3 fit under a cap of 1000.
        assert_eq!(minted, 333);
        assert_eq!(h.ledger.total_supply().unwrap(), t(999));
    }

    #[test]
    fn test_mandator_switch_races_forwarded_transfers() {
        let old = LedgerHarness::new(LEDGER_A);
        let new = LedgerHarness::new(LEDGER_B);
        let accounts = ring();
        for account in &accounts {
            new.ledger.mint(OWNER, *account, wide(1_000)).unwrap();
        }
        wire_delegation(&old, &new).unwrap();
        let outcomes: Mutex<Vec<Result<()>>> = Mutex::new(Vec::new());

        thread::scope(|s| {
            for (i, from) in accounts.iter().enumerate() {
                let to = accounts[(i + 1) % accounts.len()];
                let (ledger, outcomes) = (&old.ledger, &outcomes);
                s.spawn(move || {
                    for _ in 0..ROUNDS {
                        let outcome = ledger.transfer(*from, to, t(1));
                        outcomes.lock().push(outcome);
                    }
                });
            }
            s.spawn(|| {
                for round in 0..ROUNDS {
                    let predecessor = if round % 2 == 0 { STRANGER } else { LEDGER_A };
                    new.ledger.set_delegated_from(OWNER, predecessor).unwrap();
                }
                new.ledger.set_delegated_from(OWNER, LEDGER_A).unwrap();
            });
        });

        let outcomes = outcomes.into_inner();
        let accepted = outcomes.iter().filter(|o| o.is_ok()).count();
        for outcome in &outcomes {
            if let Err(e) = outcome {
                assert_eq!(*e, LedgerError::NotDelegatedMandator { caller: LEDGER_A });
            }
        }

        // Exactly the admitted transfers reached the successor's books.
        let moved = new
            .events
            .events_for(LEDGER_B)
            .iter()
            .filter(|e| matches!(e, LedgerEvent::Transfer { from, .. } if !from.is_zero()))
            .count();
        assert_eq!(moved, accepted);
        assert_eq!(
            new.ledger.total_supply().unwrap(),
            t(1_000) * U256::from(THREADS)
        );
        assert!(new.ledger.invariant_violations(true).is_empty());
    }
}
