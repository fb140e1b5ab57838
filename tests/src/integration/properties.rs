//! # Randomized Invariant Checks
//!
//! Seeded operation sequences over a small account set, checking after
//! every step that supply equals the sum of balances, holders are unique,
//! transfers conserve value, the cap holds and pause gates transfers only.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;
    use token_ledger::prelude::*;

    const LEDGER: Address = Address::repeat_byte(0xa1);
    const SEEDS: [u64; 4] = [1, 7, 42, 2024];
    const STEPS: usize = 300;

    fn sum_over_holders(h: &LedgerHarness) -> U256 {
        (0..h.ledger.get_the_number_of_holders())
            .map(|i| h.ledger.get_holder(i).unwrap())
            .map(|holder| h.ledger.balance_of(holder).unwrap())
            .fold(U256::zero(), |acc, balance| acc + balance)
    }

    fn pick(rng: &mut StdRng, accounts: &[Address]) -> Address {
        *accounts.choose(rng).unwrap()
    }

    #[test]
    fn test_supply_equals_sum_of_balances() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let h = LedgerHarness::with_config(
                LEDGER,
                LedgerConfig::default().with_total_tokens(t(10_000)),
            );
            let accounts = accounts();

            for step in 0..STEPS {
                let a = pick(&mut rng, &accounts);
                let b = pick(&mut rng, &accounts);
                let amount = rng.gen_range(0..2_000u64);
                // Failures (cap, balance) are fine; they must just keep supply equal to the balances.
                let _ = match rng.gen_range(0..3) {
                    0 => h.ledger.mint(OWNER, a, wide(amount)).map(|_| ()),
                    1 => h.ledger.transfer(a, b, t(amount)),
                    _ => h
                        .ledger
                        .transfer_from_to(OWNER, a, b, wide(amount))
                        .map(|_| ()),
                };

                assert_eq!(
                    h.ledger.total_supply().unwrap(),
                    sum_over_holders(&h),
                    "seed {seed}, step {step}"
                );
                assert!(h.ledger.total_supply().unwrap() <= h.ledger.total_tokens());
            }
            assert!(h.ledger.invariant_violations(true).is_empty());
        }
    }

    #[test]
    fn test_holders_registered_exactly_once() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let h = LedgerHarness::new(LEDGER);
            let accounts = accounts();
            let mut touched = HashSet::new();

            for _ in 0..STEPS {
                let a = pick(&mut rng, &accounts);
                let amount = t(rng.gen_range(0..100u64));
                let result = if rng.gen_bool(0.5) {
                    h.ledger.set_balance(OWNER, a, amount)
                } else {
                    h.ledger.add_balance(OWNER, a, amount).map(|_| ())
                };
                result.unwrap();
                touched.insert(a);
            }

            let holders: Vec<Address> = (0..h.ledger.get_the_number_of_holders())
                .map(|i| h.ledger.get_holder(i).unwrap())
                .collect();
            let unique: HashSet<Address> = holders.iter().copied().collect();
            assert_eq!(holders.len(), unique.len(), "seed {seed}");
            assert_eq!(unique, touched, "seed {seed}");
        }
    }

    #[test]
    fn test_transfers_conserve_value() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let h = LedgerHarness::new(LEDGER);
            let accounts = accounts();
            for account in &accounts {
                h.ledger.mint(OWNER, *account, wide(1_000)).unwrap();
            }
            let supply = h.ledger.total_supply().unwrap();

            for _ in 0..STEPS {
                let from = pick(&mut rng, &accounts);
                let to = pick(&mut rng, &accounts);
                if from == to {
                    continue;
                }
                let v = t(rng.gen_range(0..1_500u64));
                let from_before = h.ledger.balance_of(from).unwrap();
                let to_before = h.ledger.balance_of(to).unwrap();

                match h.ledger.transfer(from, to, v) {
                    Ok(()) => {
                        assert_eq!(h.ledger.balance_of(from).unwrap(), from_before - v);
                        assert_eq!(h.ledger.balance_of(to).unwrap(), to_before + v);
                    }
                    Err(LedgerError::InsufficientBalance { .. }) => {
                        assert!(v > from_before);
                        assert_eq!(h.ledger.balance_of(from).unwrap(), from_before);
                        assert_eq!(h.ledger.balance_of(to).unwrap(), to_before);
                    }
                    Err(other) => panic!("unexpected failure: {other}"),
                }
                assert_eq!(h.ledger.total_supply().unwrap(), supply);
            }
        }
    }

    #[test]
    fn test_cap_is_never_crossed() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let cap = t(1_000);
            let h = LedgerHarness::with_config(
                LEDGER,
                LedgerConfig::default().with_total_tokens(cap),
            );
            let accounts = accounts();

            for _ in 0..STEPS {
                let supply = h.ledger.total_supply().unwrap();
                let amount = t(rng.gen_range(0..300u64));
                match h.ledger.mint(OWNER, pick(&mut rng, &accounts), widen_amount(amount)) {
                    Ok(outcome) => assert_eq!(outcome.total_supply(), supply + amount),
                    Err(LedgerError::SupplyCapExceeded { .. }) => {
                        assert!(supply + amount > cap);
                    }
                    Err(other) => panic!("unexpected failure: {other}"),
                }
            }
            assert!(h.ledger.total_supply().unwrap() <= cap);
        }
    }

    #[test]
    fn test_pause_gates_only_transfers() {
        let mut rng = StdRng::seed_from_u64(5);
        let h = LedgerHarness::new(LEDGER);
        let (key, investor) = signer(1);
        h.ledger.mint(OWNER, investor, wide(1_000)).unwrap();
        h.whitelist.add_address(OWNER, investor).unwrap();
        let accounts = accounts();

        for nonce in 0..50u64 {
            let paused = rng.gen_bool(0.5);
            if paused {
                h.ledger.pause(OWNER).unwrap();
            } else {
                h.ledger.unpause(OWNER).unwrap();
            }
            let to = pick(&mut rng, &accounts);
            let artifact = h.authorize(&key, to, wide(1), nonce);
            let transfer = h.ledger.transfer_to(investor, to, wide(1), nonce, &artifact);
            let mint = h.ledger.mint(OWNER, to, wide(1));
            let admin = h.ledger.add_balance(OWNER, to, t(1));

            if paused {
                assert_eq!(transfer, Err(LedgerError::ContractPaused));
            } else {
                assert!(transfer.is_ok());
            }
            assert!(mint.is_ok());
            assert!(admin.is_ok());
        }
    }
}
