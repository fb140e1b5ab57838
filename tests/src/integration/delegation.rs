//! # Delegation Flows
//!
//! Old ledgers forwarding to new ones: single hops, chains, migrations,
//! forged mandates and configuration cycles.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use token_ledger::prelude::*;

    const LEDGER_A: Address = Address::repeat_byte(0xa1);
    const LEDGER_B: Address = Address::repeat_byte(0xb2);
    const LEDGER_C: Address = Address::repeat_byte(0xc3);
    const PURCHASER: Address = Address::repeat_byte(0x02);

    #[test]
    fn test_transfer_through_old_ledger_updates_new() {
        let old = LedgerHarness::new(LEDGER_A);
        let new = LedgerHarness::new(LEDGER_B);
        let (_, investor) = signer(1);
        new.ledger.mint(OWNER, investor, wide(50)).unwrap();
        wire_delegation(&old, &new).unwrap();

        old.ledger.transfer(investor, PURCHASER, t(20)).unwrap();

        assert_eq!(new.ledger.balance_of(investor).unwrap(), t(30));
        assert_eq!(new.ledger.balance_of(PURCHASER).unwrap(), t(20));
        assert_eq!(old.ledger.balance_of(PURCHASER).unwrap(), t(20));
        assert_eq!(old.ledger.local_balance_of(PURCHASER), U256::zero());
        // The transfer event belongs to the ledger that moved the value.
        assert!(!old
            .events
            .events_for(LEDGER_A)
            .iter()
            .any(|e| matches!(e, LedgerEvent::Transfer { .. })));
    }

    #[test]
    fn test_successor_failure_is_forwarders_failure() {
        let old = LedgerHarness::new(LEDGER_A);
        let new = LedgerHarness::new(LEDGER_B);
        let (_, investor) = signer(1);
        old.ledger.mint(OWNER, investor, wide(50)).unwrap();
        wire_delegation(&old, &new).unwrap();

        // Funds live on the old ledger only; the new one has nothing to move.
        let result = old.ledger.transfer(investor, PURCHASER, t(1));
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));

        new.ledger.pause(OWNER).unwrap();
        assert_eq!(
            old.ledger.transfer(investor, PURCHASER, t(1)),
            Err(LedgerError::ContractPaused)
        );
    }

    #[test]
    fn test_migration_then_delegation() {
        let old = LedgerHarness::new(LEDGER_A);
        let new = LedgerHarness::new(LEDGER_B);
        let holders: Vec<Address> = (1..=4).map(|seed| signer(seed).1).collect();
        for (i, holder) in holders.iter().enumerate() {
            old.ledger
                .mint(OWNER, *holder, wide(10 * (i as u64 + 1)))
                .unwrap();
        }
        old.ledger.set_balance(OWNER, PURCHASER, U256::zero()).unwrap();

        let migrated = migrate_holders(&old, &new).unwrap();
        wire_delegation(&old, &new).unwrap();

        assert_eq!(migrated, 4);
        for holder in &holders {
            assert_eq!(
                old.ledger.balance_of(*holder).unwrap(),
                old.ledger.local_balance_of(*holder)
            );
        }
        assert_eq!(
            old.ledger.total_supply().unwrap(),
            old.ledger.local_total_supply()
        );
        assert!(new.ledger.invariant_violations(true).is_empty());
        assert_eq!(new.ledger.get_the_number_of_holders(), 4);
    }

    #[test]
    fn test_chain_resolves_to_last_ledger() {
        let a = LedgerHarness::new(LEDGER_A);
        let b = LedgerHarness::new(LEDGER_B);
        let c = LedgerHarness::new(LEDGER_C);
        let (_, investor) = signer(1);
        c.ledger.mint(OWNER, investor, wide(7)).unwrap();

        wire_delegation(&b, &c).unwrap();
        wire_delegation(&a, &b).unwrap();

        assert_eq!(a.ledger.balance_of(investor).unwrap(), t(7));
        assert_eq!(a.ledger.total_supply().unwrap(), t(7));

        a.ledger.transfer(investor, PURCHASER, t(2)).unwrap();
        assert_eq!(c.ledger.balance_of(PURCHASER).unwrap(), t(2));
        assert_eq!(b.ledger.local_balance_of(PURCHASER), U256::zero());
    }

    #[test]
    fn test_chain_longer_than_limit_fails() {
        let config = LedgerConfig::default().with_max_delegation_depth(1);
        let a = LedgerHarness::with_config(LEDGER_A, config.clone());
        let b = LedgerHarness::with_config(LEDGER_B, config.clone());
        let c = LedgerHarness::with_config(LEDGER_C, config);
        wire_delegation(&b, &c).unwrap();
        wire_delegation(&a, &b).unwrap();

        // One hop is fine, two are not.
        assert!(b.ledger.total_supply().is_ok());
        assert_eq!(
            a.ledger.total_supply(),
            Err(LedgerError::DelegationDepthExceeded { depth: 2, max: 1 })
        );
    }

    #[test]
    fn test_delegation_cycle_terminates() {
        let a = LedgerHarness::new(LEDGER_A);
        let b = LedgerHarness::new(LEDGER_B);
        wire_delegation(&a, &b).unwrap();
        wire_delegation(&b, &a).unwrap();

        let max = a.ledger.config().max_delegation_depth;
        assert_eq!(
            a.ledger.balance_of(PURCHASER),
            Err(LedgerError::DelegationDepthExceeded {
                depth: max + 1,
                max
            })
        );
        assert!(matches!(
            b.ledger.transfer(PURCHASER, LEDGER_C, t(1)),
            Err(LedgerError::DelegationDepthExceeded { .. })
        ));
    }

    #[test]
    fn test_only_recognised_mandator_is_served() {
        let old = LedgerHarness::new(LEDGER_A);
        let new = LedgerHarness::new(LEDGER_B);
        let (_, investor) = signer(1);
        new.ledger.mint(OWNER, investor, wide(5)).unwrap();
        wire_delegation(&old, &new).unwrap();
        let before = new.state();

        let forged = Mandate::first_hop(STRANGER);
        assert_eq!(
            new.ledger.delegate_transfer(forged, STRANGER, t(5), investor),
            Err(LedgerError::NotDelegatedMandator { caller: STRANGER })
        );
        assert_eq!(new.state(), before);

        // Re-pointing the successor at another predecessor cuts the old one off.
        new.ledger.set_delegated_from(OWNER, LEDGER_C).unwrap();
        assert_eq!(
            old.ledger.balance_of(investor),
            Err(LedgerError::NotDelegatedMandator { caller: LEDGER_A })
        );

        // Clearing the link cuts everyone off.
        new.ledger.set_delegated_from(OWNER, Address::ZERO).unwrap();
        assert_eq!(new.ledger.delegated_from(), None);
    }

    #[test]
    fn test_redelegation_and_revert() {
        let a = LedgerHarness::new(LEDGER_A);
        let b = LedgerHarness::new(LEDGER_B);
        let c = LedgerHarness::new(LEDGER_C);
        let (_, investor) = signer(1);
        a.ledger.mint(OWNER, investor, wide(1)).unwrap();
        b.ledger.mint(OWNER, investor, wide(2)).unwrap();
        c.ledger.mint(OWNER, investor, wide(3)).unwrap();
        c.ledger.set_delegated_from(OWNER, LEDGER_A).unwrap();

        wire_delegation(&a, &b).unwrap();
        assert_eq!(a.ledger.balance_of(investor).unwrap(), t(2));

        a.ledger
            .delegate_to_new_contract(OWNER, Some(c.ledger.clone()))
            .unwrap();
        assert_eq!(a.ledger.balance_of(investor).unwrap(), t(3));

        a.ledger.delegate_to_new_contract(OWNER, None).unwrap();
        assert_eq!(a.ledger.balance_of(investor).unwrap(), t(1));

        assert_eq!(
            a.events
                .events_for(LEDGER_A)
                .into_iter()
                .filter_map(|e| match e {
                    LedgerEvent::DelegateToNewContract { new_contract } => Some(new_contract),
                    _ => None,
                })
                .collect::<Vec<_>>(),
            vec![Some(LEDGER_B), Some(LEDGER_C), None]
        );
    }

    #[test]
    fn test_authorized_transfer_stays_local_when_delegated() {
        let old = LedgerHarness::new(LEDGER_A);
        let new = LedgerHarness::new(LEDGER_B);
        let (key, investor) = signer(1);
        old.ledger.mint(OWNER, investor, wide(10)).unwrap();
        old.whitelist.add_address(OWNER, investor).unwrap();
        wire_delegation(&old, &new).unwrap();

        let artifact = old.authorize(&key, PURCHASER, wide(4), 0);
        old.ledger
            .transfer_to(investor, PURCHASER, wide(4), 0, &artifact)
            .unwrap();

        assert_eq!(old.ledger.local_balance_of(PURCHASER), t(4));
        assert_eq!(new.ledger.balance_of(PURCHASER).unwrap(), U256::zero());
    }
}
