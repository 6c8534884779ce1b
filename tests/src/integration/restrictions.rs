//! # Bank-Side Restriction Integration
//!
//! The bank module consulting a live ledger before moving its `erc20:`
//! denom, both directly and through ABI view calls.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use token_ledger::prelude::*;

    /// Bank module's view of a set of deployed ledgers.
    struct Chain<'a> {
        ledgers: Vec<&'a TokenLedger<NoopSettlementClient>>,
    }

    impl ViewCaller for Chain<'_> {
        fn view_call(&self, contract: Address, input: &[u8]) -> Result<Vec<u8>, StatusQueryError> {
            self.ledgers
                .iter()
                .find(|l| l.contract_address() == contract)
                .ok_or(StatusQueryError::UnknownContract(contract))?
                .view_call(contract, input)
        }
    }

    #[test]
    fn test_hook_follows_ledger_state() {
        let ledger = funded_ledger(10);
        let denom = ledger.erc20_denom().to_string();

        assert!(check_denom_restrictions(&denom, Some(ALICE), Some(BOB), &ledger).is_ok());

        ledger.blacklist(DEPLOYER, ALICE).unwrap();
        let err = check_denom_restrictions(&denom, Some(ALICE), Some(BOB), &ledger).unwrap_err();
        assert_eq!(
            err,
            RestrictionError::SenderBlacklisted {
                account: ALICE,
                contract: ledger.contract_address()
            }
        );
        assert!(err.is_restricted());

        ledger.unblacklist(DEPLOYER, ALICE).unwrap();
        ledger.pause(DEPLOYER).unwrap();
        assert!(matches!(
            check_denom_restrictions(&denom, Some(ALICE), Some(BOB), &ledger),
            Err(RestrictionError::Paused { .. })
        ));

        // Native denoms never consult the ledger
        assert!(check_denom_restrictions("inj", Some(ALICE), Some(BOB), &ledger).is_ok());
    }

    #[test]
    fn test_hook_through_view_calls() {
        let usdc = funded_ledger(10);
        let (other, _) = TokenLedger::deploy(
            LedgerConfig::default(),
            DEPLOYER,
            1,
            Arc::new(NoopSettlementClient),
        )
        .unwrap();
        assert_ne!(other.contract_address(), usdc.contract_address());
        usdc.blacklist(DEPLOYER, BOB).unwrap();

        let chain = Chain {
            ledgers: vec![&usdc, &other],
        };
        let reader = EvmStatusReader::new(chain);

        let usdc_denom = usdc.erc20_denom().to_string();
        assert!(matches!(
            check_denom_restrictions(&usdc_denom, Some(ALICE), Some(BOB), &reader),
            Err(RestrictionError::RecipientBlacklisted { account: BOB, .. })
        ));
        assert!(check_denom_restrictions(&usdc_denom, Some(ALICE), None, &reader).is_ok());

        // Uppercase hex in the denom resolves to the same ledger
        let upper = format!("erc20:0x{}", usdc.contract_address().to_hex()[2..].to_uppercase());
        assert!(check_denom_restrictions(&upper, None, Some(BOB), &reader).is_err());
    }

    #[test]
    fn test_unknown_contract_fails_open() {
        let ledger = funded_ledger(1);
        ledger.pause(DEPLOYER).unwrap();
        let reader = EvmStatusReader::new(Chain {
            ledgers: vec![&ledger],
        });

        let stranger = "erc20:0x00000000000000000000000000000000000000ee";
        assert!(check_denom_restrictions(stranger, Some(ALICE), Some(BOB), &reader).is_ok());
    }

    #[test]
    fn test_malformed_denom_rejected() {
        let ledger = funded_ledger(1);
        assert!(matches!(
            check_denom_restrictions("erc20:not-an-address", None, None, &ledger),
            Err(RestrictionError::InvalidDenom(_))
        ));
    }
}
