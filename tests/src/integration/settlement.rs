//! # Settlement Bridge Integration
//!
//! The ledger registering its metadata with the bank module:
//!
//! 1. Through the ABI-level precompile client against a simulated precompile
//! 2. Through the in-memory keeper, including outage and timeout recovery
//! 3. Deployment record produced alongside the ledger

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::time::Duration;
    use token_ledger::adapters::encode_set_metadata;
    use token_ledger::prelude::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Precompile that decodes `setMetadata` and keeps what it was sent.
    #[derive(Default)]
    struct SimulatedBankPrecompile {
        registered: Mutex<Vec<(Address, Address, String, String, u8)>>,
        refuse: bool,
    }

    fn read_word(data: &[u8], offset: usize) -> usize {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&data[offset + 24..offset + 32]);
        u64::from_be_bytes(buf) as usize
    }

    fn read_string(args: &[u8], offset: usize) -> String {
        let len = read_word(args, offset);
        String::from_utf8(args[offset + 32..offset + 32 + len].to_vec()).unwrap()
    }

    #[async_trait]
    impl PrecompileCaller for SimulatedBankPrecompile {
        async fn call(
            &self,
            precompile: Address,
            caller: Address,
            input: Vec<u8>,
        ) -> Result<Vec<u8>, SettlementError> {
            let args = &input[4..];
            let name = read_string(args, read_word(args, 0));
            let symbol = read_string(args, read_word(args, 32));
            let decimals = read_word(args, 64) as u8;
            self.registered
                .lock()
                .push((precompile, caller, name, symbol, decimals));

            let mut reply = vec![0u8; 32];
            reply[31] = u8::from(!self.refuse);
            Ok(reply)
        }
    }

    // =============================================================================
    // PRECOMPILE CLIENT
    // =============================================================================

    #[tokio::test]
    async fn test_metadata_reaches_precompile_from_contract() -> anyhow::Result<()> {
        let config = LedgerConfig::default();
        let client = BankPrecompileClient::from_config(SimulatedBankPrecompile::default(), &config.settlement)?;
        let ledger = deploy_ledger_with(config, client);

        ledger.initialize_metadata(DEPLOYER).await?;

        let registered = ledger.settlement().transport().registered.lock().clone();
        assert_eq!(
            registered,
            vec![(
                BANK_PRECOMPILE_ADDRESS,
                ledger.contract_address(),
                "MyUSDC".to_string(),
                "mUSDC".to_string(),
                6
            )]
        );
        assert!(ledger.is_metadata_initialized());
        Ok(())
    }

    #[tokio::test]
    async fn test_precompile_refusal_is_recoverable() -> anyhow::Result<()> {
        let transport = SimulatedBankPrecompile {
            refuse: true,
            ..Default::default()
        };
        let client = BankPrecompileClient::new(transport, BANK_PRECOMPILE_ADDRESS);
        let ledger = deploy_ledger(client);
        ledger.mint(DEPLOYER, ALICE, units(5))?;

        let err = ledger.initialize_metadata(DEPLOYER).await.unwrap_err();
        assert!(matches!(err, LedgerError::SettlementUnavailable(ref m) if m.contains("rejected")));
        assert!(!ledger.is_metadata_initialized());

        // Token keeps working
        ledger.transfer(ALICE, BOB, units(1))?;
        assert_eq!(ledger.balance_of(BOB), units(1));
        Ok(())
    }

    #[test]
    fn test_custom_symbol_is_encoded() {
        let data = encode_set_metadata(&TokenMetadata::new("Tether Test", "tUSDT"));
        let args = &data[4..];
        assert_eq!(read_string(args, read_word(args, 0)), "Tether Test");
        assert_eq!(read_string(args, read_word(args, 32)), "tUSDT");
        assert_eq!(read_word(args, 64), 6);
    }

    // =============================================================================
    // IN-MEMORY KEEPER
    // =============================================================================

    #[tokio::test]
    async fn test_outage_then_retry() -> anyhow::Result<()> {
        let ledger = deploy_ledger(InMemoryBankKeeper::unavailable());

        let err = ledger.initialize_metadata(DEPLOYER).await.unwrap_err();
        assert!(!err.is_fatal());

        ledger.settlement().set_available(true);
        ledger.initialize_metadata(DEPLOYER).await?;

        let denom = ledger.erc20_denom();
        assert_eq!(
            ledger.settlement().metadata(&denom),
            Some(TokenMetadata::new("MyUSDC", "mUSDC"))
        );
        assert_eq!(ledger.settlement().attempts(), 2);
        assert_eq!(
            ledger.initialize_metadata(DEPLOYER).await,
            Err(LedgerError::AlreadyInitialized(denom))
        );
        assert_eq!(ledger.settlement().attempts(), 2);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_does_not_block_ledger() -> anyhow::Result<()> {
        let mut config = LedgerConfig::default();
        config.settlement.timeout_ms = 50;
        let keeper = InMemoryBankKeeper::new().with_latency(Duration::from_millis(500));
        let ledger = deploy_ledger_with(config, keeper);
        ledger.mint(DEPLOYER, ALICE, units(3))?;

        let err = ledger.initialize_metadata(DEPLOYER).await.unwrap_err();
        assert!(matches!(err, LedgerError::SettlementUnavailable(_)));
        assert_eq!(ledger.stats().settlement_failures, 1);
        assert_eq!(ledger.total_supply(), units(3));
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_initialization_registers_once() {
        let ledger = Arc::new(deploy_ledger(
            InMemoryBankKeeper::new().with_latency(Duration::from_millis(20)),
        ));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                tokio::spawn(async move { ledger.initialize_metadata(DEPLOYER).await })
            })
            .collect();

        let mut ok = 0;
        let mut already = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => ok += 1,
                Err(LedgerError::AlreadyInitialized(_)) => already += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!((ok, already), (1, 3));
        assert_eq!(ledger.settlement().attempts(), 1);
    }

    // =============================================================================
    // DEPLOYMENT RECORD
    // =============================================================================

    #[test]
    fn test_deployment_record_matches_ledger() -> anyhow::Result<()> {
        let (ledger, record) = TokenLedger::deploy(
            LedgerConfig::default(),
            DEPLOYER,
            7,
            Arc::new(NoopSettlementClient),
        )?;

        let json = record.to_json_pretty()?;
        let parsed = DeploymentRecord::from_json(&json)?;
        assert_eq!(parsed, record);
        assert_eq!(parsed.contract_address, ledger.contract_address());
        assert_eq!(parsed.denom(), ledger.erc20_denom());
        assert_eq!(parsed.deployer, DEPLOYER);
        assert_eq!(parsed.contract_type.as_deref(), Some("MyUSDC"));

        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["erc20Denom"], ledger.erc20_denom().to_string());
        Ok(())
    }

    #[test]
    fn test_deployment_without_bank_module() -> anyhow::Result<()> {
        let mut config = LedgerConfig::default();
        config.settlement.bank_precompile = None;
        let (_, record) = TokenLedger::deploy(config, DEPLOYER, 0, Arc::new(NoopSettlementClient))?;

        let value: serde_json::Value = serde_json::from_str(&record.to_json_pretty()?)?;
        assert!(value["bankPrecompile"].is_null());
        Ok(())
    }
}
