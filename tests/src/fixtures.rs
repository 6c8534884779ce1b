//! # Test Fixtures
//!
//! Accounts and ledger builders shared by integration tests and benchmarks.

use ledger_telemetry::{init_telemetry, TelemetryConfig};
use std::sync::{Arc, Once};
use token_ledger::prelude::*;

/// Deployer used by the reference deployment scripts.
pub const DEPLOYER: Address = Address([0xD0; 20]);

/// First holder.
pub const ALICE: Address = Address([0xA1; 20]);

/// Second holder.
pub const BOB: Address = Address([0xB0; 20]);

/// Third holder.
pub const CAROL: Address = Address([0xCA; 20]);

static LOGGING: Once = Once::new();

/// Install a quiet subscriber once per test binary.
///
/// `RUST_LOG`/`LEDGER_LOG_LEVEL` still override the `warn` default.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let mut config = TelemetryConfig::from_env();
        if std::env::var("LEDGER_LOG_LEVEL").is_err() && std::env::var("RUST_LOG").is_err() {
            config.log_level = "warn".to_string();
        }
        // Another harness may own the global subscriber already
        let _ = init_telemetry(&config);
    });
}

/// Deploy a ledger from [`DEPLOYER`] at nonce 0 with default config.
pub fn deploy_ledger<S: SettlementClient>(settlement: S) -> TokenLedger<S> {
    deploy_ledger_with(LedgerConfig::default(), settlement)
}

/// Deploy a ledger from [`DEPLOYER`] at nonce 0.
pub fn deploy_ledger_with<S: SettlementClient>(config: LedgerConfig, settlement: S) -> TokenLedger<S> {
    init_test_logging();
    match TokenLedger::deploy(config, DEPLOYER, 0, Arc::new(settlement)) {
        Ok((ledger, _record)) => ledger,
        Err(e) => panic!("fixture config rejected: {e}"),
    }
}

/// Ledger with `amount` whole tokens minted to [`ALICE`].
pub fn funded_ledger(amount: u64) -> TokenLedger<NoopSettlementClient> {
    let ledger = deploy_ledger(NoopSettlementClient);
    if let Err(e) = ledger.mint(DEPLOYER, ALICE, units(amount)) {
        panic!("fixture mint failed: {e}");
    }
    ledger
}
