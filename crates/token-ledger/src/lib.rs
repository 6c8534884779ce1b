//! # Token Ledger
//!
//! Fungible-token ledger with an owner, a circuit-breaker and a denylist,
//! mirrored into an external bank module under the denom
//! `erc20:<lowercase contract address>`.
//!
//! **Decimals:** 6
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Access Rules
//!
//! | Operation | Owner only | Halted by pause | Denylist checked |
//! |-----------|------------|-----------------|------------------|
//! | `mint` | yes | yes | destination |
//! | `transfer` | no | yes | source, destination |
//! | `burn` | no | yes | holder |
//! | `pause` / `unpause` | yes | no | - |
//! | `blacklist` / `unblacklist` | yes | no | - |
//! | `transfer_ownership` | yes | no | new owner |
//! | `initialize_metadata` | yes | no | - |
//!
//! Checks run in a fixed order: authorization, pause, denylist, then amount
//! and balance. A rejected call leaves the ledger untouched.
//!
//! ## Module Structure
//!
//! ```text
//! token-ledger/
//! ├── domain/          # Store, guard, engine, config, events, deployment record
//! ├── ports/           # TokenLedgerApi, SettlementClient, TokenStatusSource
//! ├── adapters/        # Bank precompile client, in-memory bank, view reader
//! ├── restrictions.rs  # Bank-side restriction hook
//! └── service.rs       # TokenLedger
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use token_ledger::prelude::*;
//!
//! let ledger = TokenLedger::new(LedgerConfig::default(), contract, owner, Arc::new(keeper))?;
//! ledger.mint(owner, alice, units(100))?;
//! ledger.transfer(alice, bob, units(10))?;
//!
//! // Non-fatal: the ledger keeps working without the bank module
//! if let Err(e) = ledger.initialize_metadata(owner).await {
//!     assert!(!e.is_fatal());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod restrictions;
pub mod service;

/// Commonly used types.
pub mod prelude {
    // Domain
    pub use crate::domain::config::{
        JournalConfig, LedgerConfig, PausePolicy, SettlementConfig, TokenConfig,
    };
    pub use crate::domain::deployment::DeploymentRecord;
    pub use crate::domain::entities::LedgerState;
    pub use crate::domain::errors::{LedgerError, SettlementError, StatusQueryError};
    pub use crate::domain::events::LedgerEvent;
    pub use crate::domain::value_objects::{
        format_units, parse_units, units, Address, Amount, Erc20Denom, Operation, TokenMetadata,
        BANK_PRECOMPILE_ADDRESS, DECIMALS, U256,
    };

    // Ports
    pub use crate::ports::inbound::TokenLedgerApi;
    pub use crate::ports::outbound::{
        MetadataRegistration, PrecompileCaller, SettlementClient, TokenStatusSource, ViewCaller,
    };

    // Adapters
    pub use crate::adapters::{
        BankPrecompileClient, EvmStatusReader, InMemoryBankKeeper, NoopSettlementClient,
    };

    // Service and hook
    pub use crate::restrictions::{check_denom_restrictions, RestrictionError};
    pub use crate::service::{LedgerStats, TokenLedger};

    pub use std::sync::Arc;
}

pub use domain::{
    Address, Amount, ConfigError, DeploymentRecord, DeploymentRecordError, Erc20Denom,
    LedgerConfig, LedgerError, LedgerEvent, Operation, SettlementError, StatusQueryError,
    TokenMetadata,
};
pub use ports::{SettlementClient, TokenLedgerApi, TokenStatusSource};
pub use restrictions::{check_denom_restrictions, RestrictionError};
pub use service::{LedgerStats, TokenLedger};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
