//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the settlement outbound port (the bank precompile client for
//! production, an in-memory bank keeper and a no-op client for tests and
//! environments without a bank module) and the view-call status reader the
//! bank module uses to reach a ledger.

mod bank_precompile;
mod evm_view;
mod in_memory_bank;
mod noop;

pub use bank_precompile::{encode_set_metadata, BankPrecompileClient, SET_METADATA_SIGNATURE};
pub use evm_view::{
    encode_is_blacklisted, EvmStatusReader, IS_BLACKLISTED_SIGNATURE, PAUSED_SIGNATURE,
};
pub use in_memory_bank::InMemoryBankKeeper;
pub use noop::NoopSettlementClient;
