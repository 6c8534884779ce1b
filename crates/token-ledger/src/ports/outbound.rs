//! # Outbound Ports
//!
//! Traits for the external bank module: metadata registration, the raw
//! precompile transport, and the status reads the bank module performs
//! against a ledger before moving its denom.

use crate::domain::{
    Address, Erc20Denom, SettlementError, StatusQueryError, TokenMetadata,
};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Metadata handed to the bank module for one denom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataRegistration {
    /// Ledger contract issuing the call.
    pub contract: Address,
    /// Denom being described.
    pub denom: Erc20Denom,
    /// Name, symbol, decimals.
    pub metadata: TokenMetadata,
}

/// Settlement client - outbound port.
///
/// Called once per successful `initialize_metadata`, never while the ledger
/// lock is held.
#[async_trait]
pub trait SettlementClient: Send + Sync {
    /// Register token metadata under `registration.denom`.
    async fn register_metadata(
        &self,
        registration: &MetadataRegistration,
    ) -> Result<(), SettlementError>;
}

/// Precompile transport - outbound port.
///
/// Executes ABI call data against a precompile address on behalf of
/// `caller` and returns the raw reply.
#[async_trait]
pub trait PrecompileCaller: Send + Sync {
    /// Dispatch `input` to `precompile`.
    async fn call(
        &self,
        precompile: Address,
        caller: Address,
        input: Vec<u8>,
    ) -> Result<Vec<u8>, SettlementError>;
}

/// Token status reads the bank module performs before moving an `erc20:`
/// denom.
pub trait TokenStatusSource: Send + Sync {
    /// `paused()` of the ledger at `contract`.
    fn query_paused(&self, contract: Address) -> Result<bool, StatusQueryError>;

    /// `isBlacklisted(account)` of the ledger at `contract`.
    fn query_blacklisted(&self, contract: Address, account: Address) -> Result<bool, StatusQueryError>;
}

/// Read-only contract call - outbound port.
///
/// What the bank module sees of a ledger: `eth_call` style view calls with
/// ABI call data in and ABI return data out.
pub trait ViewCaller: Send + Sync {
    /// Execute a view call against `contract`.
    fn view_call(&self, contract: Address, input: &[u8]) -> Result<Vec<u8>, StatusQueryError>;
}

impl<T: ViewCaller + ?Sized> ViewCaller for &T {
    fn view_call(&self, contract: Address, input: &[u8]) -> Result<Vec<u8>, StatusQueryError> {
        (**self).view_call(contract, input)
    }
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// One call seen by [`MockPrecompileCaller`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    /// Target precompile.
    pub precompile: Address,
    /// Calling contract.
    pub caller: Address,
    /// ABI call data.
    pub input: Vec<u8>,
}

/// Mock precompile transport returning a fixed reply.
#[derive(Default)]
pub struct MockPrecompileCaller {
    /// Reply returned on success.
    pub reply: Vec<u8>,
    /// Should fail?
    pub should_fail: bool,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockPrecompileCaller {
    /// Mock answering with an ABI-encoded bool.
    pub fn replying(success: bool) -> Self {
        let mut reply = vec![0u8; 32];
        reply[31] = u8::from(success);
        Self {
            reply,
            ..Default::default()
        }
    }

    /// Mock whose transport is down.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl PrecompileCaller for MockPrecompileCaller {
    async fn call(
        &self,
        precompile: Address,
        caller: Address,
        input: Vec<u8>,
    ) -> Result<Vec<u8>, SettlementError> {
        self.calls.lock().push(RecordedCall {
            precompile,
            caller,
            input,
        });
        if self.should_fail {
            return Err(SettlementError::Unavailable("Mock failure".to_string()));
        }
        Ok(self.reply.clone())
    }
}

/// Mock status source with fixed answers.
#[derive(Clone, Default)]
pub struct MockStatusSource {
    /// Paused flag reported for every contract.
    pub paused: bool,
    /// Accounts reported as blacklisted.
    pub blacklisted: Vec<Address>,
    /// Should fail?
    pub should_fail: bool,
}

impl TokenStatusSource for MockStatusSource {
    fn query_paused(&self, _contract: Address) -> Result<bool, StatusQueryError> {
        if self.should_fail {
            return Err(StatusQueryError::Failed("Mock failure".to_string()));
        }
        Ok(self.paused)
    }

    fn query_blacklisted(&self, _contract: Address, account: Address) -> Result<bool, StatusQueryError> {
        if self.should_fail {
            return Err(StatusQueryError::Failed("Mock failure".to_string()));
        }
        Ok(self.blacklisted.contains(&account))
    }
}
