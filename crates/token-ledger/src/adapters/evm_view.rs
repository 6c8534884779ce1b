//! EVM View Status Reader
//!
//! Implements `TokenStatusSource` the way the bank module reaches a ledger:
//! ABI-encoded `paused()` and `isBlacklisted(address)` view calls through a
//! [`ViewCaller`], replies decoded as 32-byte booleans.

use crate::domain::{function_selector, Address, StatusQueryError};
use crate::ports::outbound::{TokenStatusSource, ViewCaller};

/// `paused()`
pub const PAUSED_SIGNATURE: &str = "paused()";

/// `isBlacklisted(address)`
pub const IS_BLACKLISTED_SIGNATURE: &str = "isBlacklisted(address)";

/// Status source backed by view calls.
pub struct EvmStatusReader<V: ViewCaller> {
    caller: V,
}

impl<V: ViewCaller> EvmStatusReader<V> {
    /// Reader over `caller`.
    pub fn new(caller: V) -> Self {
        Self { caller }
    }
}

/// `isBlacklisted(account)` call data: selector plus left-padded address.
pub fn encode_is_blacklisted(account: Address) -> Vec<u8> {
    let mut input = Vec::with_capacity(36);
    input.extend_from_slice(&function_selector(IS_BLACKLISTED_SIGNATURE));
    input.extend_from_slice(&[0u8; 12]);
    input.extend_from_slice(account.as_bytes());
    input
}

fn decode_bool(method: &str, reply: &[u8]) -> Result<bool, StatusQueryError> {
    if reply.len() < 32 {
        return Err(StatusQueryError::Failed(format!(
            "invalid response length from {method}: {}",
            reply.len()
        )));
    }
    Ok(reply[31] != 0)
}

impl<V: ViewCaller> TokenStatusSource for EvmStatusReader<V> {
    fn query_paused(&self, contract: Address) -> Result<bool, StatusQueryError> {
        let reply = self
            .caller
            .view_call(contract, &function_selector(PAUSED_SIGNATURE))?;
        decode_bool(PAUSED_SIGNATURE, &reply)
    }

    fn query_blacklisted(&self, contract: Address, account: Address) -> Result<bool, StatusQueryError> {
        let reply = self
            .caller
            .view_call(contract, &encode_is_blacklisted(account))?;
        decode_bool(IS_BLACKLISTED_SIGNATURE, &reply)
    }
}
