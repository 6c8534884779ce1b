//! # Bank Precompile Client
//!
//! Production [`SettlementClient`]: encodes
//! `setMetadata(string,string,uint8)` and dispatches it from the ledger's
//! contract address to the bank precompile.
//!
//! ## Call Data Layout
//!
//! ```text
//! selector(4) | off(name) | off(symbol) | decimals | len(name) name.. | len(symbol) symbol..
//! ```
//!
//! Offsets are relative to the start of the argument block; string bodies
//! are right-padded to a 32-byte boundary.

use crate::domain::{function_selector, Address, SettlementConfig, SettlementError, TokenMetadata};
use crate::ports::outbound::{MetadataRegistration, PrecompileCaller, SettlementClient};
use async_trait::async_trait;
use tracing::debug;

/// Canonical signature of the bank precompile's metadata setter.
pub const SET_METADATA_SIGNATURE: &str = "setMetadata(string,string,uint8)";

const WORD: usize = 32;

/// Settlement client talking to the bank precompile.
pub struct BankPrecompileClient<C: PrecompileCaller> {
    transport: C,
    precompile: Address,
}

impl<C: PrecompileCaller> BankPrecompileClient<C> {
    /// Client targeting `precompile` through `transport`.
    pub fn new(transport: C, precompile: Address) -> Self {
        Self {
            transport,
            precompile,
        }
    }

    /// Client targeting the configured precompile.
    ///
    /// Fails with `Unavailable` when the configuration has no bank module.
    pub fn from_config(transport: C, config: &SettlementConfig) -> Result<Self, SettlementError> {
        let precompile = config.bank_precompile.ok_or_else(|| {
            SettlementError::Unavailable("no bank precompile configured".to_string())
        })?;
        Ok(Self::new(transport, precompile))
    }

    /// Target precompile address.
    pub fn precompile(&self) -> Address {
        self.precompile
    }

    /// Underlying transport.
    pub fn transport(&self) -> &C {
        &self.transport
    }
}

#[async_trait]
impl<C: PrecompileCaller> SettlementClient for BankPrecompileClient<C> {
    async fn register_metadata(
        &self,
        registration: &MetadataRegistration,
    ) -> Result<(), SettlementError> {
        let input = encode_set_metadata(&registration.metadata);
        debug!(
            precompile = %self.precompile,
            denom = %registration.denom,
            bytes = input.len(),
            "Dispatching setMetadata"
        );

        let reply = self
            .transport
            .call(self.precompile, registration.contract, input)
            .await?;

        if decode_bool(&reply)? {
            Ok(())
        } else {
            Err(SettlementError::Rejected {
                denom: registration.denom,
            })
        }
    }
}

// =============================================================================
// ABI ENCODING
// =============================================================================

/// Builds the call data for `setMetadata(name, symbol, decimals)`.
pub fn encode_set_metadata(metadata: &TokenMetadata) -> Vec<u8> {
    let name = encode_string_tail(metadata.name.as_bytes());
    let symbol = encode_string_tail(metadata.symbol.as_bytes());

    let name_offset = 3 * WORD;
    let symbol_offset = name_offset + name.len();

    let mut out = Vec::with_capacity(4 + 3 * WORD + name.len() + symbol.len());
    out.extend_from_slice(&function_selector(SET_METADATA_SIGNATURE));
    out.extend_from_slice(&word(name_offset as u64));
    out.extend_from_slice(&word(symbol_offset as u64));
    out.extend_from_slice(&word(u64::from(metadata.decimals)));
    out.extend_from_slice(&name);
    out.extend_from_slice(&symbol);
    out
}

/// Length word followed by the bytes, padded to a word boundary.
fn encode_string_tail(bytes: &[u8]) -> Vec<u8> {
    let padded = bytes.len().div_ceil(WORD) * WORD;
    let mut out = Vec::with_capacity(WORD + padded);
    out.extend_from_slice(&word(bytes.len() as u64));
    out.extend_from_slice(bytes);
    out.resize(WORD + padded, 0);
    out
}

fn word(value: u64) -> [u8; WORD] {
    let mut out = [0u8; WORD];
    out[WORD - 8..].copy_from_slice(&value.to_be_bytes());
    out
}

/// Reads the leading ABI `bool` of a reply.
fn decode_bool(reply: &[u8]) -> Result<bool, SettlementError> {
    let head = reply.get(..WORD).ok_or_else(|| {
        SettlementError::Encoding(format!("reply too short: {} bytes", reply.len()))
    })?;
    Ok(head.iter().any(|&b| b != 0))
}
