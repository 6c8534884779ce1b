//! # Deployment Record
//!
//! JSON artifact written after a ledger is deployed and read back by the
//! tooling that interacts with it. Reading and writing files is the
//! tooling's concern; this type owns the format and its consistency rule:
//! `erc20Denom` is always the derived, lowercase denom of `contractAddress`.

use super::value_objects::{Address, Erc20Denom};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Contract type recorded for deployments of this ledger.
pub const LEDGER_CONTRACT_TYPE: &str = "MyUSDC";

/// Deployment record errors.
#[derive(Debug, Error)]
pub enum DeploymentRecordError {
    /// Malformed JSON or field.
    #[error("Malformed deployment record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Stored denom is not the one derived from the contract address.
    #[error("Denom mismatch: expected {expected}, found {found}")]
    DenomMismatch {
        /// Derived denom.
        expected: String,
        /// Denom found in the record.
        found: String,
    },
}

/// Persisted description of a deployed ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    /// Ledger contract address.
    pub contract_address: Address,
    /// Denom the bank module mirrors the token under.
    pub erc20_denom: String,
    /// Bank precompile used at deployment, `null` for builds without one.
    pub bank_precompile: Option<Address>,
    /// Account that deployed (and initially owns) the ledger.
    pub deployer: Address,
    /// Deployment time (RFC 3339).
    pub timestamp: DateTime<Utc>,
    /// Ledger flavour; absent in older records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<String>,
}

impl DeploymentRecord {
    /// Build a record stamped with the current time.
    pub fn new(
        contract_address: Address,
        deployer: Address,
        bank_precompile: Option<Address>,
        contract_type: Option<String>,
    ) -> Self {
        Self::with_timestamp(contract_address, deployer, bank_precompile, contract_type, Utc::now())
    }

    /// Build a record with an explicit timestamp.
    pub fn with_timestamp(
        contract_address: Address,
        deployer: Address,
        bank_precompile: Option<Address>,
        contract_type: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            contract_address,
            erc20_denom: Erc20Denom::for_contract(contract_address).to_string(),
            bank_precompile,
            deployer,
            timestamp,
            contract_type,
        }
    }

    /// Denom derived from the contract address.
    pub fn denom(&self) -> Erc20Denom {
        Erc20Denom::for_contract(self.contract_address)
    }

    /// Check the stored denom against the derived one.
    pub fn verify(&self) -> Result<(), DeploymentRecordError> {
        let expected = self.denom().to_string();
        if self.erc20_denom != expected {
            return Err(DeploymentRecordError::DenomMismatch {
                expected,
                found: self.erc20_denom.clone(),
            });
        }
        Ok(())
    }

    /// Parse and verify a record.
    pub fn from_json(raw: &str) -> Result<Self, DeploymentRecordError> {
        let record: Self = serde_json::from_str(raw)?;
        record.verify()?;
        Ok(record)
    }

    /// Render as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, DeploymentRecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
