//! # Domain Errors
//!
//! Error types for the token ledger and its settlement bridge.

use super::value_objects::{Address, Amount, Erc20Denom, Operation};
use thiserror::Error;

/// Ledger error types.
///
/// Every mutating call that returns one of these has left the ledger
/// untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Caller is not the ledger owner.
    #[error("Unauthorized: {caller} is not the ledger owner")]
    Unauthorized {
        /// Rejected caller.
        caller: Address,
    },

    /// Operation blocked by the circuit-breaker.
    #[error("Contract paused: {operation} is blocked while paused")]
    ContractPaused {
        /// Blocked operation.
        operation: Operation,
    },

    /// Account is on the denylist.
    #[error("Account blacklisted: {0}")]
    AccountBlacklisted(Address),

    /// Source balance does not cover the requested amount.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Requested amount.
        required: Amount,
        /// Balance held by the source.
        available: Amount,
    },

    /// Zero or malformed amount.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Disallowed administrative target.
    #[error("Invalid target {account}: {reason}")]
    InvalidTarget {
        /// Rejected target account.
        account: Address,
        /// Why the target was rejected.
        reason: &'static str,
    },

    /// External bank module call failed or timed out.
    #[error("Settlement unavailable: {0}")]
    SettlementUnavailable(String),

    /// Metadata registration already succeeded.
    #[error("Metadata already initialized for {0}")]
    AlreadyInitialized(Erc20Denom),

    /// Balance or supply would exceed 256 bits.
    #[error("Arithmetic overflow")]
    Overflow,

    /// Malformed account identifier.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Malformed settlement denom.
    #[error("Invalid denom: {0}")]
    InvalidDenom(String),
}

impl LedgerError {
    /// Whether a caller should abort its workflow on this error.
    ///
    /// Only `SettlementUnavailable` is a warning: the ledger remains fully
    /// functional when the bank module cannot be reached.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::SettlementUnavailable(_))
    }

    /// Short machine-readable kind, used as a log field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::ContractPaused { .. } => "contract_paused",
            Self::AccountBlacklisted(_) => "account_blacklisted",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::InvalidTarget { .. } => "invalid_target",
            Self::SettlementUnavailable(_) => "settlement_unavailable",
            Self::AlreadyInitialized(_) => "already_initialized",
            Self::Overflow => "overflow",
            Self::InvalidAddress(_) => "invalid_address",
            Self::InvalidDenom(_) => "invalid_denom",
        }
    }
}

/// Errors raised by settlement adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettlementError {
    /// Bank module not reachable in this environment.
    #[error("bank module unavailable: {0}")]
    Unavailable(String),

    /// Call exceeded the configured timeout.
    #[error("settlement call timed out after {timeout_ms}ms")]
    Timeout {
        /// Applied timeout in milliseconds.
        timeout_ms: u64,
    },

    /// Bank module answered but refused the registration.
    #[error("bank module rejected metadata for {denom}")]
    Rejected {
        /// Denom that was refused.
        denom: Erc20Denom,
    },

    /// Call data could not be built.
    #[error("call encoding failed: {0}")]
    Encoding(String),
}

/// Errors raised when the bank module asks a ledger for its status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusQueryError {
    /// No ledger is deployed at this address.
    #[error("no token ledger at {0}")]
    UnknownContract(Address),

    /// Query reached the ledger but did not complete.
    #[error("status query failed: {0}")]
    Failed(String),
}

impl From<SettlementError> for LedgerError {
    fn from(err: SettlementError) -> Self {
        LedgerError::SettlementUnavailable(err.to_string())
    }
}
