//! # Domain Invariants
//!
//! Business rules that must hold for every reachable ledger state.
//!
//! | Invariant | Check |
//! |-----------|-------|
//! | Supply conservation | `total_supply == Σ balance(a)` |
//! | Owner reachable | owner is never denylisted |
//!
//! Non-negative balances need no runtime check: balances are unsigned and
//! every debit goes through `checked_sub`.

use super::entities::LedgerState;
use super::value_objects::{Address, Amount};
use thiserror::Error;

/// A broken invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Recorded supply differs from the sum of balances.
    #[error("supply mismatch: total_supply={total_supply}, sum of balances={sum}")]
    SupplyMismatch {
        /// Recorded supply.
        total_supply: Amount,
        /// Sum over all balances (saturating).
        sum: Amount,
    },

    /// The owner ended up on the denylist.
    #[error("owner {0} is blacklisted")]
    OwnerBlacklisted(Address),
}

/// Invariant: supply conservation.
pub fn invariant_supply_conservation(state: &LedgerState) -> Result<(), InvariantViolation> {
    let sum = state
        .balances()
        .fold(Amount::zero(), |acc, (_, balance)| acc.saturating_add(*balance));
    if sum != state.total_supply() {
        return Err(InvariantViolation::SupplyMismatch {
            total_supply: state.total_supply(),
            sum,
        });
    }
    Ok(())
}

/// Invariant: administration can never lock itself out.
pub fn invariant_owner_not_blacklisted(state: &LedgerState) -> Result<(), InvariantViolation> {
    if state.is_blacklisted(&state.owner()) {
        return Err(InvariantViolation::OwnerBlacklisted(state.owner()));
    }
    Ok(())
}

/// Run every invariant, collecting violations.
pub fn check_all_invariants(state: &LedgerState) -> Vec<InvariantViolation> {
    [
        invariant_supply_conservation(state),
        invariant_owner_not_blacklisted(state),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}
