//! # Access Control Guard
//!
//! Preconditions evaluated before any mutation. The evaluation order is
//! fixed (authorization, pause, blacklist) so a caller probing several
//! violations at once always sees the same error.

use super::config::PausePolicy;
use super::entities::LedgerState;
use super::errors::LedgerError;
use super::value_objects::{Address, Operation};

/// Read-only view over the store used to check preconditions.
pub struct AccessGuard<'a> {
    state: &'a LedgerState,
    policy: &'a PausePolicy,
}

impl<'a> AccessGuard<'a> {
    /// Create a guard over the current state.
    pub fn new(state: &'a LedgerState, policy: &'a PausePolicy) -> Self {
        Self { state, policy }
    }

    /// `OwnerOnly`: caller must be the owner.
    pub fn ensure_owner(&self, caller: Address) -> Result<(), LedgerError> {
        if caller != self.state.owner() {
            return Err(LedgerError::Unauthorized { caller });
        }
        Ok(())
    }

    /// `NotPaused`: fails only for operations the policy halts.
    pub fn ensure_not_paused(&self, operation: Operation) -> Result<(), LedgerError> {
        if self.state.is_paused() && self.policy.blocks(operation) {
            return Err(LedgerError::ContractPaused { operation });
        }
        Ok(())
    }

    /// `NotBlacklisted(account)`.
    pub fn ensure_not_blacklisted(&self, account: Address) -> Result<(), LedgerError> {
        if self.state.is_blacklisted(&account) {
            return Err(LedgerError::AccountBlacklisted(account));
        }
        Ok(())
    }

    /// Run every precondition of `operation` in order.
    ///
    /// `accounts` are checked against the denylist in the order given
    /// (transfer: source then destination).
    pub fn check(
        &self,
        operation: Operation,
        caller: Address,
        accounts: &[Address],
    ) -> Result<(), LedgerError> {
        if operation.requires_owner() {
            self.ensure_owner(caller)?;
        }
        self.ensure_not_paused(operation)?;
        for account in accounts {
            self.ensure_not_blacklisted(*account)?;
        }
        Ok(())
    }
}
