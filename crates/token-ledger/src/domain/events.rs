//! # Ledger Events
//!
//! Journal entries appended by successful mutations. The bank module (or any
//! other mirror) consumes these to follow supply and transfer activity.

use super::value_objects::{Address, Amount, Erc20Denom};
use serde::{Deserialize, Serialize};

/// Event recorded after a successful state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// New supply credited.
    Minted {
        /// Credited account.
        to: Address,
        /// Minted amount.
        amount: Amount,
    },
    /// Balance moved between accounts.
    Transferred {
        /// Debited account.
        from: Address,
        /// Credited account.
        to: Address,
        /// Moved amount.
        amount: Amount,
    },
    /// Supply destroyed.
    Burned {
        /// Debited account.
        from: Address,
        /// Burned amount.
        amount: Amount,
    },
    /// Circuit-breaker engaged.
    Paused {
        /// Owner that paused.
        by: Address,
    },
    /// Circuit-breaker released.
    Unpaused {
        /// Owner that unpaused.
        by: Address,
    },
    /// Account added to the denylist.
    Blacklisted {
        /// Denied account.
        account: Address,
    },
    /// Account removed from the denylist.
    Unblacklisted {
        /// Restored account.
        account: Address,
    },
    /// Administration handed over.
    OwnershipTransferred {
        /// Former owner.
        previous_owner: Address,
        /// New owner.
        new_owner: Address,
    },
    /// Bank module accepted the token metadata.
    MetadataInitialized {
        /// Denom the bank module now recognizes.
        denom: Erc20Denom,
    },
}

impl LedgerEvent {
    /// Whether the event changes balances or supply.
    #[must_use]
    pub fn is_value_event(&self) -> bool {
        matches!(
            self,
            Self::Minted { .. } | Self::Transferred { .. } | Self::Burned { .. }
        )
    }
}
