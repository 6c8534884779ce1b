//! # Bank-Side Restriction Hook
//!
//! The bank module moves the mirrored `erc20:` denom on its own. Before it
//! does, it asks the issuing ledger whether the move is allowed, so pause
//! and blacklist hold on both sides of the bridge.
//!
//! ## Check Order
//!
//! 1. Denoms without the `erc20:` prefix are never restricted.
//! 2. Token paused
//! 3. Sender blacklisted
//! 4. Recipient blacklisted
//!
//! A status query that fails is logged and the move is allowed: a broken
//! ledger never blocks bank transfers.

use crate::domain::{Address, Erc20Denom, DENOM_PREFIX};
use crate::ports::outbound::TokenStatusSource;
use thiserror::Error;
use tracing::error;

/// Restriction hook errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RestrictionError {
    /// `erc20:` denom whose address does not parse.
    #[error("invalid ERC20 contract address in denom: {0}")]
    InvalidDenom(String),

    /// Issuing ledger is paused.
    #[error("restricted: ERC20 token {contract} is paused")]
    Paused {
        /// Ledger contract.
        contract: Address,
    },

    /// Sender is blacklisted on the issuing ledger.
    #[error("restricted: sender {account} is blacklisted for ERC20 token {contract}")]
    SenderBlacklisted {
        /// Blacklisted sender.
        account: Address,
        /// Ledger contract.
        contract: Address,
    },

    /// Recipient is blacklisted on the issuing ledger.
    #[error("restricted: recipient {account} is blacklisted for ERC20 token {contract}")]
    RecipientBlacklisted {
        /// Blacklisted recipient.
        account: Address,
        /// Ledger contract.
        contract: Address,
    },
}

impl RestrictionError {
    /// Whether the ledger actively refused the move.
    pub fn is_restricted(&self) -> bool {
        !matches!(self, Self::InvalidDenom(_))
    }
}

/// Decide whether the bank module may move `denom` between two accounts.
///
/// `from`/`to` are `None` for mints and burns on the bank side.
pub fn check_denom_restrictions<S>(
    denom: &str,
    from: Option<Address>,
    to: Option<Address>,
    source: &S,
) -> Result<(), RestrictionError>
where
    S: TokenStatusSource + ?Sized,
{
    if !denom.starts_with(DENOM_PREFIX) {
        return Ok(());
    }
    let contract = denom
        .parse::<Erc20Denom>()
        .map_err(|_| RestrictionError::InvalidDenom(denom.to_string()))?
        .contract();

    match source.query_paused(contract) {
        Ok(true) => return Err(RestrictionError::Paused { contract }),
        Ok(false) => {}
        Err(e) => {
            error!(contract = %contract, error = %e, "Failed to check ERC20 pause status");
            return Ok(());
        }
    }

    if let Some(account) = from {
        match source.query_blacklisted(contract, account) {
            Ok(true) => return Err(RestrictionError::SenderBlacklisted { account, contract }),
            Ok(false) => {}
            Err(e) => {
                error!(
                    contract = %contract,
                    sender = %account,
                    error = %e,
                    "Failed to check sender blacklist status"
                );
                return Ok(());
            }
        }
    }

    if let Some(account) = to {
        match source.query_blacklisted(contract, account) {
            Ok(true) => return Err(RestrictionError::RecipientBlacklisted { account, contract }),
            Ok(false) => {}
            Err(e) => {
                error!(
                    contract = %contract,
                    recipient = %account,
                    error = %e,
                    "Failed to check recipient blacklist status"
                );
                return Ok(());
            }
        }
    }

    Ok(())
}
