//! # Inbound Ports
//!
//! API trait defining what a token ledger can do.

use crate::domain::{Address, Amount, LedgerError};
use async_trait::async_trait;

/// Token ledger API - inbound port.
///
/// Every mutation takes the caller explicitly and either fully applies or
/// returns an error with no observable change.
#[async_trait]
pub trait TokenLedgerApi: Send + Sync {
    /// Owner-only: credit `amount` of new supply to `to`.
    fn mint(&self, caller: Address, to: Address, amount: Amount) -> Result<(), LedgerError>;

    /// Move `amount` from `caller` to `to`.
    fn transfer(&self, caller: Address, to: Address, amount: Amount) -> Result<bool, LedgerError>;

    /// Destroy `amount` of the caller's own balance.
    fn burn(&self, caller: Address, amount: Amount) -> Result<(), LedgerError>;

    /// Owner-only: engage the circuit-breaker.
    fn pause(&self, caller: Address) -> Result<(), LedgerError>;

    /// Owner-only: release the circuit-breaker.
    fn unpause(&self, caller: Address) -> Result<(), LedgerError>;

    /// Owner-only: denylist `account`.
    fn blacklist(&self, caller: Address, account: Address) -> Result<(), LedgerError>;

    /// Owner-only: remove `account` from the denylist.
    fn unblacklist(&self, caller: Address, account: Address) -> Result<(), LedgerError>;

    /// Owner-only: hand administration to `new_owner`.
    fn transfer_ownership(&self, caller: Address, new_owner: Address) -> Result<(), LedgerError>;

    /// Owner-only: register name, symbol and decimals with the bank module.
    async fn initialize_metadata(&self, caller: Address) -> Result<(), LedgerError>;

    /// Token name.
    fn name(&self) -> String;

    /// Token symbol.
    fn symbol(&self) -> String;

    /// Decimal places.
    fn decimals(&self) -> u8;

    /// Current owner.
    fn owner(&self) -> Address;

    /// Whether the circuit-breaker is engaged.
    fn paused(&self) -> bool;

    /// Whether `account` is denylisted.
    fn is_blacklisted(&self, account: Address) -> bool;

    /// Balance of `account`.
    fn balance_of(&self, account: Address) -> Amount;

    /// Total supply.
    fn total_supply(&self) -> Amount;
}
