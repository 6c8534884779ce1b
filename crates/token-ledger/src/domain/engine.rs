//! # Transfer Engine
//!
//! Pure planning of value-moving operations. Each `plan_*` function reads
//! the store, performs all amount and balance checks with checked
//! arithmetic, and returns a [`Transition`] holding the final balances and
//! supply. Nothing is written until the caller commits the transition, so a
//! failing plan leaves no trace.
//!
//! Guard checks are not repeated here; callers run
//! [`AccessGuard::check`](super::guard::AccessGuard::check) first.

use super::entities::LedgerState;
use super::errors::LedgerError;
use super::events::LedgerEvent;
use super::value_objects::{Address, Amount};

/// Fully validated state change, ready to commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Absolute post-operation balances of every touched account.
    pub(crate) balances: Vec<(Address, Amount)>,
    /// Post-operation total supply.
    pub(crate) total_supply: Amount,
    /// Event recorded on commit.
    pub(crate) event: LedgerEvent,
}

impl Transition {
    /// Supply after commit.
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }
}

fn ensure_positive(amount: Amount) -> Result<(), LedgerError> {
    if amount.is_zero() {
        return Err(LedgerError::InvalidAmount("amount must be greater than zero".into()));
    }
    Ok(())
}

fn debit(state: &LedgerState, account: &Address, amount: Amount) -> Result<Amount, LedgerError> {
    let available = state.balance_of(account);
    available
        .checked_sub(amount)
        .ok_or(LedgerError::InsufficientBalance {
            required: amount,
            available,
        })
}

/// Plan `balance(to) += amount; supply += amount`.
pub fn plan_mint(state: &LedgerState, to: Address, amount: Amount) -> Result<Transition, LedgerError> {
    ensure_positive(amount)?;

    let total_supply = state
        .total_supply()
        .checked_add(amount)
        .ok_or(LedgerError::Overflow)?;
    // Bounded by total_supply
    let credited = state
        .balance_of(&to)
        .checked_add(amount)
        .ok_or(LedgerError::Overflow)?;

    Ok(Transition {
        balances: vec![(to, credited)],
        total_supply,
        event: LedgerEvent::Minted { to, amount },
    })
}

/// Plan `balance(from) -= amount; balance(to) += amount`.
///
/// A self-transfer still validates the balance and yields an unchanged
/// balance.
pub fn plan_transfer(
    state: &LedgerState,
    from: Address,
    to: Address,
    amount: Amount,
) -> Result<Transition, LedgerError> {
    ensure_positive(amount)?;

    let debited = debit(state, &from, amount)?;
    let balances = if from == to {
        vec![(from, state.balance_of(&from))]
    } else {
        let credited = state
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        vec![(from, debited), (to, credited)]
    };

    Ok(Transition {
        balances,
        total_supply: state.total_supply(),
        event: LedgerEvent::Transferred { from, to, amount },
    })
}

/// Plan `balance(from) -= amount; supply -= amount`.
pub fn plan_burn(state: &LedgerState, from: Address, amount: Amount) -> Result<Transition, LedgerError> {
    ensure_positive(amount)?;

    let debited = debit(state, &from, amount)?;
    // Supply >= any single balance while the conservation invariant holds
    let total_supply = state
        .total_supply()
        .checked_sub(amount)
        .ok_or(LedgerError::Overflow)?;

    Ok(Transition {
        balances: vec![(from, debited)],
        total_supply,
        event: LedgerEvent::Burned { from, amount },
    })
}
