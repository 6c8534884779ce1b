//! # Ledger Store
//!
//! The single state object of a deployed ledger: balances, supply, owner,
//! circuit-breaker and denylist. Every ledger value owns its own store.
//!
//! The event journal is bounded: once full, the oldest entry is dropped
//! for each new one and counted in [`LedgerState::dropped_events`].
//!
//! Reads are pure. Writes are crate-private and only reachable through the
//! guard and transfer engine, which commit a fully validated
//! [`Transition`](super::engine::Transition) or nothing.

use super::engine::Transition;
use super::events::LedgerEvent;
use super::value_objects::{Address, Amount, Erc20Denom, TokenMetadata};
use std::collections::{HashMap, HashSet, VecDeque};

/// Journal entries kept when no capacity is configured.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 10_000;

/// Ledger state for one deployed token.
#[derive(Clone, Debug)]
pub struct LedgerState {
    /// Address the ledger is deployed at.
    contract_address: Address,
    /// Immutable name/symbol/decimals.
    metadata: TokenMetadata,
    /// Administrator.
    owner: Address,
    /// Circuit-breaker flag.
    paused: bool,
    /// Sum of all balances.
    total_supply: Amount,
    /// Non-zero balances only; absent means zero.
    balances: HashMap<Address, Amount>,
    /// Denylisted accounts.
    blacklist: HashSet<Address>,
    /// Set once the bank module accepted the metadata.
    metadata_initialized: bool,
    /// Journal of successful mutations, oldest first.
    events: VecDeque<LedgerEvent>,
    /// Maximum journal length.
    journal_capacity: usize,
    /// Entries evicted because the journal was full.
    dropped_events: u64,
}

impl LedgerState {
    /// Create an empty, unpaused ledger.
    pub fn new(contract_address: Address, owner: Address, metadata: TokenMetadata) -> Self {
        Self {
            contract_address,
            metadata,
            owner,
            paused: false,
            total_supply: Amount::zero(),
            balances: HashMap::new(),
            blacklist: HashSet::new(),
            metadata_initialized: false,
            events: VecDeque::new(),
            journal_capacity: DEFAULT_JOURNAL_CAPACITY,
            dropped_events: 0,
        }
    }

    /// Bound the journal to `capacity` entries (at least one).
    #[must_use]
    pub fn with_journal_capacity(mut self, capacity: usize) -> Self {
        self.journal_capacity = capacity.max(1);
        while self.events.len() > self.journal_capacity {
            self.events.pop_front();
            self.dropped_events += 1;
        }
        self
    }

    /// Copy of the state with an empty journal.
    pub fn without_events(&self) -> Self {
        Self {
            contract_address: self.contract_address,
            metadata: self.metadata.clone(),
            owner: self.owner,
            paused: self.paused,
            total_supply: self.total_supply,
            balances: self.balances.clone(),
            blacklist: self.blacklist.clone(),
            metadata_initialized: self.metadata_initialized,
            events: VecDeque::new(),
            journal_capacity: self.journal_capacity,
            dropped_events: self.dropped_events,
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Ledger contract address.
    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    /// Denom the bank module mirrors this token under.
    pub fn erc20_denom(&self) -> Erc20Denom {
        Erc20Denom::for_contract(self.contract_address)
    }

    /// Token metadata.
    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    /// Current owner.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Whether the circuit-breaker is engaged.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Total supply.
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Balance of an account (zero when never credited).
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Whether an account is denylisted.
    pub fn is_blacklisted(&self, account: &Address) -> bool {
        self.blacklist.contains(account)
    }

    /// Whether metadata registration has succeeded.
    pub fn is_metadata_initialized(&self) -> bool {
        self.metadata_initialized
    }

    /// All non-zero balances.
    pub fn balances(&self) -> impl Iterator<Item = (&Address, &Amount)> {
        self.balances.iter()
    }

    /// Number of accounts holding a non-zero balance.
    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Event journal, oldest first.
    pub fn events(&self) -> &VecDeque<LedgerEvent> {
        &self.events
    }

    /// Maximum journal length.
    pub fn journal_capacity(&self) -> usize {
        self.journal_capacity
    }

    /// Journal entries evicted so far.
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    /// Apply a validated transition. Cannot fail.
    pub(crate) fn commit(&mut self, transition: Transition) {
        for (account, balance) in transition.balances {
            if balance.is_zero() {
                self.balances.remove(&account);
            } else {
                self.balances.insert(account, balance);
            }
        }
        self.total_supply = transition.total_supply;
        self.record(transition.event);
    }

    /// Set the circuit-breaker. Returns false if already in that state.
    pub(crate) fn set_paused(&mut self, paused: bool) -> bool {
        let changed = self.paused != paused;
        self.paused = paused;
        changed
    }

    /// Set or clear the denylist flag. Returns false if unchanged.
    pub(crate) fn set_blacklisted(&mut self, account: Address, blacklisted: bool) -> bool {
        if blacklisted {
            self.blacklist.insert(account)
        } else {
            self.blacklist.remove(&account)
        }
    }

    /// Replace the owner, returning the previous one.
    pub(crate) fn set_owner(&mut self, owner: Address) -> Address {
        std::mem::replace(&mut self.owner, owner)
    }

    pub(crate) fn mark_metadata_initialized(&mut self) {
        self.metadata_initialized = true;
    }

    pub(crate) fn record(&mut self, event: LedgerEvent) {
        if self.events.len() >= self.journal_capacity {
            self.events.pop_front();
            self.dropped_events += 1;
        }
        self.events.push_back(event);
    }

    pub(crate) fn take_events(&mut self) -> Vec<LedgerEvent> {
        Vec::from(std::mem::take(&mut self.events))
    }
}
