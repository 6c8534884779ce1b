//! # Token Ledger Service
//!
//! The deployed ledger: one owned [`LedgerState`] behind a single lock, the
//! access guard and transfer engine in front of it, and the settlement
//! bridge to the bank module beside it.
//!
//! ## Concurrency
//!
//! - Every mutation runs check, plan and commit under one write lock, so
//!   concurrent calls are linearizable and a failed call changes nothing.
//! - Reads take the shared lock and see a consistent snapshot.
//! - `initialize_metadata` is serialized with itself by an async mutex and
//!   never holds the ledger lock across the external call.

use crate::adapters::{IS_BLACKLISTED_SIGNATURE, PAUSED_SIGNATURE};
use crate::domain::{
    check_all_invariants, compute_contract_address, LEDGER_CONTRACT_TYPE, function_selector, plan_burn, plan_mint,
    plan_transfer, AccessGuard, Address, Amount, ConfigError, DeploymentRecord, Erc20Denom,
    LedgerConfig, LedgerError, LedgerEvent, LedgerState, Operation, SettlementError,
    StatusQueryError, TokenMetadata,
};
use crate::ports::inbound::TokenLedgerApi;
use crate::ports::outbound::{MetadataRegistration, SettlementClient, TokenStatusSource, ViewCaller};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Counters kept by a ledger.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LedgerStats {
    /// Mutations that committed.
    pub mutations_applied: u64,
    /// Mutations rejected by the guard or engine.
    pub mutations_rejected: u64,
    /// Metadata registrations sent to the bank module.
    pub settlement_attempts: u64,
    /// Registrations that failed or timed out.
    pub settlement_failures: u64,
    /// Journal entries evicted because the journal was full.
    pub events_dropped: u64,
}

/// A deployed token ledger.
pub struct TokenLedger<S: SettlementClient> {
    /// Validated configuration.
    config: LedgerConfig,
    /// The whole ledger state.
    state: RwLock<LedgerState>,
    /// Bank module bridge.
    settlement: Arc<S>,
    /// Serializes `initialize_metadata`.
    bridge: tokio::sync::Mutex<()>,
    /// Counters.
    stats: Mutex<LedgerStats>,
}

impl<S: SettlementClient> TokenLedger<S> {
    /// Create a ledger at `contract_address` owned by `owner`.
    pub fn new(
        config: LedgerConfig,
        contract_address: Address,
        owner: Address,
        settlement: Arc<S>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let metadata = TokenMetadata::new(config.token.name.clone(), config.token.symbol.clone());
        let journal_capacity = config.journal.capacity;

        info!(
            contract = %contract_address,
            owner = %owner,
            symbol = %metadata.symbol,
            denom = %Erc20Denom::for_contract(contract_address),
            "Token ledger created"
        );

        Ok(Self {
            config,
            state: RwLock::new(
                LedgerState::new(contract_address, owner, metadata)
                    .with_journal_capacity(journal_capacity),
            ),
            settlement,
            bridge: tokio::sync::Mutex::new(()),
            stats: Mutex::new(LedgerStats::default()),
        })
    }

    /// Deploy a ledger from `deployer` at `nonce`.
    ///
    /// The contract address is the CREATE address of `(deployer, nonce)`,
    /// the deployer becomes owner, and the returned record describes the
    /// deployment.
    pub fn deploy(
        config: LedgerConfig,
        deployer: Address,
        nonce: u64,
        settlement: Arc<S>,
    ) -> Result<(Self, DeploymentRecord), ConfigError> {
        let contract_address = compute_contract_address(deployer, nonce);
        let record = DeploymentRecord::new(
            contract_address,
            deployer,
            config.settlement.bank_precompile,
            Some(LEDGER_CONTRACT_TYPE.to_string()),
        );
        let ledger = Self::new(config, contract_address, deployer, settlement)?;
        Ok((ledger, record))
    }

    /// Configuration in force.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Settlement client.
    pub fn settlement(&self) -> &Arc<S> {
        &self.settlement
    }

    /// Ledger contract address.
    pub fn contract_address(&self) -> Address {
        self.state.read().contract_address()
    }

    /// Denom the bank module mirrors this token under.
    pub fn erc20_denom(&self) -> Erc20Denom {
        self.state.read().erc20_denom()
    }

    /// Whether the bank module accepted the metadata.
    pub fn is_metadata_initialized(&self) -> bool {
        self.state.read().is_metadata_initialized()
    }

    /// Consistent copy of balances, supply and flags, without the journal.
    pub fn snapshot(&self) -> LedgerState {
        self.state.read().without_events()
    }

    /// Event journal, oldest first.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.state.read().events().iter().cloned().collect()
    }

    /// Take the event journal, leaving it empty.
    pub fn drain_events(&self) -> Vec<LedgerEvent> {
        self.state.write().take_events()
    }

    /// Current counters.
    pub fn stats(&self) -> LedgerStats {
        let events_dropped = self.state.read().dropped_events();
        LedgerStats {
            events_dropped,
            ..self.stats.lock().clone()
        }
    }

    // -------------------------------------------------------------------------
    // Mutation plumbing
    // -------------------------------------------------------------------------

    /// Run `f` under the write lock and account for the outcome.
    fn mutate<T>(
        &self,
        operation: Operation,
        caller: Address,
        f: impl FnOnce(&mut LedgerState) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let mut state = self.state.write();
        let result = f(&mut *state);
        debug_assert!(check_all_invariants(&state).is_empty());
        drop(state);

        match &result {
            Ok(_) => self.stats.lock().mutations_applied += 1,
            Err(e) => self.rejected(operation, caller, e),
        }
        result
    }

    fn rejected(&self, operation: Operation, caller: Address, error: &LedgerError) {
        self.stats.lock().mutations_rejected += 1;
        warn!(
            operation = %operation,
            caller = %caller,
            kind = error.kind(),
            error = %error,
            "Mutation rejected"
        );
    }

    fn set_blacklisted(
        &self,
        operation: Operation,
        caller: Address,
        account: Address,
        blacklisted: bool,
    ) -> Result<(), LedgerError> {
        let changed = self.mutate(operation, caller, |state| {
            AccessGuard::new(state, &self.config.pause).check(operation, caller, &[])?;
            if blacklisted && account == state.owner() {
                return Err(LedgerError::InvalidTarget {
                    account,
                    reason: "owner cannot be blacklisted",
                });
            }
            let changed = state.set_blacklisted(account, blacklisted);
            if changed {
                state.record(if blacklisted {
                    LedgerEvent::Blacklisted { account }
                } else {
                    LedgerEvent::Unblacklisted { account }
                });
            }
            Ok(changed)
        })?;

        if changed {
            info!(account = %account, blacklisted, "Blacklist updated");
        } else {
            debug!(account = %account, blacklisted, "Blacklist unchanged");
        }
        Ok(())
    }

    fn set_paused(&self, operation: Operation, caller: Address, paused: bool) -> Result<(), LedgerError> {
        let changed = self.mutate(operation, caller, |state| {
            AccessGuard::new(state, &self.config.pause).check(operation, caller, &[])?;
            let changed = state.set_paused(paused);
            if changed {
                state.record(if paused {
                    LedgerEvent::Paused { by: caller }
                } else {
                    LedgerEvent::Unpaused { by: caller }
                });
            }
            Ok(changed)
        })?;

        if changed {
            info!(paused, by = %caller, "Circuit-breaker toggled");
        } else {
            debug!(paused, "Circuit-breaker already in requested state");
        }
        Ok(())
    }
}

#[async_trait]
impl<S: SettlementClient> TokenLedgerApi for TokenLedger<S> {
    fn mint(&self, caller: Address, to: Address, amount: Amount) -> Result<(), LedgerError> {
        let supply = self.mutate(Operation::Mint, caller, |state| {
            AccessGuard::new(state, &self.config.pause).check(Operation::Mint, caller, &[to])?;
            let transition = plan_mint(state, to, amount)?;
            let supply = transition.total_supply();
            state.commit(transition);
            Ok(supply)
        })?;

        info!(to = %to, amount = %amount, total_supply = %supply, "Minted");
        Ok(())
    }

    fn transfer(&self, caller: Address, to: Address, amount: Amount) -> Result<bool, LedgerError> {
        self.mutate(Operation::Transfer, caller, |state| {
            AccessGuard::new(state, &self.config.pause).check(
                Operation::Transfer,
                caller,
                &[caller, to],
            )?;
            let transition = plan_transfer(state, caller, to, amount)?;
            state.commit(transition);
            Ok(())
        })?;

        info!(from = %caller, to = %to, amount = %amount, "Transferred");
        Ok(true)
    }

    fn burn(&self, caller: Address, amount: Amount) -> Result<(), LedgerError> {
        let supply = self.mutate(Operation::Burn, caller, |state| {
            AccessGuard::new(state, &self.config.pause).check(Operation::Burn, caller, &[caller])?;
            let transition = plan_burn(state, caller, amount)?;
            let supply = transition.total_supply();
            state.commit(transition);
            Ok(supply)
        })?;

        info!(from = %caller, amount = %amount, total_supply = %supply, "Burned");
        Ok(())
    }

    fn pause(&self, caller: Address) -> Result<(), LedgerError> {
        self.set_paused(Operation::Pause, caller, true)
    }

    fn unpause(&self, caller: Address) -> Result<(), LedgerError> {
        self.set_paused(Operation::Unpause, caller, false)
    }

    fn blacklist(&self, caller: Address, account: Address) -> Result<(), LedgerError> {
        self.set_blacklisted(Operation::Blacklist, caller, account, true)
    }

    fn unblacklist(&self, caller: Address, account: Address) -> Result<(), LedgerError> {
        self.set_blacklisted(Operation::Unblacklist, caller, account, false)
    }

    fn transfer_ownership(&self, caller: Address, new_owner: Address) -> Result<(), LedgerError> {
        let previous = self.mutate(Operation::TransferOwnership, caller, |state| {
            AccessGuard::new(state, &self.config.pause).check(
                Operation::TransferOwnership,
                caller,
                &[],
            )?;
            if new_owner.is_zero() {
                return Err(LedgerError::InvalidTarget {
                    account: new_owner,
                    reason: "new owner cannot be the zero address",
                });
            }
            if state.is_blacklisted(&new_owner) {
                return Err(LedgerError::InvalidTarget {
                    account: new_owner,
                    reason: "new owner is blacklisted",
                });
            }
            if new_owner == state.owner() {
                return Ok(None);
            }
            let previous_owner = state.set_owner(new_owner);
            state.record(LedgerEvent::OwnershipTransferred {
                previous_owner,
                new_owner,
            });
            Ok(Some(previous_owner))
        })?;

        if let Some(previous) = previous {
            info!(previous_owner = %previous, new_owner = %new_owner, "Ownership transferred");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn initialize_metadata(&self, caller: Address) -> Result<(), LedgerError> {
        let _bridge = self.bridge.lock().await;

        let registration = {
            let state = self.state.read();
            let checked = AccessGuard::new(&state, &self.config.pause)
                .check(Operation::InitializeMetadata, caller, &[])
                .and_then(|()| {
                    if state.is_metadata_initialized() {
                        Err(LedgerError::AlreadyInitialized(state.erc20_denom()))
                    } else {
                        Ok(())
                    }
                });
            if let Err(e) = checked {
                drop(state);
                self.rejected(Operation::InitializeMetadata, caller, &e);
                return Err(e);
            }
            MetadataRegistration {
                contract: state.contract_address(),
                denom: state.erc20_denom(),
                metadata: state.metadata().clone(),
            }
        };

        if self.config.settlement.bank_precompile.is_none() {
            let e = SettlementError::Unavailable("no bank module configured".to_string());
            warn!(denom = %registration.denom, error = %e, "Bank metadata initialization skipped");
            return Err(e.into());
        }

        self.stats.lock().settlement_attempts += 1;
        let timeout = self.config.settlement.timeout();
        let outcome =
            match tokio::time::timeout(timeout, self.settlement.register_metadata(&registration)).await {
                Ok(result) => result,
                Err(_) => Err(SettlementError::Timeout {
                    timeout_ms: self.config.settlement.timeout_ms,
                }),
            };

        if let Err(e) = outcome {
            self.stats.lock().settlement_failures += 1;
            warn!(
                denom = %registration.denom,
                error = %e,
                "Bank metadata initialization failed, ledger stays usable"
            );
            return Err(e.into());
        }

        // Ownership may have moved while the call was in flight
        let committed = {
            let mut state = self.state.write();
            if state.owner() == caller {
                state.mark_metadata_initialized();
                state.record(LedgerEvent::MetadataInitialized {
                    denom: registration.denom.clone(),
                });
                Ok(())
            } else {
                Err(LedgerError::Unauthorized { caller })
            }
        };
        if let Err(e) = committed {
            self.rejected(Operation::InitializeMetadata, caller, &e);
            return Err(e);
        }
        self.stats.lock().mutations_applied += 1;

        info!(
            denom = %registration.denom,
            name = %registration.metadata.name,
            symbol = %registration.metadata.symbol,
            decimals = registration.metadata.decimals,
            "Bank metadata initialized"
        );
        Ok(())
    }

    fn name(&self) -> String {
        self.state.read().metadata().name.clone()
    }

    fn symbol(&self) -> String {
        self.state.read().metadata().symbol.clone()
    }

    fn decimals(&self) -> u8 {
        self.state.read().metadata().decimals
    }

    fn owner(&self) -> Address {
        self.state.read().owner()
    }

    fn paused(&self) -> bool {
        self.state.read().is_paused()
    }

    fn is_blacklisted(&self, account: Address) -> bool {
        self.state.read().is_blacklisted(&account)
    }

    fn balance_of(&self, account: Address) -> Amount {
        self.state.read().balance_of(&account)
    }

    fn total_supply(&self) -> Amount {
        self.state.read().total_supply()
    }
}

// =============================================================================
// BANK MODULE VIEW
// =============================================================================

impl<S: SettlementClient> TokenLedger<S> {
    fn ensure_contract(&self, contract: Address) -> Result<(), StatusQueryError> {
        if contract != self.contract_address() {
            return Err(StatusQueryError::UnknownContract(contract));
        }
        Ok(())
    }
}

impl<S: SettlementClient> TokenStatusSource for TokenLedger<S> {
    fn query_paused(&self, contract: Address) -> Result<bool, StatusQueryError> {
        self.ensure_contract(contract)?;
        Ok(self.paused())
    }

    fn query_blacklisted(&self, contract: Address, account: Address) -> Result<bool, StatusQueryError> {
        self.ensure_contract(contract)?;
        Ok(TokenLedgerApi::is_blacklisted(self, account))
    }
}

/// Word-encoded argument `index` of a view call, as an address.
fn address_arg(input: &[u8], index: usize) -> Result<Address, StatusQueryError> {
    let start = 4 + index * 32;
    let word = input
        .get(start..start + 32)
        .ok_or_else(|| StatusQueryError::Failed("call data too short".to_string()))?;
    if word[..12].iter().any(|&b| b != 0) {
        return Err(StatusQueryError::Failed("address argument not left-padded".to_string()));
    }
    Address::from_slice(&word[12..])
        .ok_or_else(|| StatusQueryError::Failed("malformed address argument".to_string()))
}

fn bool_word(value: bool) -> Vec<u8> {
    let mut out = vec![0u8; 32];
    out[31] = u8::from(value);
    out
}

fn amount_word(value: Amount) -> Vec<u8> {
    let mut out = vec![0u8; 32];
    value.to_big_endian(&mut out);
    out
}

impl<S: SettlementClient> ViewCaller for TokenLedger<S> {
    /// Answers `paused()`, `isBlacklisted(address)`, `balanceOf(address)`
    /// and `totalSupply()`.
    fn view_call(&self, contract: Address, input: &[u8]) -> Result<Vec<u8>, StatusQueryError> {
        self.ensure_contract(contract)?;
        let selector = input
            .get(..4)
            .ok_or_else(|| StatusQueryError::Failed("missing selector".to_string()))?;

        if selector == function_selector(PAUSED_SIGNATURE) {
            Ok(bool_word(self.paused()))
        } else if selector == function_selector(IS_BLACKLISTED_SIGNATURE) {
            let account = address_arg(input, 0)?;
            Ok(bool_word(TokenLedgerApi::is_blacklisted(self, account)))
        } else if selector == function_selector("balanceOf(address)") {
            let account = address_arg(input, 0)?;
            Ok(amount_word(self.balance_of(account)))
        } else if selector == function_selector("totalSupply()") {
            Ok(amount_word(self.total_supply()))
        } else {
            Err(StatusQueryError::Failed(format!(
                "unknown selector 0x{}",
                hex::encode(selector)
            )))
        }
    }
}
