//! In-Memory Bank Keeper Adapter
//!
//! Stands in for the bank module: keeps denom metadata in memory, can be
//! switched offline and can simulate a slow module.

use crate::domain::{Erc20Denom, SettlementError, TokenMetadata};
use crate::ports::outbound::{MetadataRegistration, SettlementClient};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// In-memory bank module.
pub struct InMemoryBankKeeper {
    /// Registered metadata per denom.
    metadata: RwLock<HashMap<Erc20Denom, TokenMetadata>>,
    /// Whether the module answers at all.
    available: AtomicBool,
    /// Artificial delay before answering.
    latency: Duration,
    /// Registration attempts, successful or not.
    attempts: AtomicU64,
}

impl InMemoryBankKeeper {
    /// Create an available keeper with no latency.
    pub fn new() -> Self {
        Self {
            metadata: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
            latency: Duration::ZERO,
            attempts: AtomicU64::new(0),
        }
    }

    /// Keeper that is offline until [`set_available`](Self::set_available).
    pub fn unavailable() -> Self {
        let keeper = Self::new();
        keeper.set_available(false);
        keeper
    }

    /// Delay every answer by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Bring the module online or take it offline.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Metadata registered for `denom`.
    pub fn metadata(&self, denom: &Erc20Denom) -> Option<TokenMetadata> {
        self.metadata.read().get(denom).cloned()
    }

    /// Number of registered denoms.
    pub fn registered_count(&self) -> usize {
        self.metadata.read().len()
    }

    /// Registration attempts seen so far.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryBankKeeper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettlementClient for InMemoryBankKeeper {
    async fn register_metadata(
        &self,
        registration: &MetadataRegistration,
    ) -> Result<(), SettlementError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if !self.available.load(Ordering::SeqCst) {
            debug!(denom = %registration.denom, "Bank keeper offline");
            return Err(SettlementError::Unavailable(
                "bank keeper offline".to_string(),
            ));
        }

        self.metadata
            .write()
            .insert(registration.denom, registration.metadata.clone());

        info!(
            denom = %registration.denom,
            symbol = %registration.metadata.symbol,
            "Registered denom metadata"
        );
        Ok(())
    }
}
