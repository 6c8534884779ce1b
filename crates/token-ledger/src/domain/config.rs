//! Ledger configuration with validation.
//!
//! Loaded from defaults, JSON, or `LEDGER_*` environment variables.

use super::entities::DEFAULT_JOURNAL_CAPACITY;
use super::value_objects::{Address, Operation, BANK_PRECOMPILE_ADDRESS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Maximum token name length in bytes.
pub const MAX_NAME_LEN: usize = 64;

/// Maximum token symbol length in bytes.
pub const MAX_SYMBOL_LEN: usize = 16;

/// Main ledger configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Token metadata
    pub token: TokenConfig,
    /// Bank module bridge
    pub settlement: SettlementConfig,
    /// Operations halted by the circuit-breaker
    pub pause: PausePolicy,
    /// Event journal bounds
    pub journal: JournalConfig,
}

impl LedgerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.name.is_empty() || self.token.name.len() > MAX_NAME_LEN {
            return Err(ConfigError::InvalidToken(format!(
                "name must be 1..={MAX_NAME_LEN} bytes"
            )));
        }
        if self.token.symbol.is_empty() || self.token.symbol.len() > MAX_SYMBOL_LEN {
            return Err(ConfigError::InvalidToken(format!(
                "symbol must be 1..={MAX_SYMBOL_LEN} bytes"
            )));
        }

        if self.settlement.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout(
                "settlement timeout cannot be 0".into(),
            ));
        }

        if self.journal.capacity == 0 {
            return Err(ConfigError::InvalidJournal(
                "journal capacity cannot be 0".into(),
            ));
        }

        // Unpause must stay reachable
        if self.pause.blocked.contains(&Operation::Unpause) {
            return Err(ConfigError::InvalidPausePolicy(
                "unpause cannot be blocked by pause".into(),
            ));
        }

        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LEDGER_TOKEN_NAME`: Token name (default: MyUSDC)
    /// - `LEDGER_TOKEN_SYMBOL`: Token symbol (default: mUSDC)
    /// - `LEDGER_BANK_PRECOMPILE`: Precompile address, or `none` (default: 0x...64)
    /// - `LEDGER_SETTLEMENT_TIMEOUT_MS`: Bridge timeout (default: 5000)
    /// - `LEDGER_EVENT_JOURNAL_CAPACITY`: Journal entries kept (default: 10000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bank_precompile = match lookup("LEDGER_BANK_PRECOMPILE") {
            Some(raw) if raw.trim().eq_ignore_ascii_case("none") => None,
            Some(raw) => Some(raw.trim().parse::<Address>().map_err(|_| {
                ConfigError::Parse(format!("LEDGER_BANK_PRECOMPILE is not an address: {raw}"))
            })?),
            None => defaults.settlement.bank_precompile,
        };

        let timeout_ms = parse_number(&lookup, "LEDGER_SETTLEMENT_TIMEOUT_MS")?
            .unwrap_or(defaults.settlement.timeout_ms);
        let capacity = parse_number(&lookup, "LEDGER_EVENT_JOURNAL_CAPACITY")?
            .unwrap_or(defaults.journal.capacity);

        let config = Self {
            token: TokenConfig {
                name: lookup("LEDGER_TOKEN_NAME").unwrap_or(defaults.token.name),
                symbol: lookup("LEDGER_TOKEN_SYMBOL").unwrap_or(defaults.token.symbol),
            },
            settlement: SettlementConfig {
                bank_precompile,
                timeout_ms,
            },
            pause: defaults.pause,
            journal: JournalConfig { capacity },
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("{key} is not a number: {raw}")))
        })
        .transpose()
}

/// Token metadata configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "MyUSDC".to_string(),
            symbol: "mUSDC".to_string(),
        }
    }
}

/// Settlement bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Bank precompile address; `None` when no bank module exists
    pub bank_precompile: Option<Address>,
    /// Timeout for the metadata registration call
    pub timeout_ms: u64,
}

impl SettlementConfig {
    /// Timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            bank_precompile: Some(BANK_PRECOMPILE_ADDRESS),
            timeout_ms: 5000,
        }
    }
}

/// Which operations the circuit-breaker halts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PausePolicy {
    /// Blocked operations
    pub blocked: BTreeSet<Operation>,
}

impl PausePolicy {
    /// Whether `operation` is halted while paused.
    pub fn blocks(&self, operation: Operation) -> bool {
        self.blocked.contains(&operation)
    }
}

impl Default for PausePolicy {
    fn default() -> Self {
        Self {
            blocked: Operation::ALL
                .into_iter()
                .filter(Operation::is_value_moving)
                .collect(),
        }
    }
}

/// Event journal configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Entries kept before the oldest is evicted
    pub capacity: usize,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_JOURNAL_CAPACITY,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Malformed input
    #[error("Parse error: {0}")]
    Parse(String),
    /// Bad token metadata
    #[error("Invalid token config: {0}")]
    InvalidToken(String),
    /// Bad timeout
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
    /// Bad pause policy
    #[error("Invalid pause policy: {0}")]
    InvalidPausePolicy(String),
    /// Bad journal bounds
    #[error("Invalid journal config: {0}")]
    InvalidJournal(String),
}
