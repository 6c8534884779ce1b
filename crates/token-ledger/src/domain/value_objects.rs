//! # Value Objects
//!
//! Immutable domain primitives for the token ledger: addresses, amounts,
//! the settlement denom and the operation catalogue used by the guard.

use super::errors::LedgerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// Re-export U256 from primitive-types for 256-bit balance arithmetic
pub use primitive_types::U256;

/// Token amount in base units (6 implied decimals).
pub type Amount = U256;

/// Fixed number of decimals for the token.
pub const DECIMALS: u8 = 6;

/// Prefix under which the bank module recognizes EVM-issued tokens.
pub const DENOM_PREFIX: &str = "erc20:";

/// Well-known bank precompile entry point (0x...64).
pub const BANK_PRECOMPILE_ADDRESS: Address = {
    let mut bytes = [0u8; 20];
    bytes[19] = 0x64;
    Address(bytes)
};

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte account or contract address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 20 {
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Lowercase `0x`-prefixed hex rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = LedgerError;

    /// Parses `0x`-prefixed (or bare) hex, accepting any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != 40 {
            return Err(LedgerError::InvalidAddress(s.to_string()));
        }
        let bytes = hex::decode(digits).map_err(|_| LedgerError::InvalidAddress(s.to_string()))?;
        Self::from_slice(&bytes).ok_or_else(|| LedgerError::InvalidAddress(s.to_string()))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// SETTLEMENT DENOM
// =============================================================================

/// Identifier under which the bank module mirrors this ledger's token.
///
/// Always rendered as `erc20:` followed by the lowercase hex contract address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Erc20Denom {
    contract: Address,
}

impl Erc20Denom {
    /// Derives the denom for a ledger contract address.
    #[must_use]
    pub const fn for_contract(contract: Address) -> Self {
        Self { contract }
    }

    /// The contract address encoded in this denom.
    #[must_use]
    pub const fn contract(&self) -> Address {
        self.contract
    }
}

impl fmt::Display for Erc20Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DENOM_PREFIX}{}", self.contract.to_hex())
    }
}

impl fmt::Debug for Erc20Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Erc20Denom {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .strip_prefix(DENOM_PREFIX)
            .ok_or_else(|| LedgerError::InvalidDenom(s.to_string()))?;
        let contract = raw
            .parse::<Address>()
            .map_err(|_| LedgerError::InvalidDenom(s.to_string()))?;
        Ok(Self { contract })
    }
}

impl Serialize for Erc20Denom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Erc20Denom {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// TOKEN METADATA
// =============================================================================

/// Name, symbol and decimals handed to the bank module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Human-readable token name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Decimal places (always [`DECIMALS`]).
    pub decimals: u8,
}

impl TokenMetadata {
    /// Creates metadata with the fixed ledger decimals.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals: DECIMALS,
        }
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Every entry point that can mutate the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Credit new supply to an account.
    Mint,
    /// Move balance between accounts.
    Transfer,
    /// Destroy part of the caller's balance.
    Burn,
    /// Engage the circuit-breaker.
    Pause,
    /// Release the circuit-breaker.
    Unpause,
    /// Add an account to the denylist.
    Blacklist,
    /// Remove an account from the denylist.
    Unblacklist,
    /// Hand administration to another account.
    TransferOwnership,
    /// Register token metadata with the bank module.
    InitializeMetadata,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 9] = [
        Self::Mint,
        Self::Transfer,
        Self::Burn,
        Self::Pause,
        Self::Unpause,
        Self::Blacklist,
        Self::Unblacklist,
        Self::TransferOwnership,
        Self::InitializeMetadata,
    ];

    /// Whether only the owner may invoke this operation.
    #[must_use]
    pub fn requires_owner(&self) -> bool {
        !matches!(self, Self::Transfer | Self::Burn)
    }

    /// Whether this operation moves value (changes balances).
    #[must_use]
    pub fn is_value_moving(&self) -> bool {
        matches!(self, Self::Mint | Self::Transfer | Self::Burn)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mint => "mint",
            Self::Transfer => "transfer",
            Self::Burn => "burn",
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::Blacklist => "blacklist",
            Self::Unblacklist => "unblacklist",
            Self::TransferOwnership => "transfer_ownership",
            Self::InitializeMetadata => "initialize_metadata",
        };
        f.write_str(name)
    }
}

// =============================================================================
// UNIT CONVERSION
// =============================================================================

/// Converts whole tokens into base units.
#[must_use]
pub fn units(whole: u64) -> Amount {
    U256::from(whole) * U256::exp10(DECIMALS as usize)
}

/// Parses a decimal token string ("100", "12.5") into base units.
pub fn parse_units(value: &str) -> Result<Amount, LedgerError> {
    let value = value.trim();
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(LedgerError::InvalidAmount(format!("not a decimal number: {value:?}")));
    }
    if fraction.len() > DECIMALS as usize {
        return Err(LedgerError::InvalidAmount(format!(
            "more than {DECIMALS} fractional digits: {value:?}"
        )));
    }

    let whole = if whole.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(whole).map_err(|_| LedgerError::Overflow)?
    };
    let padded = format!("{fraction:0<width$}", width = DECIMALS as usize);
    let fraction = U256::from_dec_str(&padded).map_err(|_| LedgerError::Overflow)?;

    whole
        .checked_mul(U256::exp10(DECIMALS as usize))
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or(LedgerError::Overflow)
}

/// Formats base units as a decimal token string ("90.0", "0.5").
#[must_use]
pub fn format_units(amount: Amount) -> String {
    let scale = U256::exp10(DECIMALS as usize);
    let whole = amount / scale;
    let fraction = (amount % scale).low_u64();
    let digits = format!("{fraction:0width$}", width = DECIMALS as usize);
    let trimmed = digits.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{trimmed}")
    }
}
