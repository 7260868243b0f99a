//! # Core Domain Entities
//!
//! Value types shared across FinTrust subsystems.
//!
//! ## Clusters
//!
//! - **Ledger**: `TxHash`, `Timestamp`
//! - **Settlement**: `AccountId`, `Amount`

use crate::errors::IdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decimal money amount. Never a float.
pub use rust_decimal::Decimal as Amount;

/// Milliseconds since the UNIX epoch.
pub type Timestamp = u64;

/// Settlement account name (e.g. `BankA`).
pub type AccountId = String;

/// Maximum length of an account name.
pub const MAX_ACCOUNT_ID_LEN: usize = 64;

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as Timestamp
}

// =============================================================================
// LEDGER
// =============================================================================

/// Ledger transaction hash.
///
/// Shape: `"0x"` + 8 hex chars of randomness + the submission timestamp in hex.
/// The hash is an identifier only; it is not derived from the payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    /// Hex prefix carried by every generated hash.
    pub const PREFIX: &'static str = "0x";

    /// Builds a hash from its random component and submission time.
    pub fn from_parts(random: u32, timestamp: Timestamp) -> Self {
        Self(format!("{}{:08x}{:x}", Self::PREFIX, random, timestamp))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns true if the value looks like a generated hash.
    pub fn is_well_formed(&self) -> bool {
        is_well_formed_hash(&self.0)
    }
}

fn is_well_formed_hash(value: &str) -> bool {
    match value.strip_prefix(TxHash::PREFIX) {
        Some(digits) => digits.len() > 8 && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TxHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Unchecked conversion, used for lookups of client-supplied values.
impl From<&str> for TxHash {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TxHash {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl FromStr for TxHash {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_well_formed_hash(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(IdError::MalformedTxHash(s.to_string()))
        }
    }
}

// =============================================================================
// SETTLEMENT
// =============================================================================

/// Validates an account name: non-empty, bounded, `[A-Za-z0-9_-]` only.
pub fn validate_account_id(account: &str) -> Result<(), IdError> {
    if account.is_empty() {
        return Err(IdError::EmptyAccountId);
    }
    if account.len() > MAX_ACCOUNT_ID_LEN {
        return Err(IdError::AccountIdTooLong {
            len: account.len(),
            max: MAX_ACCOUNT_ID_LEN,
        });
    }
    if !account
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(IdError::InvalidAccountId(account.to_string()));
    }
    Ok(())
}
