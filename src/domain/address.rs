//! Validated account addresses.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::PoolId;
use crate::error::RegistryError;

/// An account address on the ledger.
///
/// Addresses are opaque identifiers: lowercase ASCII alphanumerics,
/// 3 to 90 characters.  Pools control funds through an address derived
/// deterministically from their id via [`AccountAddress::for_pool`].
/// Hook bindings store addresses as raw strings and re-validate them
/// through [`AccountAddress::parse`] on write.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[must_use]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Parses and validates an address string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MalformedAddress`] if the string is not
    /// 3 to 90 lowercase ASCII alphanumeric characters.
    pub fn parse(address: &str) -> Result<Self, RegistryError> {
        let well_formed = (3..=90).contains(&address.len())
            && address
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        if !well_formed {
            return Err(RegistryError::MalformedAddress {
                address: address.to_string(),
            });
        }
        Ok(Self(address.to_string()))
    }

    /// Derives the address controlling a pool's held liquidity.
    pub fn for_pool(pool_id: PoolId) -> Self {
        Self(format!("pool{pool_id}"))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
