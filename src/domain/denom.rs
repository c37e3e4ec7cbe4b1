//! Validated asset denomination names.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::PoolId;
use crate::error::RegistryError;

/// Prefix of the synthetic share denomination derived from a pool id.
pub const POOL_SHARE_PREFIX: &str = "pool-share/";

/// A fungible asset denomination, e.g. `"atom"` or `"pool-share/7"`.
///
/// Denominations are lowercase ASCII, 2 to 128 characters, drawn from
/// `[a-z0-9/-]`, and must start with a letter.  The share denomination
/// of a pool is derived deterministically with [`Denom::pool_share`];
/// the external ledger tracks its circulating amount, which must always
/// equal the pool's recorded total issued shares.
///
/// # Examples
///
/// ```
/// use lagoon::domain::{Denom, PoolId};
///
/// let atom = Denom::new("atom").expect("valid denom");
/// assert_eq!(atom.as_str(), "atom");
///
/// let share = Denom::pool_share(PoolId::new(7));
/// assert_eq!(share.as_str(), "pool-share/7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[must_use]
pub struct Denom(String);

impl Denom {
    /// Creates a validated denomination.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidPool`] if the name is empty, too
    /// long, does not start with a letter, or contains a character
    /// outside `[a-z0-9/-]`.
    pub fn new(name: &str) -> Result<Self, RegistryError> {
        if name.len() < 2 || name.len() > 128 {
            return Err(RegistryError::InvalidPool(format!(
                "denom {name:?} must be 2..=128 characters"
            )));
        }
        let mut chars = name.chars();
        let valid_head = chars.next().is_some_and(|c| c.is_ascii_lowercase());
        let valid_tail = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '/' || c == '-');
        if !valid_head || !valid_tail {
            return Err(RegistryError::InvalidPool(format!(
                "denom {name:?} contains invalid characters"
            )));
        }
        Ok(Self(name.to_string()))
    }

    /// Derives the synthetic share denomination for a pool.
    pub fn pool_share(pool_id: PoolId) -> Self {
        Self(format!("{POOL_SHARE_PREFIX}{pool_id}"))
    }

    /// Returns the denomination as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
