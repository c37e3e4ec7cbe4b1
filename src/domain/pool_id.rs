//! Dense numeric pool identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a liquidity pool.
///
/// Ids are allocated by the registry from a persisted counter and are
/// strictly increasing: a deleted pool's id is never reassigned.  The
/// first id handed out at genesis is conventionally `1`, so live ids
/// always fall in `[1, next_id)`.
///
/// # Examples
///
/// ```
/// use lagoon::domain::PoolId;
///
/// let id = PoolId::new(7);
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
#[must_use]
pub struct PoolId(u64);

impl PoolId {
    /// Creates a pool id from a raw `u64` value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying `u64` value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns the id following this one in allocation order,
    /// saturating at the maximum representable id.
    pub const fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Big-endian byte encoding, used to build store keys that iterate
    /// in ascending id order.
    #[must_use]
    pub const fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PoolId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
