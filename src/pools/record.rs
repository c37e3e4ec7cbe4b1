//! Variant-preserving pool record and codec.
//!
//! [`PoolRecord`] wraps every concrete pool implementation behind a
//! single enum, enabling heterogeneous storage and zero-cost static
//! dispatch.  Each variant is feature-gated to match its pool type.
//!
//! The enum doubles as the persistence codec: serde's adjacent tagging
//! stores an explicit variant tag alongside the pool body, so a record
//! decodes back to the concrete type it was encoded from.

#[cfg(feature = "concentrated")]
use super::concentrated::ConcentratedPool;
#[cfg(feature = "stable")]
use super::stable::StablePool;
#[cfg(feature = "weighted")]
use super::weighted::WeightedPool;

use serde::{Deserialize, Serialize};

use crate::domain::{AccountAddress, Amount, Coins, PoolId, Timestamp};
use crate::error::Result;
use crate::traits::Pool;

/// Dispatch enum wrapping all concrete pool implementations.
///
/// Implements [`Pool`] by delegating every method to the inner variant
/// via `match`, keeping the variant set closed and exhaustively checked
/// by the compiler.  Serialized form is adjacently tagged:
///
/// ```json
/// {"variant":"weighted","pool":{...}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", content = "pool", rename_all = "snake_case")]
#[must_use]
pub enum PoolRecord {
    /// Balancer-style weighted pool.
    #[cfg(feature = "weighted")]
    Weighted(WeightedPool),

    /// Curve-style stable pool.
    #[cfg(feature = "stable")]
    Stable(StablePool),

    /// Uniswap-v3-style concentrated-liquidity pool.
    #[cfg(feature = "concentrated")]
    Concentrated(ConcentratedPool),
}

/// Delegates a method call to every `PoolRecord` variant.
macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            #[cfg(feature = "weighted")]
            PoolRecord::Weighted(p) => p.$method($($arg),*),
            #[cfg(feature = "stable")]
            PoolRecord::Stable(p) => p.$method($($arg),*),
            #[cfg(feature = "concentrated")]
            PoolRecord::Concentrated(p) => p.$method($($arg),*),
        }
    };
}

impl PoolRecord {
    /// Serializes the record, variant tag included.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Codec`](crate::error::RegistryError::Codec)
    /// if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes a record, restoring the concrete variant it was encoded
    /// from.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Codec`](crate::error::RegistryError::Codec)
    /// on malformed bytes or an unknown variant tag.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl Pool for PoolRecord {
    fn id(&self) -> PoolId {
        delegate!(self, id())
    }

    fn address(&self) -> AccountAddress {
        delegate!(self, address())
    }

    fn total_shares(&self) -> Amount {
        delegate!(self, total_shares())
    }

    fn total_pool_liquidity(&self) -> Coins {
        delegate!(self, total_pool_liquidity())
    }

    fn is_active(&self) -> bool {
        delegate!(self, is_active())
    }

    fn poke(&mut self, now: Timestamp) {
        delegate!(self, poke(now))
    }
}
