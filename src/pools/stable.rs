//! StableSwap-style pool with an amplification parameter.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountAddress, Amount, Coins, PoolId, Timestamp};
use crate::error::{RegistryError, Result};
use crate::traits::Pool;

/// Curve-style stable-asset pool.
///
/// Carries the amplification coefficient its pricing logic needs, but no
/// time-dependent state: [`Pool::poke`] is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct StablePool {
    id: PoolId,
    address: AccountAddress,
    total_shares: Amount,
    liquidity: Coins,
    amplification: u64,
    paused: bool,
}

impl StablePool {
    /// Creates a stable pool.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidPool`] if the amplification is
    /// zero or fewer than two denominations are supplied.
    pub fn new(
        id: PoolId,
        liquidity: Coins,
        total_shares: Amount,
        amplification: u64,
    ) -> Result<Self> {
        if amplification == 0 {
            return Err(RegistryError::InvalidPool(
                "stable pool amplification must be nonzero".to_string(),
            ));
        }
        if liquidity.len() < 2 {
            return Err(RegistryError::InvalidPool(
                "stable pool needs at least two denominations".to_string(),
            ));
        }
        Ok(Self {
            id,
            address: AccountAddress::for_pool(id),
            total_shares,
            liquidity,
            amplification,
            paused: false,
        })
    }

    /// The amplification coefficient.
    #[must_use]
    pub const fn amplification(&self) -> u64 {
        self.amplification
    }

    /// Locks or unlocks the pool for trading.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

impl Pool for StablePool {
    fn id(&self) -> PoolId {
        self.id
    }

    fn address(&self) -> AccountAddress {
        self.address.clone()
    }

    fn total_shares(&self) -> Amount {
        self.total_shares
    }

    fn total_pool_liquidity(&self) -> Coins {
        self.liquidity.clone()
    }

    fn is_active(&self) -> bool {
        !self.paused
    }

    fn poke(&mut self, _now: Timestamp) {}
}
