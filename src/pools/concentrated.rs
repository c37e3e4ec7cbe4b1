//! Concentrated-liquidity pool with tick-based state.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountAddress, Amount, Coins, PoolId, Timestamp};
use crate::error::{RegistryError, Result};
use crate::traits::Pool;

/// Uniswap-v3-style pool tracking a current tick and tick spacing.
///
/// Curve math and position accounting live outside the lifecycle layer;
/// the record only carries the state the registry must persist.  Poke is
/// a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct ConcentratedPool {
    id: PoolId,
    address: AccountAddress,
    total_shares: Amount,
    liquidity: Coins,
    current_tick: i64,
    tick_spacing: u64,
    paused: bool,
}

impl ConcentratedPool {
    /// Creates a concentrated-liquidity pool.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidPool`] if `tick_spacing` is zero
    /// or the current tick is not aligned to it.
    pub fn new(
        id: PoolId,
        liquidity: Coins,
        total_shares: Amount,
        current_tick: i64,
        tick_spacing: u64,
    ) -> Result<Self> {
        if tick_spacing == 0 {
            return Err(RegistryError::InvalidPool(
                "tick spacing must be nonzero".to_string(),
            ));
        }
        let spacing = i64::try_from(tick_spacing)
            .map_err(|_| RegistryError::InvalidPool("tick spacing too large".to_string()))?;
        if current_tick % spacing != 0 {
            return Err(RegistryError::InvalidPool(format!(
                "current tick {current_tick} not aligned to spacing {tick_spacing}"
            )));
        }
        Ok(Self {
            id,
            address: AccountAddress::for_pool(id),
            total_shares,
            liquidity,
            current_tick,
            tick_spacing,
            paused: false,
        })
    }

    /// The pool's current tick.
    #[must_use]
    pub const fn current_tick(&self) -> i64 {
        self.current_tick
    }

    /// Distance between initializable ticks.
    #[must_use]
    pub const fn tick_spacing(&self) -> u64 {
        self.tick_spacing
    }

    /// Locks or unlocks the pool for trading.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

impl Pool for ConcentratedPool {
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
