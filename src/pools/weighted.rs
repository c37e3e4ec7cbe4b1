//! Weighted multi-asset pool with smooth weight changes.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountAddress, Amount, Coin, Coins, PoolId, Timestamp};
use crate::error::{RegistryError, Result};
use crate::traits::Pool;

/// Minimum number of assets in a weighted pool.
pub const MIN_POOL_ASSETS: usize = 2;

/// Maximum number of assets in a weighted pool.
pub const MAX_POOL_ASSETS: usize = 8;

/// One asset held by a weighted pool, together with its current
/// normalized weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolAsset {
    /// Denomination and recorded amount held.
    pub coin: Coin,
    /// Current weight.  Only ratios between weights matter.
    pub weight: u64,
}

/// A scheduled linear transition of asset weights over a time window.
///
/// While the schedule is live, [`WeightedPool::poke`] interpolates each
/// asset's weight between its initial and target value proportionally to
/// elapsed time.  Once `start_time + duration` has passed, weights pin
/// to their targets and the schedule is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothWeightChange {
    /// When the transition begins.
    pub start_time: Timestamp,
    /// Length of the transition window in seconds.  Must be nonzero.
    pub duration_secs: u64,
    /// Weights at `start_time`, one per asset in asset order.
    pub initial_weights: Vec<u64>,
    /// Weights at `start_time + duration_secs`, one per asset.
    pub target_weights: Vec<u64>,
}

/// Balancer-style pool holding 2 to 8 assets at configurable weights.
///
/// This is the only variant with time-dependent internal state: an
/// optional [`SmoothWeightChange`] that poke resolves lazily on every
/// read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct WeightedPool {
    id: PoolId,
    address: AccountAddress,
    total_shares: Amount,
    assets: Vec<PoolAsset>,
    weight_change: Option<SmoothWeightChange>,
    paused: bool,
}

impl WeightedPool {
    /// Creates a weighted pool.  The pool's address is derived from its
    /// id; assets are stored sorted by denomination.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidPool`] if the asset count is
    /// outside `2..=8`, a weight is zero, or a denomination repeats.
    pub fn new(id: PoolId, assets: Vec<PoolAsset>, total_shares: Amount) -> Result<Self> {
        if assets.len() < MIN_POOL_ASSETS || assets.len() > MAX_POOL_ASSETS {
            return Err(RegistryError::InvalidPool(format!(
                "weighted pool needs {MIN_POOL_ASSETS}..={MAX_POOL_ASSETS} assets, got {}",
                assets.len()
            )));
        }
        if assets.iter().any(|a| a.weight == 0) {
            return Err(RegistryError::InvalidPool(
                "weighted pool asset weights must be nonzero".to_string(),
            ));
        }
        let mut assets = assets;
        assets.sort_by(|a, b| a.coin.denom.cmp(&b.coin.denom));
        if assets.windows(2).any(|w| w[0].coin.denom == w[1].coin.denom) {
            return Err(RegistryError::InvalidPool(
                "weighted pool asset denominations must be distinct".to_string(),
            ));
        }
        Ok(Self {
            id,
            address: AccountAddress::for_pool(id),
            total_shares,
            assets,
            weight_change: None,
            paused: false,
        })
    }

    /// The pool's assets in denomination order.
    #[must_use]
    pub fn assets(&self) -> &[PoolAsset] {
        &self.assets
    }

    /// Current weights in asset order.
    #[must_use]
    pub fn weights(&self) -> Vec<u64> {
        self.assets.iter().map(|a| a.weight).collect()
    }

    /// The live weight-change schedule, if any.
    #[must_use]
    pub fn weight_change(&self) -> Option<&SmoothWeightChange> {
        self.weight_change.as_ref()
    }

    /// Schedules a smooth weight change.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidPool`] if the weight vectors do
    /// not match the asset count, contain zeros, or the duration is
    /// zero.
    pub fn schedule_weight_change(&mut self, change: SmoothWeightChange) -> Result<()> {
        let n = self.assets.len();
        if change.initial_weights.len() != n || change.target_weights.len() != n {
            return Err(RegistryError::InvalidPool(format!(
                "weight change must cover all {n} assets"
            )));
        }
        if change.duration_secs == 0 {
            return Err(RegistryError::InvalidPool(
                "weight change duration must be nonzero".to_string(),
            ));
        }
        if change
            .initial_weights
            .iter()
            .chain(&change.target_weights)
            .any(|&w| w == 0)
        {
            return Err(RegistryError::InvalidPool(
                "weight change weights must be nonzero".to_string(),
            ));
        }
        self.weight_change = Some(change);
        Ok(())
    }

    /// Locks or unlocks the pool for trading.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

impl Pool for WeightedPool {
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
        let mut liquidity = Coins::new();
        for asset in &self.assets {
            // Amounts were validated on construction; duplicate denoms
            // are impossible, so this add cannot fail.
            if let Some(next) = liquidity.checked_add(&asset.coin) {
                liquidity = next;
            }
        }
        liquidity
    }

    fn is_active(&self) -> bool {
        !self.paused
    }

    fn poke(&mut self, now: Timestamp) {
        let Some(change) = self.weight_change.clone() else {
            return;
        };

        if now < change.start_time {
            // Transition not begun: weights sit at their initial values.
            for (asset, &w) in self.assets.iter_mut().zip(&change.initial_weights) {
                asset.weight = w;
            }
            return;
        }

        let elapsed = now.saturating_since(change.start_time);
        if elapsed >= change.duration_secs {
            for (asset, &w) in self.assets.iter_mut().zip(&change.target_weights) {
                asset.weight = w;
            }
            self.weight_change = None;
            return;
        }

        for (idx, asset) in self.assets.iter_mut().enumerate() {
            let initial = i128::from(change.initial_weights[idx]);
            let target = i128::from(change.target_weights[idx]);
            let delta = (target - initial) * i128::from(elapsed) / i128::from(change.duration_secs);
            // initial + delta stays within [min(initial, target), max(initial, target)],
            // so the cast back to u64 is lossless.
            asset.weight = (initial + delta) as u64;
        }
    }
}
