//! Property-based tests using `proptest` for registry invariants.
//!
//! Covers four properties:
//!
//! 1. **Weight interpolation bounds** — a poked weight never leaves the
//!    band between its initial and target value.
//! 2. **Poke idempotence** — poking twice at the same instant equals
//!    poking once.
//! 3. **Liquidation conservation** — forced exits pay out exactly the
//!    recorded liquidity, burn every share, and delete the pool.
//! 4. **Sequential id allocation** — the counter hands out consecutive
//!    ids with no gaps or reuse.

#![cfg(feature = "weighted")]
#![allow(clippy::panic)]

use proptest::prelude::*;

use crate::cleanup::cleanup_pools;
use crate::domain::{AccountAddress, Amount, Coin, Denom, PoolId, Timestamp};
use crate::error::RegistryError;
use crate::ledger::{Ledger, MemLedger};
use crate::pools::{PoolAsset, SmoothWeightChange, WeightedPool};
use crate::registry::PoolRegistry;
use crate::store::MemStore;
use crate::traits::Pool;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const HOLDER_NAMES: [&str; 4] = ["holdera", "holderb", "holderc", "holderd"];

fn denom(name: &str) -> Denom {
    let Ok(d) = Denom::new(name) else {
        panic!("valid denom");
    };
    d
}

fn addr(s: &str) -> AccountAddress {
    let Ok(a) = AccountAddress::parse(s) else {
        panic!("valid address");
    };
    a
}

fn two_asset_pool(id: u64, la: u128, lb: u128, total_shares: u128) -> WeightedPool {
    let assets = vec![
        PoolAsset {
            coin: Coin::new(denom("tokena"), Amount::new(la)),
            weight: 1,
        },
        PoolAsset {
            coin: Coin::new(denom("tokenb"), Amount::new(lb)),
            weight: 1,
        },
    ];
    let Ok(pool) = WeightedPool::new(PoolId::new(id), assets, Amount::new(total_shares)) else {
        panic!("valid pool");
    };
    pool
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Nonzero weights away from u64::MAX so interpolation arithmetic stays
/// in range.
fn weight_strategy() -> impl Strategy<Value = u64> {
    1u64..=1_000_000_000u64
}

/// Liquidity amounts well inside u128 so products with share counts
/// cannot overflow.
fn liquidity_strategy() -> impl Strategy<Value = u128> {
    1u128..=1_000_000_000_000u128
}

/// Per-holder share balances, one to four holders, all nonzero.
fn holders_strategy() -> impl Strategy<Value = Vec<u128>> {
    proptest::collection::vec(1u128..=1_000_000u128, 1..=4)
}

// ---------------------------------------------------------------------------
// Property 1: Weight interpolation bounds
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_interpolated_weights_stay_bounded(
        wa_init in weight_strategy(),
        wa_target in weight_strategy(),
        wb_init in weight_strategy(),
        wb_target in weight_strategy(),
        start in 0u64..=1_000_000u64,
        duration in 1u64..=1_000_000u64,
        offset in 0u64..=2_000_000u64,
    ) {
        let mut pool = two_asset_pool(1, 100, 100, 1_000);
        let change = SmoothWeightChange {
            start_time: Timestamp::new(start),
            duration_secs: duration,
            initial_weights: vec![wa_init, wb_init],
            target_weights: vec![wa_target, wb_target],
        };
        let Ok(()) = pool.schedule_weight_change(change) else {
            return Err(TestCaseError::fail("schedule rejected"));
        };

        pool.poke(Timestamp::new(start.saturating_add(offset)));

        let weights = pool.weights();
        let bounds = [(wa_init, wa_target), (wb_init, wb_target)];
        for (weight, (init, target)) in weights.iter().zip(bounds) {
            prop_assert!(
                *weight >= init.min(target) && *weight <= init.max(target),
                "weight {} left the band [{}, {}]",
                weight, init.min(target), init.max(target)
            );
        }

        // Once the window has fully elapsed, weights pin to targets and
        // the schedule is gone.
        if offset >= duration {
            prop_assert_eq!(weights, vec![wa_target, wb_target]);
            prop_assert!(pool.weight_change().is_none());
        }
    }

    #[test]
    fn prop_poke_is_idempotent(
        wa_target in weight_strategy(),
        wb_target in weight_strategy(),
        start in 0u64..=1_000u64,
        duration in 1u64..=1_000u64,
        offset in 0u64..=2_000u64,
    ) {
        let mut pool = two_asset_pool(1, 100, 100, 1_000);
        let change = SmoothWeightChange {
            start_time: Timestamp::new(start),
            duration_secs: duration,
            initial_weights: vec![7, 13],
            target_weights: vec![wa_target, wb_target],
        };
        let Ok(()) = pool.schedule_weight_change(change) else {
            return Err(TestCaseError::fail("schedule rejected"));
        };

        let now = Timestamp::new(start.saturating_add(offset));
        pool.poke(now);
        let after_first = pool.clone();
        pool.poke(now);
        prop_assert_eq!(pool, after_first);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Liquidation conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_liquidation_conserves_assets(
        la in liquidity_strategy(),
        lb in liquidity_strategy(),
        shares in holders_strategy(),
    ) {
        let total_shares: u128 = shares.iter().sum();

        let mut registry = PoolRegistry::new(MemStore::new());
        registry.init_genesis(PoolId::new(1));
        let pool = two_asset_pool(1, la, lb, total_shares);
        let address = pool.address();
        let Ok(()) = registry.put(&crate::pools::PoolRecord::Weighted(pool)) else {
            return Err(TestCaseError::fail("put rejected"));
        };

        let mut ledger = MemLedger::new();
        let Ok(()) = ledger.fund(&address, Coin::new(denom("tokena"), Amount::new(la))) else {
            return Err(TestCaseError::fail("fund rejected"));
        };
        let Ok(()) = ledger.fund(&address, Coin::new(denom("tokenb"), Amount::new(lb))) else {
            return Err(TestCaseError::fail("fund rejected"));
        };
        let share_denom = Denom::pool_share(PoolId::new(1));
        for (name, amount) in HOLDER_NAMES.iter().zip(&shares) {
            let Ok(()) = ledger.fund(&addr(name), Coin::new(share_denom.clone(), Amount::new(*amount)))
            else {
                return Err(TestCaseError::fail("fund rejected"));
            };
        }

        let Ok(()) = cleanup_pools(&mut registry, &mut ledger, Timestamp::new(0), &[PoolId::new(1)])
        else {
            return Err(TestCaseError::fail("cleanup failed"));
        };

        // Running-total refunds hand the last holder the full remainder,
        // so payouts sum to the recorded liquidity exactly.
        let mut paid_a = Amount::ZERO;
        let mut paid_b = Amount::ZERO;
        for name in HOLDER_NAMES.iter().take(shares.len()) {
            prop_assert!(ledger.balance(&addr(name), &share_denom).is_zero());
            let Some(next_a) = paid_a.checked_add(&ledger.balance(&addr(name), &denom("tokena")))
            else {
                return Err(TestCaseError::fail("payout overflow"));
            };
            let Some(next_b) = paid_b.checked_add(&ledger.balance(&addr(name), &denom("tokenb")))
            else {
                return Err(TestCaseError::fail("payout overflow"));
            };
            paid_a = next_a;
            paid_b = next_b;
        }
        prop_assert_eq!(paid_a, Amount::new(la));
        prop_assert_eq!(paid_b, Amount::new(lb));

        prop_assert!(ledger.balances(&address).is_zero());
        prop_assert!(
            matches!(
                registry.get(PoolId::new(1), Timestamp::new(0)),
                Err(RegistryError::PoolNotFound { .. })
            ),
            "expected PoolNotFound after retirement"
        );
    }
}

// ---------------------------------------------------------------------------
// Property 4: Sequential id allocation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_id_allocation_is_sequential(
        start in 1u64..=u64::from(u32::MAX),
        count in 1usize..=20usize,
    ) {
        let mut registry = PoolRegistry::new(MemStore::new());
        registry.init_genesis(PoolId::new(start));

        for step in 0..count {
            let Ok(id) = registry.allocate_next_id() else {
                return Err(TestCaseError::fail("allocation failed"));
            };
            prop_assert_eq!(id, PoolId::new(start + step as u64));
        }
        let Ok(upcoming) = registry.next_pool_id() else {
            return Err(TestCaseError::fail("counter read failed"));
        };
        prop_assert_eq!(upcoming, PoolId::new(start + count as u64));
    }
}
