//! Forced liquidation of pools: burn every outstanding share, refund
//! underlying assets proportionally, then delete the pools.
//!
//! Cleanup runs a single full scan over the ledger's balance set, so
//! its cost scales with total accounts rather than per-pool holders.
//! It is intended for administrative use only, after all voluntary
//! holds on the affected share tokens have been released by the
//! time-lock collaborator; that precondition is stated, not enforced
//! here.  The enclosing transaction provides atomicity: any error
//! leaves no partial effect once the caller discards the unit of work.

use std::collections::BTreeMap;
use std::ops::ControlFlow;
use std::slice;

use tracing::{debug, info};

use crate::domain::{AccountAddress, Amount, Coin, Coins, Denom, PoolId, Timestamp};
use crate::error::{RegistryError, Result};
use crate::ledger::Ledger;
use crate::registry::PoolRegistry;
use crate::store::KeyedStore;
use crate::traits::Pool;
use crate::MODULE_NAME;

/// Running per-pool totals, keyed by share denomination.  Updated after
/// every holder so later holders divide by the remaining totals, not
/// the originals.
#[derive(Debug)]
struct PoolSnapshot {
    pool_id: PoolId,
    address: AccountAddress,
    total_shares: Amount,
    liquidity: Coins,
}

/// Force-exits every share holder of the given pools and removes the
/// pools from the registry.
///
/// For each holder, their full share balance is transferred into the
/// module collection account and burned, then each pool asset is
/// refunded as `floor(asset * shares / remaining_total_shares)`.
/// Entitlements that floor to zero are skipped; that rounding dust
/// stays with the pool and the final balance check decides whether it
/// was in fact negligible.
///
/// The set of share balances to process is fixed before the first
/// transfer: coins credited during the run are never re-scanned.  A
/// share denomination of one target pool sitting inside another target
/// pool's liquidity is therefore refunded but not burned, and fails
/// the final balance check.
///
/// # Errors
///
/// - [`RegistryError::PoolNotFound`] if any target id is absent; the
///   engine fails fast before touching the ledger.
/// - Any [`LedgerError`](crate::ledger::LedgerError) from a transfer or
///   burn, propagated unchanged.
/// - [`RegistryError::BookkeepingInconsistency`] if, after the scan, a
///   pool still records outstanding shares or its address still holds
///   any balance.  That is a logic defect, never bad input, and no pool
///   is deleted when it fires.
pub fn cleanup_pools<S: KeyedStore, L: Ledger>(
    registry: &mut PoolRegistry<S>,
    ledger: &mut L,
    now: Timestamp,
    pool_ids: &[PoolId],
) -> Result<()> {
    let mut snapshots: BTreeMap<Denom, PoolSnapshot> = BTreeMap::new();
    for &pool_id in pool_ids {
        let pool = registry.get(pool_id, now)?;
        snapshots.insert(
            Denom::pool_share(pool_id),
            PoolSnapshot {
                pool_id,
                address: pool.address(),
                total_shares: pool.total_shares(),
                liquidity: pool.total_pool_liquidity(),
            },
        );
    }

    // Capture matching share balances up front: payouts during the scan
    // must not feed back into the walk.
    let mut holders: Vec<(AccountAddress, Coin)> = Vec::new();
    ledger.for_each_balance(&mut |address, coin| {
        if !coin.amount.is_zero() && snapshots.contains_key(&coin.denom) {
            holders.push((address.clone(), coin.clone()));
        }
        ControlFlow::Continue(())
    });

    for (holder, share) in holders {
        let Some(snapshot) = snapshots.get_mut(&share.denom) else {
            continue;
        };

        // Burn the holder's shares via the collection account.
        ledger.send_to_module(&holder, MODULE_NAME, slice::from_ref(&share))?;
        ledger.burn(MODULE_NAME, slice::from_ref(&share))?;

        // Refund each asset proportionally against the running totals.
        for asset in &snapshot.liquidity.clone() {
            let entitlement = asset
                .amount
                .checked_mul_div(&share.amount, &snapshot.total_shares)
                .ok_or(RegistryError::Overflow)?;
            if entitlement.is_zero() {
                continue;
            }
            let refund = Coin::new(asset.denom.clone(), entitlement);
            snapshot.liquidity = snapshot.liquidity.checked_sub(&refund).ok_or(
                RegistryError::BookkeepingInconsistency {
                    pool_id: snapshot.pool_id,
                    detail: "refund exceeds recorded liquidity",
                },
            )?;
            ledger.send(&snapshot.address, &holder, slice::from_ref(&refund))?;
        }

        snapshot.total_shares = snapshot.total_shares.checked_sub(&share.amount).ok_or(
            RegistryError::BookkeepingInconsistency {
                pool_id: snapshot.pool_id,
                detail: "share balance exceeds recorded total shares",
            },
        )?;
        debug!(
            holder = holder.as_str(),
            shares = share.amount.get(),
            denom = share.denom.as_str(),
            "refunded share holder"
        );
    }

    // Verify every pool before deleting any of them.
    for &pool_id in pool_ids {
        let pool = registry.get(pool_id, now)?;
        let snapshot = snapshots.get(&Denom::pool_share(pool_id)).ok_or(
            RegistryError::BookkeepingInconsistency {
                pool_id,
                detail: "liquidation snapshot missing",
            },
        )?;
        if !snapshot.total_shares.is_zero() {
            return Err(RegistryError::BookkeepingInconsistency {
                pool_id,
                detail: "shares remain outstanding after cleanup",
            });
        }
        if !ledger.balances(&pool.address()).is_zero() {
            return Err(RegistryError::BookkeepingInconsistency {
                pool_id,
                detail: "pool address still holds balance after cleanup",
            });
        }
    }

    for &pool_id in pool_ids {
        registry.delete(pool_id)?;
        info!(pool_id = pool_id.get(), "liquidated pool");
    }

    Ok(())
}
