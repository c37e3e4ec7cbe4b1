//! Pool lifecycle example: register, read with poke, liquidate.
//!
//! Demonstrates seeding a registry, storing a weighted pool with a
//! smooth weight schedule, watching reads refresh its weights, and
//! finally force-liquidating it with pro-rata refunds.
//!
//! # Run
//!
//! ```bash
//! cargo run --example lifecycle
//! ```

use lagoon::cleanup::cleanup_pools;
use lagoon::domain::{Amount, Coin, Denom, PoolId, Timestamp};
use lagoon::ledger::{Ledger, MemLedger};
use lagoon::pools::{PoolAsset, PoolRecord, SmoothWeightChange, WeightedPool};
use lagoon::registry::PoolRegistry;
use lagoon::store::MemStore;
use lagoon::traits::Pool;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Pool lifecycle: register, poke, liquidate ===\n");

    // ── 1. Open a registry and seed the id counter ──────────────────────
    let mut registry = PoolRegistry::new(MemStore::new());
    registry.init_genesis(PoolId::new(1));
    let id = registry.allocate_next_id()?;
    println!("Allocated pool id: {id}");

    // ── 2. Build a two-asset weighted pool with a weight schedule ───────
    let atom = Denom::new("atom")?;
    let uosmo = Denom::new("uosmo")?;
    let assets = vec![
        PoolAsset {
            coin: Coin::new(atom.clone(), Amount::new(100)),
            weight: 10,
        },
        PoolAsset {
            coin: Coin::new(uosmo.clone(), Amount::new(400)),
            weight: 40,
        },
    ];
    let mut pool = WeightedPool::new(id, assets, Amount::new(1_000))?;
    pool.schedule_weight_change(SmoothWeightChange {
        start_time: Timestamp::new(1_000),
        duration_secs: 100,
        initial_weights: vec![10, 40],
        target_weights: vec![30, 20],
    })?;
    let address = pool.address();
    registry.put(&PoolRecord::Weighted(pool))?;
    println!("Stored weighted pool at address: {}", address.as_str());

    // ── 3. Reads refresh time-dependent state ───────────────────────────
    for t in [500u64, 1_050, 2_000] {
        let PoolRecord::Weighted(read) = registry.get(id, Timestamp::new(t))? else {
            continue;
        };
        println!("  weights at t={t}: {:?}", read.weights());
    }

    // ── 4. Fund the pool and two share holders ──────────────────────────
    let mut ledger = MemLedger::new();
    ledger.fund(&address, Coin::new(atom.clone(), Amount::new(100)))?;
    ledger.fund(&address, Coin::new(uosmo.clone(), Amount::new(400)))?;
    let share = Denom::pool_share(id);
    let holder1 = lagoon::domain::AccountAddress::parse("holder1")?;
    let holder2 = lagoon::domain::AccountAddress::parse("holder2")?;
    ledger.fund(&holder1, Coin::new(share.clone(), Amount::new(300)))?;
    ledger.fund(&holder2, Coin::new(share, Amount::new(700)))?;

    // ── 5. Liquidate: burn shares, refund pro rata, delete ──────────────
    cleanup_pools(&mut registry, &mut ledger, Timestamp::new(2_000), &[id])?;
    println!("\n--- After liquidation ---");
    println!("  holder1: {}", ledger.balances(&holder1));
    println!("  holder2: {}", ledger.balances(&holder2));
    println!(
        "  pool record present: {}",
        registry.get(id, Timestamp::new(2_000)).is_ok()
    );

    println!("\n=== Done ===");
    Ok(())
}
