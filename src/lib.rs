//! # Lagoon
//!
//! Pool registry and lifecycle manager for an on-ledger AMM: persist,
//! read, liquidate, and notify liquidity pools inside a transactional
//! state machine.
//!
//! This crate provides domain types, the registry keyed-store layout,
//! a forced-liquidation engine, a gas-sandboxed contract hook
//! dispatcher, and feature-gated pool families:
//!
//! - **Weighted** (Balancer style, with smooth weight schedules) — `weighted` feature
//! - **Stable** (Curve style amplified pools) — `stable` feature
//! - **Concentrated Liquidity** (Uniswap v3 style) — `concentrated` feature
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `weighted` | via `all-pools` | Weighted pool family |
//! | `stable` | via `all-pools` | Stable pool family |
//! | `concentrated` | via `all-pools` | Concentrated-liquidity pool family |
//! | `all-pools` | yes | Enables all three pool families |
//!
//! # Quick Start
//!
//! ```rust
//! use lagoon::domain::{Amount, Coin, Denom, PoolId, Timestamp};
//! use lagoon::pools::{PoolAsset, PoolRecord, WeightedPool};
//! use lagoon::registry::PoolRegistry;
//! use lagoon::store::MemStore;
//! use lagoon::traits::Pool;
//!
//! // 1. Open a registry over a keyed store and seed the id counter
//! let mut registry = PoolRegistry::new(MemStore::new());
//! registry.init_genesis(PoolId::new(1));
//!
//! // 2. Allocate an id and build a two-asset weighted pool
//! let id = registry.allocate_next_id().expect("counter seeded");
//! let assets = vec![
//!     PoolAsset {
//!         coin: Coin::new(Denom::new("atom").expect("valid denom"), Amount::new(1_000)),
//!         weight: 1,
//!     },
//!     PoolAsset {
//!         coin: Coin::new(Denom::new("uosmo").expect("valid denom"), Amount::new(4_000)),
//!         weight: 1,
//!     },
//! ];
//! let pool = WeightedPool::new(id, assets, Amount::new(100)).expect("valid pool");
//!
//! // 3. Persist it, then read it back (reads refresh time-dependent state)
//! registry.put(&PoolRecord::Weighted(pool)).expect("stored");
//! let fetched = registry.get(id, Timestamp::new(0)).expect("present");
//! assert_eq!(fetched.id(), id);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  Transaction  │  owns Context (block time, gas meter, events)
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐     ┌──────────────┐
//! │   Registry    │◄───│   Cleanup     │  burn shares, refund, delete
//! └──────┬───────┘     └──────┬───────┘
//!        │ PoolRecord          │ Ledger (send / burn / scan)
//!        ▼                     ▼
//! ┌──────────────┐     ┌──────────────┐
//! │  KeyedStore   │     │    Hooks      │  sandboxed contract calls
//! └──────────────┘     └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`PoolId`](domain::PoolId), [`Amount`](domain::Amount), [`Coins`](domain::Coins), etc. |
//! | [`traits`] | The [`Pool`](traits::Pool) abstraction every pool family implements |
//! | [`pools`]  | Feature-gated pool families and the [`PoolRecord`](pools::PoolRecord) dispatch enum |
//! | [`registry`] | [`PoolRegistry`](registry::PoolRegistry): persistence, poke-on-read, id allocation |
//! | [`store`]  | [`KeyedStore`](store::KeyedStore) adapter and the persisted key layout |
//! | [`ledger`] | [`Ledger`](ledger::Ledger) collaborator: transfers, burns, balance scans |
//! | [`cleanup`] | Forced liquidation: burn all shares, refund pro rata, delete |
//! | [`hooks`]  | [`HookDispatcher`](hooks::HookDispatcher): gas-sandboxed contract notifications |
//! | [`context`] | [`Context`](context::Context), [`GasMeter`](context::GasMeter), event collection |
//! | [`error`]  | [`RegistryError`](error::RegistryError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod cleanup;
pub mod context;
pub mod domain;
pub mod error;
pub mod hooks;
pub mod ledger;
pub mod pools;
pub mod prelude;
pub mod registry;
pub mod store;
pub mod traits;

/// Module account that collects shares during liquidation before they
/// are burned.
pub const MODULE_NAME: &str = "registry";
