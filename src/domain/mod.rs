//! Fundamental domain value types used throughout the registry.
//!
//! This module contains the core value types that model the ledger
//! domain: pool identifiers, amounts, denominations, coins, account
//! addresses, and block time.  All types use newtypes with validated
//! constructors to enforce invariants.

mod address;
mod amount;
mod coin;
mod denom;
mod pool_id;
mod timestamp;

pub use address::AccountAddress;
pub use amount::Amount;
pub use coin::{Coin, Coins};
pub use denom::{Denom, POOL_SHARE_PREFIX};
pub use pool_id::PoolId;
pub use timestamp::Timestamp;
