//! Core capability set every pool variant must expose.
//!
//! [`Pool`] is the polymorphic contract the registry, the liquidation
//! engine, and the hook dispatcher operate through.  It deliberately
//! excludes pricing math: how a swap or join/exit is priced belongs to
//! each variant's own logic and never leaks into lifecycle management.
//!
//! # Poke Contract
//!
//! [`Pool::poke`] recomputes any internal state that depends on elapsed
//! block time (for instance smooth weight changes) as of `now`.  It
//! performs no I/O and cannot fail, and calling it twice with the same
//! `now` leaves the pool unchanged the second time.  Poke never persists
//! its own effect: the registry applies it to every freshly decoded pool
//! before callers see it, and the mutation only reaches the store if the
//! caller writes the pool back.

use crate::domain::{AccountAddress, Amount, Coins, PoolId, Timestamp};

/// Common capability set of all pool variants.
///
/// # Implementors
///
/// - [`WeightedPool`](crate::pools::WeightedPool) — weight-smoothing poke
/// - [`StablePool`](crate::pools::StablePool) — amplified stable-asset pool
/// - [`ConcentratedPool`](crate::pools::ConcentratedPool) — tick-based pool
/// - [`PoolRecord`](crate::pools::PoolRecord) — dispatch enum over the above
pub trait Pool {
    /// The pool's registry identifier.
    #[must_use]
    fn id(&self) -> PoolId;

    /// The ledger address controlling the pool's held liquidity.
    #[must_use]
    fn address(&self) -> AccountAddress;

    /// Total issued shares.  The circulating amount of the pool's share
    /// denomination on the ledger must equal this at all times.
    #[must_use]
    fn total_shares(&self) -> Amount;

    /// The multiset of assets the pool currently records as held.
    #[must_use]
    fn total_pool_liquidity(&self) -> Coins;

    /// Whether the pool currently accepts swaps.  `false` means the
    /// pool is administratively locked from trading.
    #[must_use]
    fn is_active(&self) -> bool;

    /// Recomputes time-dependent internal fields as of `now`.
    /// Idempotent for a fixed `now`; no I/O; cannot fail.
    fn poke(&mut self, now: Timestamp);
}
