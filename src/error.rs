//! Unified error types for the pool registry.
//!
//! All fallible operations across the crate return [`RegistryError`] as
//! their error type.  Ledger failures are carried verbatim inside
//! [`RegistryError::Ledger`] so callers always see the collaborator's
//! original error.  Validation failures (bad input) and bookkeeping
//! inconsistencies (logic defects) are distinct variants so operators can
//! tell them apart.

use crate::domain::PoolId;
use crate::ledger::LedgerError;

/// Convenience alias used throughout the crate.
pub type Result<T, E = RegistryError> = core::result::Result<T, E>;

/// Crate-wide error enum covering registry, liquidation, and hook
/// dispatch failures.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No pool is stored under the given identifier.
    #[error("pool with id {pool_id} does not exist")]
    PoolNotFound {
        /// Identifier that failed the lookup.
        pool_id: PoolId,
    },

    /// The pool exists but is administratively locked from trading.
    #[error("pool {pool_id} is locked: swap on inactive pool")]
    PoolLocked {
        /// Identifier of the locked pool.
        pool_id: PoolId,
    },

    /// A hook binding address failed validation.
    #[error("malformed account address: {address:?}")]
    MalformedAddress {
        /// The rejected address string.
        address: String,
    },

    /// An external ledger call failed; the collaborator's error is
    /// propagated unchanged.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A post-liquidation invariant check failed.  This signals a logic
    /// defect, not bad input, and must never be silently ignored.
    #[error("bookkeeping inconsistency on pool {pool_id}: {detail}")]
    BookkeepingInconsistency {
        /// Pool that failed the check.
        pool_id: PoolId,
        /// Which invariant was violated.
        detail: &'static str,
    },

    /// A hooked contract call exceeded its independent gas ceiling or
    /// faulted internally.
    #[error("contract hook ran out of gas (limit {gas_limit})")]
    ContractHookOutOfGas {
        /// The configured ceiling, for diagnostics.
        gas_limit: u64,
    },

    /// A hooked contract returned an ordinary error.
    #[error("contract hook call failed: {0}")]
    Contract(String),

    /// The next-pool-id counter was never initialized.  Genesis must run
    /// [`PoolRegistry::init_genesis`](crate::registry::PoolRegistry::init_genesis)
    /// exactly once before any allocation.
    #[error("pool registry has not been initialized at genesis")]
    UninitializedRegistry,

    /// A pool record failed to serialize or deserialize.
    #[error("pool codec failure: {0}")]
    Codec(#[from] serde_json::Error),

    /// A pool constructor rejected its inputs.
    #[error("invalid pool: {0}")]
    InvalidPool(String),

    /// Arithmetic overflow while computing amounts.
    #[error("arithmetic overflow")]
    Overflow,
}
