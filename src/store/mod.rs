//! Keyed store adapter and the persisted key layout.
//!
//! The registry owns the serialized form of every pool and writes it
//! through [`KeyedStore`], a thin wrapper over the environment's
//! transactional key-value store.  [`MemStore`] is the in-memory
//! implementation used by tests and genesis tooling.

mod keyed;
mod memory;

pub use keyed::{
    pool_hook_key, pool_hooks_prefix, pool_key, KeyedStore, NEXT_POOL_ID_KEY, POOLS_PREFIX,
    POOL_HOOKS_PREFIX,
};
pub use memory::MemStore;
