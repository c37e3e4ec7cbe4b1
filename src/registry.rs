//! Pool registry: identity allocation, storage, and poke-on-read
//! retrieval.
//!
//! The registry is the single data-consistency point for pool records.
//! It exclusively owns the serialized form in the store; values handed
//! to callers are transient, reconstructed per access, and must be
//! written back through [`PoolRegistry::put`] to take effect.  Every
//! read path applies [`Pool::poke`] before the caller sees the pool, so
//! no code path can act on stale time-dependent parameters.

use tracing::debug;

use crate::domain::{Denom, PoolId, Timestamp};
use crate::error::{RegistryError, Result};
use crate::pools::PoolRecord;
use crate::store::{pool_key, KeyedStore, NEXT_POOL_ID_KEY, POOLS_PREFIX};
use crate::traits::Pool;

/// Store-backed pool registry.
///
/// Generic over the keyed store so production code adapts the
/// environment's transactional store while tests run on
/// [`MemStore`](crate::store::MemStore).
#[derive(Debug)]
#[must_use]
pub struct PoolRegistry<S> {
    store: S,
}

impl<S: KeyedStore> PoolRegistry<S> {
    /// Wraps a keyed store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Seeds the next-pool-id counter.  Must run exactly once at
    /// genesis, before the first allocation.
    pub fn init_genesis(&mut self, next_pool_id: PoolId) {
        self.set_next_pool_id(next_pool_id);
    }

    /// The next id that will be allocated.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UninitializedRegistry`] if genesis never
    /// seeded the counter.
    pub fn next_pool_id(&self) -> Result<PoolId> {
        let bytes = self
            .store
            .get(NEXT_POOL_ID_KEY)
            .ok_or(RegistryError::UninitializedRegistry)?;
        let raw: u64 = serde_json::from_slice(&bytes)?;
        Ok(PoolId::new(raw))
    }

    fn set_next_pool_id(&mut self, next_pool_id: PoolId) {
        // Serialization of a bare u64 cannot fail.
        let bytes = serde_json::to_vec(&next_pool_id.get()).unwrap_or_default();
        self.store.set(NEXT_POOL_ID_KEY, &bytes);
    }

    /// Returns the current counter value and advances it by one.
    /// Allocated ids are strictly increasing and never reused, even
    /// across deletions.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UninitializedRegistry`] if genesis never
    /// seeded the counter.
    pub fn allocate_next_id(&mut self) -> Result<PoolId> {
        let next = self.next_pool_id()?;
        self.set_next_pool_id(next.next());
        Ok(next)
    }

    /// Loads the pool stored under `pool_id` and pokes it to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PoolNotFound`] if no pool is stored
    /// under the id, or [`RegistryError::Codec`] if the record fails to
    /// decode.
    pub fn get(&self, pool_id: PoolId, now: Timestamp) -> Result<PoolRecord> {
        let key = pool_key(pool_id);
        if !self.store.has(&key) {
            return Err(RegistryError::PoolNotFound { pool_id });
        }
        let bytes = self
            .store
            .get(&key)
            .ok_or(RegistryError::PoolNotFound { pool_id })?;

        let mut pool = PoolRecord::from_bytes(&bytes)?;
        pool.poke(now);
        Ok(pool)
    }

    /// Like [`PoolRegistry::get`], but additionally requires the pool
    /// to accept swaps.
    ///
    /// # Errors
    ///
    /// The failure modes of [`PoolRegistry::get`], plus
    /// [`RegistryError::PoolLocked`] for an administratively locked
    /// pool.
    pub fn get_for_swap(&self, pool_id: PoolId, now: Timestamp) -> Result<PoolRecord> {
        let pool = self.get(pool_id, now)?;
        if !pool.is_active() {
            return Err(RegistryError::PoolLocked { pool_id });
        }
        Ok(pool)
    }

    /// Serializes `pool` and stores it at its own id, overwriting any
    /// prior value.  Internal consistency is the caller's guarantee.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Codec`] if the record fails to encode.
    pub fn put(&mut self, pool: &PoolRecord) -> Result<()> {
        let bytes = pool.to_bytes()?;
        self.store.set(&pool_key(pool.id()), &bytes);
        debug!(pool_id = pool.id().get(), "stored pool record");
        Ok(())
    }

    /// Removes the pool stored under `pool_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PoolNotFound`] if no pool is stored
    /// under the id.
    pub fn delete(&mut self, pool_id: PoolId) -> Result<()> {
        let key = pool_key(pool_id);
        if !self.store.has(&key) {
            return Err(RegistryError::PoolNotFound { pool_id });
        }
        self.store.delete(&key);
        debug!(pool_id = pool_id.get(), "deleted pool record");
        Ok(())
    }

    /// Lazily iterates every stored pool in ascending id order, poking
    /// each record to `now` as it is produced.  Single pass; invoke
    /// again to restart.
    pub fn pools(&self, now: Timestamp) -> impl Iterator<Item = Result<PoolRecord>> + '_ {
        self.store
            .iterate_prefix(POOLS_PREFIX)
            .map(move |(_, bytes)| {
                let mut pool = PoolRecord::from_bytes(&bytes)?;
                pool.poke(now);
                Ok(pool)
            })
    }

    /// The denomination names of the pool's held liquidity.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`PoolRegistry::get`].
    pub fn denoms_of(&self, pool_id: PoolId, now: Timestamp) -> Result<Vec<Denom>> {
        let pool = self.get(pool_id, now)?;
        Ok(pool.total_pool_liquidity().denoms())
    }
}
