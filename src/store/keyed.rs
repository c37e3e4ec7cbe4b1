//! Byte-keyed store abstraction and the persisted key layout.

use crate::domain::PoolId;

/// Key prefix under which pool records are stored.
pub const POOLS_PREFIX: &[u8] = b"pools/";

/// Key of the single next-pool-id counter.
pub const NEXT_POOL_ID_KEY: &[u8] = b"nextPoolId";

/// Key prefix under which hook bindings are stored.
pub const POOL_HOOKS_PREFIX: &[u8] = b"poolhooks/";

/// Store key of a pool record: `pools/` followed by the id in
/// big-endian, so lexicographic iteration visits pools in ascending id
/// order.
#[must_use]
pub fn pool_key(pool_id: PoolId) -> Vec<u8> {
    let mut key = POOLS_PREFIX.to_vec();
    key.extend_from_slice(&pool_id.to_be_bytes());
    key
}

/// Prefix of all hook bindings scoped to one pool.
#[must_use]
pub fn pool_hooks_prefix(pool_id: PoolId) -> Vec<u8> {
    let mut key = POOL_HOOKS_PREFIX.to_vec();
    key.extend_from_slice(&pool_id.to_be_bytes());
    key.push(b'/');
    key
}

/// Store key of one hook binding: the pool-scoped prefix followed by
/// the action-prefix string.
#[must_use]
pub fn pool_hook_key(pool_id: PoolId, action_prefix: &str) -> Vec<u8> {
    let mut key = pool_hooks_prefix(pool_id);
    key.extend_from_slice(action_prefix.as_bytes());
    key
}

/// Thin adapter over a transactional byte-keyed value store.
///
/// The enclosing execution environment owns commit and rollback; this
/// trait only exposes the read/write surface the registry needs.
/// Iteration is in ascending lexicographic key order.
pub trait KeyedStore {
    /// Returns the value stored at `key`, if any.
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Stores `value` at `key`, overwriting any prior value.
    fn set(&mut self, key: &[u8], value: &[u8]);

    /// Removes the value at `key`.  Removing an absent key is a no-op.
    fn delete(&mut self, key: &[u8]);

    /// Returns `true` if a value is stored at `key`.
    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Iterates all `(key, value)` pairs whose key starts with
    /// `prefix`, in ascending key order.
    fn iterate_prefix<'a>(
        &'a self,
        prefix: &[u8],
    ) -> Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a>;
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn pool_keys_order_matches_id_order() {
        assert!(pool_key(PoolId::new(2)) < pool_key(PoolId::new(10)));
        assert!(pool_key(PoolId::new(255)) < pool_key(PoolId::new(256)));
    }

    #[test]
    fn pool_keys_live_under_pools_prefix() {
        assert!(pool_key(PoolId::new(1)).starts_with(POOLS_PREFIX));
    }

    #[test]
    fn hook_key_scoped_per_pool_and_action() {
        let k1 = pool_hook_key(PoolId::new(1), "beforeSwap");
        let k2 = pool_hook_key(PoolId::new(1), "afterSwap");
        let k3 = pool_hook_key(PoolId::new(2), "beforeSwap");
        assert_ne!(k1, k2);
        assert_ne!(k1, k3);
        assert!(k1.starts_with(&pool_hooks_prefix(PoolId::new(1))));
    }

    #[test]
    fn hook_prefix_disjoint_from_pool_records() {
        assert!(!pool_hook_key(PoolId::new(1), "beforeSwap").starts_with(POOLS_PREFIX));
    }
}
