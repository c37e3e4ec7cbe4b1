//! In-memory keyed store backed by an ordered map.

use std::collections::BTreeMap;
use std::ops::Bound;

use super::keyed::KeyedStore;

/// `BTreeMap`-backed [`KeyedStore`] with ascending key iteration.
///
/// Used by tests and genesis tooling; production deployments adapt the
/// enclosing environment's transactional store instead.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct MemStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyedStore for MemStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &[u8], value: &[u8]) {
        self.entries.insert(key.to_vec(), value.to_vec());
    }

    fn delete(&mut self, key: &[u8]) {
        self.entries.remove(key);
    }

    fn has(&self, key: &[u8]) -> bool {
        self.entries.contains_key(key)
    }

    fn iterate_prefix<'a>(
        &'a self,
        prefix: &[u8],
    ) -> Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a> {
        let start = prefix.to_vec();
        let range = self
            .entries
            .range::<[u8], _>((Bound::Included(prefix), Bound::Unbounded));
        Box::new(
            range
                .take_while(move |(k, _)| k.starts_with(&start))
                .map(|(k, v)| (k.clone(), v.clone())),
        )
    }
}
