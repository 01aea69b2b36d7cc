use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use learnhub_core::{DomainError, DomainResult, Entity};

/// Id-keyed in-memory collection, iterated in id order.
#[derive(Debug)]
pub struct InMemoryStore<E: Entity> {
    inner: RwLock<BTreeMap<E::Id, E>>,
}

impl<E: Entity + Clone> InMemoryStore<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn from_records(records: impl IntoIterator<Item = E>) -> Self {
        let store = Self::new();
        for record in records {
            store.upsert(record);
        }
        store
    }

    pub fn get(&self, id: E::Id) -> Option<E> {
        self.read().get(&id).cloned()
    }

    pub fn list(&self) -> Vec<E> {
        self.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Highest id currently stored.
    pub fn max_id(&self) -> Option<E::Id> {
        self.read().keys().next_back().copied()
    }

    /// Insert or replace the record with the same id.
    pub fn upsert(&self, record: E) {
        self.write().insert(record.id(), record);
    }

    /// Mutate a record in place and return the new value.
    pub fn update(&self, id: E::Id, f: impl FnOnce(&mut E)) -> DomainResult<E> {
        let mut map = self.write();
        let record = map.get_mut(&id).ok_or(DomainError::NotFound)?;
        f(record);
        Ok(record.clone())
    }

    pub fn remove(&self, id: E::Id) -> DomainResult<E> {
        self.write().remove(&id).ok_or(DomainError::NotFound)
    }

    // Poisoning is ignored; records are plain data.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<E::Id, E>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<E::Id, E>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: Entity + Clone> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}
