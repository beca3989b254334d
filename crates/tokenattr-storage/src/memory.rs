use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokenattr_core::entity::{Entity, EntityId, EntityType, Record};
use tokenattr_core::error::{Result, StorageError};
use tokenattr_core::store::{ExistsQuery, Filter, TokenStore};
use tokenattr_core::value::Value;

type Row = BTreeMap<String, Value>;

/// In-memory implementation of [`TokenStore`] using DashMap.
///
/// Rows are keyed by entity type and identity. Identities handed out by
/// [`save`](Self::save) come from a single counter shared by all types.
#[derive(Debug)]
pub struct InMemoryStore {
    rows: DashMap<(EntityType, EntityId), Row>,
    next_id: AtomicU64,
}

impl InMemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Inserts a row under an explicit identity.
    ///
    /// Returns `Err(Conflict)` if the identity is already taken for the type.
    pub fn insert(&self, entity_type: EntityType, id: EntityId, row: Row) -> Result<()> {
        let key = (entity_type, id);
        if self.rows.contains_key(&key) {
            return Err(StorageError::Conflict(format!("{}#{}", key.0, key.1)));
        }

        self.next_id.fetch_max(id.0.saturating_add(1), Ordering::SeqCst);
        self.rows.insert(key, row);
        Ok(())
    }

    /// Persists a record, assigning an identity when it has none.
    ///
    /// Records that already carry an identity overwrite their stored row.
    pub fn save(&self, record: &mut Record) -> EntityId {
        let id = match record.id() {
            Some(id) => id,
            None => {
                let id = EntityId(self.next_id.fetch_add(1, Ordering::SeqCst));
                record.set_id(id);
                id
            }
        };

        self.rows.insert(
            (record.entity_type().clone(), id),
            record.attributes().clone(),
        );
        id
    }

    /// Loads a stored row back into a record.
    pub fn get(&self, entity_type: &EntityType, id: EntityId) -> Option<Record> {
        let row = self.rows.get(&(entity_type.clone(), id))?;

        let mut record = Record::new(entity_type.clone());
        record.set_id(id);
        for (name, value) in row.iter() {
            record.set(name.clone(), value.clone());
        }
        Some(record)
    }

    /// Removes a row. Returns `true` if it existed.
    pub fn delete(&self, entity_type: &EntityType, id: EntityId) -> bool {
        self.rows.remove(&(entity_type.clone(), id)).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn row_matches(row: &Row, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| {
        let stored = row.get(&filter.attribute).unwrap_or(&Value::Null);
        stored == &filter.value
    })
}

#[async_trait]
impl TokenStore for InMemoryStore {
    async fn exists(&self, query: &ExistsQuery) -> Result<bool> {
        let found = self.rows.iter().any(|entry| {
            let (entity_type, id) = entry.key();
            entity_type == &query.entity_type
                && query.excluding != Some(*id)
                && row_matches(entry.value(), &query.filters)
        });

        Ok(found)
    }
}
