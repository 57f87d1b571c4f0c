use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;

use super::{table_entry::Item, TableBackend};
use crate::{
    errors::{DeleteError, GetError, PutError, QueryError},
    traits::PrimaryKeyParts,
};

/// How quickly the in-memory secondary index sees writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexMode {
    /// The index reflects every completed write.
    #[default]
    Immediate,
    /// The index only catches up when [`MemoryBackend::settle_index`] is
    /// called, like a GSI that has not propagated yet.
    Deferred,
}

#[derive(Default)]
struct Tables {
    items: BTreeMap<PrimaryKeyParts, Item>,
    // Snapshot the index reads from. Equal to `items` in immediate mode.
    indexed: BTreeMap<PrimaryKeyParts, Item>,
}

/// [`TableBackend`] held entirely in process.
///
/// Reads by primary key always see the latest write. Index queries see the
/// latest write only in [`IndexMode::Immediate`]. Every operation yields to
/// the scheduler once before touching the table, so concurrently polled
/// operations interleave the way remote calls would.
#[derive(Default)]
pub struct MemoryBackend {
    mode: IndexMode,
    tables: Mutex<Tables>,
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("mode", &self.mode)
            .field("items", &self.len())
            .finish()
    }
}

impl MemoryBackend {
    pub fn new(mode: IndexMode) -> Self {
        Self {
            mode,
            tables: Mutex::default(),
        }
    }

    pub fn mode(&self) -> IndexMode {
        self.mode
    }

    /// Bring the index up to date with the table.
    pub fn settle_index(&self) {
        let mut tables = self.lock();
        tables.indexed = tables.items.clone();
    }

    /// Number of items in the table (not the index).
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn key_of(item: &Item) -> Option<PrimaryKeyParts> {
    PrimaryKeyParts::from_item(item)
}

#[async_trait]
impl TableBackend for MemoryBackend {
    async fn get_item(&self, key: Item) -> Result<Option<Item>, GetError> {
        tokio::task::yield_now().await;

        let key = key_of(&key).ok_or_else(|| {
            GetError::Backend("ValidationException: key must contain _pk and _sk".into())
        })?;

        Ok(self.lock().items.get(&key).cloned())
    }

    async fn query_index(
        &self,
        _index_name: &str,
        attribute: &str,
        value: &str,
    ) -> Result<Vec<Item>, QueryError> {
        tokio::task::yield_now().await;

        let expected = AttributeValue::S(value.to_string());

        Ok(self
            .lock()
            .indexed
            .values()
            .filter(|item| item.get(attribute) == Some(&expected))
            .cloned()
            .collect())
    }

    async fn put_item(&self, item: Item) -> Result<(), PutError> {
        tokio::task::yield_now().await;

        let key = key_of(&item).ok_or_else(|| {
            PutError::Backend("ValidationException: item must contain _pk and _sk".into())
        })?;

        let mut tables = self.lock();
        if self.mode == IndexMode::Immediate {
            tables.indexed.insert(key.clone(), item.clone());
        }
        tables.items.insert(key, item);

        Ok(())
    }

    async fn delete_item(&self, key: Item) -> Result<(), DeleteError> {
        tokio::task::yield_now().await;

        let key = key_of(&key).ok_or_else(|| {
            DeleteError::Backend("ValidationException: key must contain _pk and _sk".into())
        })?;

        let mut tables = self.lock();
        if self.mode == IndexMode::Immediate {
            tables.indexed.remove(&key);
        }
        tables.items.remove(&key);

        Ok(())
    }
}
