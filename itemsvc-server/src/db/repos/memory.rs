//! In-memory item store for router tests
//!
//! Mirrors the MySQL repository: ids come from a counter, lists are newest
//! first, and a missing row on update/delete is a not-found error.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::items::{DbError, Item, ItemStore};
use crate::models::{ItemChanges, NewItem};

#[derive(Default)]
struct Rows {
    last_id: i64,
    items: BTreeMap<i64, Item>,
}

/// Mock item store for testing
#[derive(Default)]
pub struct MemoryItemStore {
    rows: Mutex<Rows>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations invoked so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent operation fail like a lost connection
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn begin(&self) -> Result<std::sync::MutexGuard<'_, Rows>, DbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(self.rows.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn list(&self) -> Result<Vec<Item>, DbError> {
        let rows = self.begin()?;
        Ok(rows.items.values().rev().cloned().collect())
    }

    async fn create(&self, item: NewItem) -> Result<Item, DbError> {
        let mut rows = self.begin()?;
        rows.last_id += 1;
        let item = Item {
            id: rows.last_id,
            name: item.name.into_string(),
            description: item.description,
        };
        rows.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(&self, id: i64, changes: ItemChanges) -> Result<Item, DbError> {
        let mut rows = self.begin()?;
        let item = rows
            .items
            .get_mut(&id)
            .ok_or_else(|| DbError::item_not_found(id))?;
        item.name = changes.name;
        item.description = changes.description;
        Ok(item.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut rows = self.begin()?;
        rows.items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::item_not_found(id))
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.begin().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemName;

    fn new_item(name: &str) -> NewItem {
        NewItem::new(ItemName::new(name).unwrap(), None)
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let store = MemoryItemStore::new();
        let a = store.create(new_item("a")).await.unwrap();
        store.delete(a.id).await.unwrap();
        let b = store.create(new_item("b")).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn failing_store_reports_storage_error() {
        let store = MemoryItemStore::new();
        store.set_failing(true);
        assert!(matches!(store.list().await, Err(DbError::Sqlx(_))));
        assert_eq!(store.calls(), 1);
    }
}
