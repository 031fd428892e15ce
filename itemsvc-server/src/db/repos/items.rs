//! Item repository
//!
//! Every method borrows one pooled connection per statement and returns it
//! on all exit paths (sqlx does this when the executor is the pool).
//! Update and delete detect missing rows from the affected-row count.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, MySqlPool};

use crate::db::pool::probe;
use crate::models::{ItemChanges, NewItem};

/// Item record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn item_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "item",
            id: id.to_string(),
        }
    }
}

/// Convert the driver's unsigned insert id into the signed key type.
fn inserted_id(raw: u64) -> Result<i64, DbError> {
    i64::try_from(raw).map_err(|_| {
        DbError::Sqlx(sqlx::Error::Protocol(format!(
            "generated id {} does not fit a signed BIGINT",
            raw
        )))
    })
}

/// Storage operations behind the item routes (testable)
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items, newest id first.
    async fn list(&self) -> Result<Vec<Item>, DbError>;

    /// Insert a row and return it with its assigned id.
    async fn create(&self, item: NewItem) -> Result<Item, DbError>;

    /// Overwrite name and description, returning the row as re-read.
    async fn update(&self, id: i64, changes: ItemChanges) -> Result<Item, DbError>;

    async fn delete(&self, id: i64) -> Result<(), DbError>;

    /// Liveness check against the backing store.
    async fn ping(&self) -> Result<(), DbError>;
}

/// MySQL-backed item repository
#[derive(Clone)]
pub struct ItemRepo {
    pool: MySqlPool,
}

impl ItemRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Get a single item by id.
    pub async fn get(&self, id: i64) -> Result<Item, DbError> {
        sqlx::query_as::<_, Item>("SELECT id, name, description FROM items WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::item_not_found(id))
    }
}

#[async_trait]
impl ItemStore for ItemRepo {
    async fn list(&self) -> Result<Vec<Item>, DbError> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, name, description FROM items ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn create(&self, item: NewItem) -> Result<Item, DbError> {
        let result = sqlx::query("INSERT INTO items (name, description) VALUES (?, ?)")
            .bind(item.name.as_str())
            .bind(item.description.as_deref())
            .execute(&self.pool)
            .await?;

        // No RETURNING in MySQL; read back by the generated key.
        self.get(inserted_id(result.last_insert_id())?).await
    }

    async fn update(&self, id: i64, changes: ItemChanges) -> Result<Item, DbError> {
        let result = sqlx::query("UPDATE items SET name = ?, description = ? WHERE id = ?")
            .bind(changes.name.as_str())
            .bind(changes.description.as_deref())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::item_not_found(id));
        }

        self.get(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::item_not_found(id));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), DbError> {
        probe(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemName;

    #[test]
    fn inserted_id_rejects_values_past_i64_max() {
        assert_eq!(inserted_id(42).unwrap(), 42);
        assert_eq!(inserted_id(i64::MAX as u64).unwrap(), i64::MAX);
        assert!(matches!(
            inserted_id(i64::MAX as u64 + 1),
            Err(DbError::Sqlx(sqlx::Error::Protocol(_)))
        ));
    }

    // Integration tests - run with DATABASE_URL set
    // cargo test -p itemsvc-server -- --ignored

    async fn test_repo() -> ItemRepo {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = MySqlPool::connect(&url).await.expect("pool creation failed");
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                id BIGINT AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                description TEXT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .expect("create table failed");
        ItemRepo::new(pool)
    }

    fn new_item(name: &str, description: Option<&str>) -> NewItem {
        NewItem::new(ItemName::new(name).unwrap(), description.map(str::to_owned))
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_list_newest_first() {
        let repo = test_repo().await;
        let first = repo.create(new_item("first", Some("one"))).await.unwrap();
        let second = repo.create(new_item("second", None)).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.description.as_deref(), Some("one"));
        assert_eq!(second.description, None);

        let items = repo.list().await.unwrap();
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(ids, sorted);
        assert!(items.contains(&second));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_and_delete_missing_row() {
        let repo = test_repo().await;
        let changes = ItemChanges {
            name: "ghost".into(),
            description: None,
        };

        assert!(matches!(
            repo.update(i64::MAX, changes).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete(i64::MAX).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_stores_empty_name() {
        let repo = test_repo().await;
        let item = repo.create(new_item("named", None)).await.unwrap();
        let changes = ItemChanges {
            name: String::new(),
            description: Some("d".into()),
        };

        let updated = repo.update(item.id, changes).await.unwrap();
        assert_eq!(updated.name, "");
        assert_eq!(updated.description.as_deref(), Some("d"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_with_identical_values_is_found() {
        let repo = test_repo().await;
        let item = repo.create(new_item("same", Some("same"))).await.unwrap();
        let changes = ItemChanges {
            name: "same".into(),
            description: Some("same".into()),
        };

        let updated = repo.update(item.id, changes).await.unwrap();
        assert_eq!(updated, item);

        repo.delete(item.id).await.unwrap();
        assert!(matches!(repo.get(item.id).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_creates_get_distinct_ids() {
        let repo = test_repo().await;
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(new_item(&format!("concurrent-{}", i), None))
                        .await
                        .expect("create failed")
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.expect("task panicked"));
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }
}
