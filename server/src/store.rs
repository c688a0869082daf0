//! SQLite-backed todo store.
//!
//! `TodoStore` wraps a `sqlx` pool and is cheap to clone; handlers get their
//! own handle through router state and each query borrows a pooled
//! connection only for its own duration.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::model::{Todo, UpdateTodo};

pub type StoreResult<T> = Result<T, sqlx::Error>;

// `created_at` is filled by the database in millisecond RFC 3339 form, so
// lexical order on the column is chronological order.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    completed BOOLEAN NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
CREATE INDEX IF NOT EXISTS idx_todos_created_at ON todos (created_at);
"#;

const COLUMNS: &str = "id, title, completed, created_at";

#[derive(Clone, Debug)]
pub struct TodoStore {
    pool: SqlitePool,
}

impl TodoStore {
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;
        info!(url = %config.url, "connected to database");
        Self::from_pool(pool).await
    }

    /// A private in-memory database. Pinned to one connection that never
    /// expires, since every new `:memory:` connection is a fresh database.
    pub async fn in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        debug!("todos schema ready");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Newest first. Rows created within the same millisecond fall back to
    /// id order.
    pub async fn list(&self) -> StoreResult<Vec<Todo>> {
        sqlx::query_as::<_, Todo>(&format!(
            "SELECT {COLUMNS} FROM todos ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get(&self, id: i64) -> StoreResult<Option<Todo>> {
        sqlx::query_as::<_, Todo>(&format!("SELECT {COLUMNS} FROM todos WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(&self, title: &str) -> StoreResult<Todo> {
        sqlx::query_as::<_, Todo>(&format!(
            "INSERT INTO todos (title) VALUES (?1) RETURNING {COLUMNS}"
        ))
        .bind(title)
        .fetch_one(&self.pool)
        .await
    }

    /// Writes only the fields present in `changes`. Returns `None` when no
    /// row has this id.
    pub async fn update(&self, id: i64, changes: &UpdateTodo) -> StoreResult<Option<Todo>> {
        if changes.is_empty() {
            return self.get(id).await;
        }
        sqlx::query_as::<_, Todo>(&format!(
            "UPDATE todos SET title = COALESCE(?1, title), completed = COALESCE(?2, completed) \
             WHERE id = ?3 RETURNING {COLUMNS}"
        ))
        .bind(changes.title.as_deref())
        .bind(changes.completed)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Returns `false` when no row has this id.
    pub async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> TodoStore {
        TodoStore::in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn create_assigns_fresh_ids_and_defaults() {
        let store = store().await;
        let a = store.create("first").await.unwrap();
        let b = store.create("second").await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(!a.completed);
        assert_eq!(a.title, "first");
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = store().await;
        let a = store.create("A").await.unwrap();
        let b = store.create("B").await.unwrap();
        let c = store.create("C").await.unwrap();
        let ids: Vec<i64> = store.list().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }

    #[tokio::test]
    async fn update_touches_only_supplied_fields() {
        let store = store().await;
        let todo = store.create("Walk dog").await.unwrap();

        let changes = UpdateTodo {
            completed: Some(true),
            ..Default::default()
        };
        let updated = store.update(todo.id, &changes).await.unwrap().unwrap();
        assert!(updated.completed);
        assert_eq!(updated.title, "Walk dog");
        assert_eq!(updated.created_at, todo.created_at);

        let changes = UpdateTodo {
            title: Some("Walk cat".to_string()),
            ..Default::default()
        };
        let updated = store.update(todo.id, &changes).await.unwrap().unwrap();
        assert_eq!(updated.title, "Walk cat");
        assert!(updated.completed);

        let changes = UpdateTodo {
            completed: Some(false),
            ..Default::default()
        };
        let updated = store.update(todo.id, &changes).await.unwrap().unwrap();
        assert!(!updated.completed);
    }

    #[tokio::test]
    async fn update_with_no_changes_returns_current_row() {
        let store = store().await;
        let todo = store.create("unchanged").await.unwrap();
        let same = store
            .update(todo.id, &UpdateTodo::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(same, todo);
    }

    #[tokio::test]
    async fn missing_rows_are_reported() {
        let store = store().await;
        assert!(store.get(42).await.unwrap().is_none());
        assert!(store
            .update(42, &UpdateTodo::default())
            .await
            .unwrap()
            .is_none());
        let changes = UpdateTodo {
            title: Some("x".to_string()),
            ..Default::default()
        };
        assert!(store.update(42, &changes).await.unwrap().is_none());
        assert!(!store.delete(42).await.unwrap());
    }

    #[tokio::test]
    async fn delete_is_permanent() {
        let store = store().await;
        let todo = store.create("gone").await.unwrap();
        assert!(store.delete(todo.id).await.unwrap());
        assert!(store.get(todo.id).await.unwrap().is_none());
        assert!(!store.delete(todo.id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = store().await;
        let first = store.create("one").await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.create("two").await.unwrap();
        assert!(second.id > first.id);
    }
}
