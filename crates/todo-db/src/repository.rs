use sqlx::SqlitePool;
use todo_core::error::AppError;
use todo_core::models::{Item, ItemChanges};

/// Repository for item persistence in SQLite.
#[derive(Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All items, ordered by id.
    pub async fn list(&self) -> Result<Vec<Item>, AppError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"SELECT id, title, is_completed FROM items ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Item>, AppError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"SELECT id, title, is_completed FROM items WHERE id = ?1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Insert a new item. A primary-key collision is reported as [`AppError::Conflict`].
    pub async fn insert(&self, item: &Item) -> Result<(), AppError> {
        sqlx::query(r#"INSERT INTO items (id, title, is_completed) VALUES (?1, ?2, ?3)"#)
            .bind(item.id)
            .bind(&item.title)
            .bind(item.is_completed)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if is_key_collision(db.as_ref()) => {
                    AppError::Conflict(item.id)
                }
                other => AppError::DatabaseError(other.to_string()),
            })?;

        Ok(())
    }

    /// Overwrite title and completion flag, returning the updated row.
    pub async fn update(&self, id: i64, changes: &ItemChanges) -> Result<Option<Item>, AppError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            UPDATE items
            SET title = ?2, is_completed = ?3
            WHERE id = ?1
            RETURNING id, title, is_completed
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(changes.is_completed)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Remove an item. Returns whether a row was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM items WHERE id = ?1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

fn is_key_collision(err: &dyn sqlx::error::DatabaseError) -> bool {
    err.is_unique_violation() || err.message().contains("UNIQUE constraint failed")
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    title: String,
    is_completed: bool,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            title: row.title,
            is_completed: row.is_completed,
        }
    }
}

// -- Trait implementation --

impl todo_core::traits::ItemStore for ItemRepository {
    async fn list(&self) -> Result<Vec<Item>, AppError> {
        ItemRepository::list(self).await
    }

    async fn get(&self, id: i64) -> Result<Option<Item>, AppError> {
        ItemRepository::get(self, id).await
    }

    async fn insert(&self, item: &Item) -> Result<(), AppError> {
        ItemRepository::insert(self, item).await
    }

    async fn update(&self, id: i64, changes: &ItemChanges) -> Result<Option<Item>, AppError> {
        ItemRepository::update(self, id, changes).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        ItemRepository::delete(self, id).await
    }
}
