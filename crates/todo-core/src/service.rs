use crate::error::AppError;
use crate::models::{Item, ItemChanges};
use crate::traits::ItemStore;

/// CRUD operations over todo items, turning store results into
/// [`AppError::NotFound`] / [`AppError::Conflict`].
pub struct ItemService<S: ItemStore> {
    store: S,
}

impl<S: ItemStore> ItemService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Item>, AppError> {
        self.store.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Item, AppError> {
        self.store.get(id).await?.ok_or(AppError::NotFound(id))
    }

    /// Insert `item` unless its id is already taken.
    ///
    /// The existence check and the insert are separate statements; a racing
    /// insert is still caught by the store's primary key and reported the same way.
    pub async fn create(&self, item: Item) -> Result<Item, AppError> {
        if self.store.get(item.id).await?.is_some() {
            tracing::info!(id = item.id, "Rejected create: id already exists");
            return Err(AppError::Conflict(item.id));
        }

        self.store.insert(&item).await?;
        tracing::info!(id = item.id, "Created item");
        Ok(item)
    }

    /// Overwrite title and completion flag of item `id`. Never creates a row.
    pub async fn update(&self, id: i64, changes: ItemChanges) -> Result<Item, AppError> {
        let updated = self
            .store
            .update(id, &changes)
            .await?
            .ok_or(AppError::NotFound(id))?;
        tracing::info!(id, is_completed = updated.is_completed, "Updated item");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound(id));
        }
        tracing::info!(id, "Deleted item");
        Ok(())
    }
}
