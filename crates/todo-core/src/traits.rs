use std::future::Future;

use crate::error::AppError;
use crate::models::{Item, ItemChanges};

/// Persists and retrieves todo items.
pub trait ItemStore: Send + Sync + Clone {
    /// All items, ordered by id.
    fn list(&self) -> impl Future<Output = Result<Vec<Item>, AppError>> + Send;

    fn get(&self, id: i64) -> impl Future<Output = Result<Option<Item>, AppError>> + Send;

    /// Insert a new row. Fails with [`AppError::Conflict`] if the id is taken.
    fn insert(&self, item: &Item) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Overwrite title and completion flag. Returns the stored row, or `None`
    /// if no row has this id.
    fn update(
        &self,
        id: i64,
        changes: &ItemChanges,
    ) -> impl Future<Output = Result<Option<Item>, AppError>> + Send;

    /// Remove a row. Returns `false` if no row had this id.
    fn delete(&self, id: i64) -> impl Future<Output = Result<bool, AppError>> + Send;
}

/// Decides whether a username/password pair identifies a known user.
pub trait IdentityProvider: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}
