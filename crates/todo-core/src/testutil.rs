//! Test utilities: an in-memory [`ItemStore`].

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::{Item, ItemChanges};
use crate::traits::ItemStore;

/// In-memory item store keyed by id.
#[derive(Clone, Default)]
pub struct MockItemStore {
    rows: Arc<Mutex<BTreeMap<i64, Item>>>,
    /// When set, `insert` always fails with a conflict, as if another
    /// request had inserted the id between lookup and insert.
    hidden_conflict: bool,
}

impl MockItemStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        let rows = items.into_iter().map(|item| (item.id, item)).collect();
        Self {
            rows: Arc::new(Mutex::new(rows)),
            hidden_conflict: false,
        }
    }

    pub fn with_hidden_conflict(mut self) -> Self {
        self.hidden_conflict = true;
        self
    }

    /// Snapshot of the stored rows, ordered by id.
    pub fn items(&self) -> Vec<Item> {
        self.rows.lock().unwrap().values().cloned().collect()
    }
}

impl ItemStore for MockItemStore {
    async fn list(&self) -> Result<Vec<Item>, AppError> {
        Ok(self.items())
    }

    async fn get(&self, id: i64) -> Result<Option<Item>, AppError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, item: &Item) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        if self.hidden_conflict || rows.contains_key(&item.id) {
            return Err(AppError::Conflict(item.id));
        }
        rows.insert(item.id, item.clone());
        Ok(())
    }

    async fn update(&self, id: i64, changes: &ItemChanges) -> Result<Option<Item>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.get_mut(&id).map(|item| {
            item.title = changes.title.clone();
            item.is_completed = changes.is_completed;
            item.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }
}
