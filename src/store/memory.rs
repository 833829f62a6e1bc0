//! In-memory book store.
//!
//! The shipped implementation behind the [`BookStore`] seam. Ids are
//! sequential integers rendered as strings, matching the relational
//! driver's auto-increment behavior.

use std::sync::RwLock;

use chrono::Utc;

use crate::model::{Book, BookDraft};

use super::{BookStore, StoreError, StoreResult};

/// Thread-safe in-memory store
pub struct MemoryStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            books: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookStore for MemoryStore {
    fn insert(&self, draft: &BookDraft) -> StoreResult<Book> {
        let mut books = self
            .books
            .write()
            .map_err(|_| StoreError::Insert("lock poisoned".to_string()))?;

        let book = Book {
            id: (books.len() as u64 + 1).to_string(),
            name: draft.name.clone(),
            price: draft.price,
            created_at: Utc::now(),
        };
        books.push(book.clone());

        Ok(book)
    }

    fn list(&self) -> StoreResult<Vec<Book>> {
        let books = self
            .books
            .read()
            .map_err(|_| StoreError::Select("lock poisoned".to_string()))?;

        Ok(books.clone())
    }
}
