use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
};

use async_trait::async_trait;
use bookstore_api::model::book::BookId;
use itertools::Itertools;
use tokio::sync::RwLock;

use crate::{
    book::repository::{BookRecordInsert, BookRecordOwned, BookRepository},
    error::AppResult,
};

/// In-memory implementation of the book repository.
#[derive(Debug)]
pub struct MemoryBookRepository {
    books: Arc<RwLock<HashMap<BookId, BookRecordOwned>>>,
    next_id: AtomicI64,
}

impl Default for MemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBookRepository {
    /// Creates a new empty memory book repository.
    pub fn new() -> Self {
        Self {
            books: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn insert(&self, record: BookRecordInsert) -> AppResult<BookRecordOwned> {
        let id = BookId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let book = BookRecordOwned {
            id,
            title: record.title,
            publisher: record.publisher,
            published_date: record.published_date,
            authors: record.authors,
        };
        self.books.write().await.insert(id, book.clone());
        Ok(book)
    }

    async fn select(&self, id: &BookId) -> AppResult<Option<BookRecordOwned>> {
        let books = self.books.read().await;
        Ok(books.get(id).cloned())
    }

    async fn select_all(&self) -> AppResult<Vec<BookRecordOwned>> {
        let books = self.books.read().await;
        Ok(books
            .values()
            .sorted_unstable_by_key(|book| book.id)
            .cloned()
            .collect())
    }

    async fn select_by_author_name(&self, author_name: &str) -> AppResult<Vec<BookRecordOwned>> {
        let books = self.books.read().await;
        Ok(books
            .values()
            .filter(|book| book.authors.contains(author_name))
            .sorted_unstable_by_key(|book| book.id)
            .cloned()
            .collect())
    }
}
