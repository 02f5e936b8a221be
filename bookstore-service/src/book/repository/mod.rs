use std::{collections::BTreeSet, fmt::Debug, sync::Arc};

use async_trait::async_trait;
use bookstore_api::{
    model::book::{BookId, BookModel},
    proto::Book,
};
use time::Date;

use crate::error::AppResult;

/// In-memory repository implementation.
pub mod memory;

/// Book record for insertion operations.
///
/// Has no id: the repository assigns one when the record is stored.
#[derive(Debug, Clone)]
pub struct BookRecordInsert {
    /// Title of the book
    pub title: String,
    /// Publisher of the book
    pub publisher: String,
    /// Calendar date the book was published
    pub published_date: Date,
    /// Names of the book's authors
    pub authors: BTreeSet<String>,
}

/// Complete book record with ownership.
///
/// Represents a fully owned book record stored in the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecordOwned {
    /// Unique identifier for the book
    pub id: BookId,
    /// Title of the book
    pub title: String,
    /// Publisher of the book
    pub publisher: String,
    /// Calendar date the book was published
    pub published_date: Date,
    /// Names of the book's authors
    pub authors: BTreeSet<String>,
}

/// Repository trait for book data operations.
#[async_trait]
pub trait BookRepository: Debug {
    /// Inserts a new book record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insertion fails.
    ///
    /// # Returns
    ///
    /// Returns the stored record, carrying its newly assigned id.
    async fn insert(&self, record: BookRecordInsert) -> AppResult<BookRecordOwned>;

    /// Selects a book record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection fails.
    ///
    /// # Returns
    ///
    /// Returns the book record if found, `None` otherwise.
    async fn select(&self, id: &BookId) -> AppResult<Option<BookRecordOwned>>;

    /// Selects every book record, in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection fails.
    async fn select_all(&self) -> AppResult<Vec<BookRecordOwned>>;

    /// Selects the books whose authors include `author_name` exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection fails.
    async fn select_by_author_name(&self, author_name: &str) -> AppResult<Vec<BookRecordOwned>>;
}

/// Thread-safe shared reference to a book repository.
pub type BookRepositoryArc = Arc<dyn BookRepository + Send + Sync>;

impl From<BookRecordOwned> for BookModel {
    fn from(record: BookRecordOwned) -> Self {
        Self {
            id: record.id,
            title: record.title,
            publisher: record.publisher,
            published_date: record.published_date,
            authors: record.authors,
        }
    }
}

impl From<BookRecordOwned> for Book {
    fn from(record: BookRecordOwned) -> Self {
        BookModel::from(record).into()
    }
}
