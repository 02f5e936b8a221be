use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use bookstore_api::{
    model::{
        book::BookId,
        review::{ReviewId, ReviewModel},
    },
    proto::Review,
};
use time::OffsetDateTime;

use crate::error::AppResult;

/// In-memory repository implementation.
pub mod memory;

#[derive(Debug, Clone)]
pub struct ReviewRecordInsert {
    pub book_id: BookId,
    pub rating: i32,
    pub content: String,
    pub created_date: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecordOwned {
    pub id: ReviewId,
    pub book_id: BookId,
    pub rating: i32,
    pub content: String,
    pub created_date: OffsetDateTime,
}

/// Repository trait for review data operations.
#[async_trait]
pub trait ReviewRepository: Debug {
    /// Inserts a new review record and assigns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insertion fails.
    async fn insert(&self, record: ReviewRecordInsert) -> AppResult<ReviewRecordOwned>;

    /// Selects the reviews of a book, newest first.
    ///
    /// Reviews created at the same instant are ordered by descending id.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection fails.
    async fn select_by_book_id(&self, book_id: &BookId) -> AppResult<Vec<ReviewRecordOwned>>;
}

pub type ReviewRepositoryArc = Arc<dyn ReviewRepository + Send + Sync>;

impl From<ReviewRecordOwned> for ReviewModel {
    fn from(record: ReviewRecordOwned) -> Self {
        Self {
            id: record.id,
            book_id: record.book_id,
            rating: record.rating,
            content: record.content,
            created_date: record.created_date,
        }
    }
}

impl From<ReviewRecordOwned> for Review {
    fn from(record: ReviewRecordOwned) -> Self {
        ReviewModel::from(record).into()
    }
}
