use bookstore_api::{model::book::BookId, proto::Review};

use super::repository::ReviewRepositoryArc;
use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct ReviewQueryManager {
    review_repository: ReviewRepositoryArc,
}

impl ReviewQueryManager {
    pub fn new(review_repository: ReviewRepositoryArc) -> Self {
        Self { review_repository }
    }

    /// Reviews of a book, newest first. Unknown books have no reviews.
    pub async fn query_by_book_id(&self, book_id: BookId) -> AppResult<Vec<Review>> {
        Ok(self
            .review_repository
            .select_by_book_id(&book_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
