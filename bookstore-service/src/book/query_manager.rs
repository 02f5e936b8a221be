use bookstore_api::{model::book::BookId, proto::Book};

use super::repository::BookRepositoryArc;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct BookQueryManager {
    book_repository: BookRepositoryArc,
}

impl BookQueryManager {
    pub fn new(book_repository: BookRepositoryArc) -> Self {
        Self { book_repository }
    }

    pub async fn query_single(&self, id: BookId) -> AppResult<Book> {
        let record = self
            .book_repository
            .select(&id)
            .await?
            .ok_or_else(|| AppError::not_found("book", id))?;

        Ok(record.into())
    }

    pub async fn query_all(&self) -> AppResult<Vec<Book>> {
        Ok(self
            .book_repository
            .select_all()
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn query_by_author_name(&self, author_name: &str) -> AppResult<Vec<Book>> {
        Ok(self
            .book_repository
            .select_by_author_name(author_name)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
