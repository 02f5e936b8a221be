use std::collections::BTreeSet;

use bookstore_api::proto::Book;
use time::Date;

use super::repository::{BookRecordInsert, BookRepositoryArc};
use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct AddBookCommand {
    book_repository: BookRepositoryArc,
}

#[derive(Debug)]
pub struct AddBookCommandInput<'a> {
    pub title: &'a str,
    pub publisher: &'a str,
    pub published_date: Date,
}

#[derive(Debug)]
pub struct AddBookCommandResult {
    pub book: Book,
}

impl AddBookCommand {
    pub fn new(book_repository: BookRepositoryArc) -> Self {
        Self { book_repository }
    }

    pub async fn execute(&self, input: AddBookCommandInput<'_>) -> AppResult<AddBookCommandResult> {
        let record = self
            .book_repository
            .insert(BookRecordInsert {
                title: input.title.to_string(),
                publisher: input.publisher.to_string(),
                published_date: input.published_date,
                authors: BTreeSet::new(),
            })
            .await?;

        Ok(AddBookCommandResult {
            book: record.into(),
        })
    }
}
