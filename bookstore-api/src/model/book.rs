use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

use time::Date;

use crate::proto::Book;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookModel {
    pub id: BookId,
    pub title: String,
    pub publisher: String,
    pub published_date: Date,
    pub authors: BTreeSet<String>,
}

/// Store-assigned book identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(pub i64);

impl From<BookModel> for Book {
    fn from(book: BookModel) -> Self {
        Self {
            title: book.title,
            publisher: book.publisher,
            published_date: Some(book.published_date.into()),
        }
    }
}

impl BookId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
