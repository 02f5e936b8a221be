//! Seed data for the in-memory store.

use std::path::Path;

use serde::Deserialize;
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::{
    book::repository::{BookRecordInsert, BookRepositoryArc},
    error::AppResult,
    review::repository::{ReviewRecordInsert, ReviewRepositoryArc},
};

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub books: Vec<BookFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookFixture {
    pub title: String,
    pub publisher: String,
    #[serde(with = "calendar_date")]
    pub published_date: Date,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<ReviewFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewFixture {
    pub rating: i32,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_date: OffsetDateTime,
}

impl Fixtures {
    /// Reads fixtures from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// # Errors
    ///
    /// Returns an error if `content` is not a valid fixtures document.
    pub fn from_json(content: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Inserts every book, then its reviews, in document order.
    ///
    /// # Errors
    ///
    /// Returns the first repository error.
    pub async fn seed(
        self,
        book_repository: &BookRepositoryArc,
        review_repository: &ReviewRepositoryArc,
    ) -> AppResult<()> {
        let mut review_count = 0;
        for fixture in self.books {
            let book = book_repository
                .insert(BookRecordInsert {
                    title: fixture.title,
                    publisher: fixture.publisher,
                    published_date: fixture.published_date,
                    authors: fixture.authors.into_iter().collect(),
                })
                .await?;

            for review in fixture.reviews {
                review_repository
                    .insert(ReviewRecordInsert {
                        book_id: book.id,
                        rating: review.rating,
                        content: review.content,
                        created_date: review.created_date,
                    })
                    .await?;
                review_count += 1;
            }
        }
        info!(review_count, "seeded store from fixtures");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bookstore_api::model::book::BookId;
    use time::macros::{date, datetime};

    use super::*;
    use crate::book::repository::memory::MemoryBookRepository;
    use crate::review::repository::memory::MemoryReviewRepository;

    #[test]
    fn parse() {
        let fixtures = Fixtures::from_json(
            r#"{
                "books": [{
                    "title": "Dune",
                    "publisher": "Ace Books",
                    "published_date": "1965-08-01",
                    "authors": ["Frank Herbert"],
                    "reviews": [{
                        "rating": 5,
                        "content": "A classic.",
                        "created_date": "2024-01-02T03:04:05Z"
                    }]
                }, {
                    "title": "Untitled",
                    "publisher": "Nobody",
                    "published_date": "2000-01-01"
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(fixtures.books.len(), 2);
        let dune = &fixtures.books[0];
        assert_eq!(dune.published_date, date!(1965 - 08 - 01));
        assert_eq!(dune.authors, vec!["Frank Herbert"]);
        assert_eq!(
            dune.reviews[0].created_date,
            datetime!(2024-01-02 03:04:05 UTC)
        );
        assert!(fixtures.books[1].reviews.is_empty());

        assert!(Fixtures::from_json(r#"{"books": [{"title": "No date"}]}"#).is_err());
    }

    #[tokio::test]
    async fn seed_bundled_fixtures() {
        let book_repository: BookRepositoryArc = Arc::new(MemoryBookRepository::new());
        let review_repository: ReviewRepositoryArc = Arc::new(MemoryReviewRepository::new());

        Fixtures::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config/fixtures.json"))
            .unwrap()
            .seed(&book_repository, &review_repository)
            .await
            .unwrap();

        let books = book_repository.select_all().await.unwrap();
        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[0].id, BookId::new(1));
        assert!(books[0].authors.contains("Frank Herbert"));

        let reviews = review_repository
            .select_by_book_id(&BookId::new(1))
            .await
            .unwrap();
        assert_eq!(reviews.len(), 3);
    }
}
