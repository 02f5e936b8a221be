use std::fmt::{self, Display, Formatter};

use time::OffsetDateTime;

use crate::model::book::BookId;
use crate::proto::Review;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewModel {
    pub id: ReviewId,
    pub book_id: BookId,
    pub rating: i32,
    pub content: String,
    pub created_date: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReviewId(pub i64);

impl ReviewId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl Display for ReviewId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<ReviewModel> for Review {
    fn from(review: ReviewModel) -> Self {
        Self {
            id: review.id.0,
            book_id: review.book_id.0,
            rating: review.rating,
            created_date: Some(review.created_date.into()),
            content: review.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn to_message() {
        let created_date = datetime!(2024-01-02 03:04:05 UTC);
        let message = Review::from(ReviewModel {
            id: ReviewId::new(3),
            book_id: BookId::new(1),
            rating: 5,
            content: "A classic.".into(),
            created_date,
        });
        assert_eq!(
            message,
            Review {
                id: 3,
                book_id: 1,
                rating: 5,
                created_date: Some(created_date.into()),
                content: "A classic.".into(),
            }
        );
    }
}
