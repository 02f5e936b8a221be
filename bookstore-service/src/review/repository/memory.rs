use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
};

use async_trait::async_trait;
use bookstore_api::model::{book::BookId, review::ReviewId};
use itertools::Itertools;
use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    review::repository::{ReviewRecordInsert, ReviewRecordOwned, ReviewRepository},
};

/// In-memory implementation of the review repository.
#[derive(Debug)]
pub struct MemoryReviewRepository {
    reviews: Arc<RwLock<HashMap<ReviewId, ReviewRecordOwned>>>,
    next_id: AtomicI64,
}

impl Default for MemoryReviewRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryReviewRepository {
    pub fn new() -> Self {
        Self {
            reviews: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl ReviewRepository for MemoryReviewRepository {
    async fn insert(&self, record: ReviewRecordInsert) -> AppResult<ReviewRecordOwned> {
        let id = ReviewId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let review = ReviewRecordOwned {
            id,
            book_id: record.book_id,
            rating: record.rating,
            content: record.content,
            created_date: record.created_date,
        };
        self.reviews.write().await.insert(id, review.clone());
        Ok(review)
    }

    async fn select_by_book_id(&self, book_id: &BookId) -> AppResult<Vec<ReviewRecordOwned>> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .values()
            .filter(|review| review.book_id == *book_id)
            .sorted_unstable_by(|a, b| {
                b.created_date
                    .cmp(&a.created_date)
                    .then_with(|| b.id.cmp(&a.id))
            })
            .cloned()
            .collect())
    }
}
