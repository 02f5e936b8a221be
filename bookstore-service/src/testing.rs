use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use bookstore_api::model::book::BookId;
use grpc_common::{
    auth::{credentials::BasicCredentials, memory::MemoryAuthenticator},
    pipeline::{
        CallStage, Pipeline,
        call::{CallContext, CallOutcome},
    },
};
use tonic::{Request, metadata::MetadataValue};

use crate::{
    book::{
        adapter::BookAdapter,
        add_book_command::AddBookCommand,
        query_manager::BookQueryManager,
        repository::{
            BookRecordInsert, BookRecordOwned, BookRepository, BookRepositoryArc,
            memory::MemoryBookRepository,
        },
    },
    error::AppResult,
    fixtures::Fixtures,
    pipeline_builder,
    review::{
        adapter::ReviewAdapter,
        query_manager::ReviewQueryManager,
        repository::{
            ReviewRecordInsert, ReviewRecordOwned, ReviewRepository, ReviewRepositoryArc,
            memory::MemoryReviewRepository,
        },
    },
};

pub const USERNAME: &str = "reader";
pub const PASSWORD: &str = "s3cret";

pub fn authorized<T>(message: T) -> Request<T> {
    with_credentials(message, &BasicCredentials::new(USERNAME, PASSWORD))
}

pub fn unauthorized<T>(message: T) -> Request<T> {
    with_credentials(message, &BasicCredentials::new(USERNAME, "guess"))
}

fn with_credentials<T>(message: T, credentials: &BasicCredentials) -> Request<T> {
    let mut request = Request::new(message);
    request.metadata_mut().insert(
        "authorization",
        MetadataValue::try_from(credentials.to_authorization()).unwrap(),
    );
    request
}

/// Records `<operation> <code>` for every finished call.
#[derive(Debug, Default)]
pub struct OutcomeRecorder {
    events: Arc<Mutex<Vec<String>>>,
}

impl CallStage for OutcomeRecorder {
    fn after(&self, call: &CallContext, outcome: &CallOutcome) {
        self.events
            .lock()
            .unwrap()
            .push(format!("{} {:?}", call.operation(), outcome.code()));
    }
}

/// Book repository that counts every access.
#[derive(Debug, Default)]
pub struct CountingBookRepository {
    pub inner: MemoryBookRepository,
    calls: AtomicUsize,
}

impl CountingBookRepository {
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BookRepository for CountingBookRepository {
    async fn insert(&self, record: BookRecordInsert) -> AppResult<BookRecordOwned> {
        self.record();
        self.inner.insert(record).await
    }

    async fn select(&self, id: &BookId) -> AppResult<Option<BookRecordOwned>> {
        self.record();
        self.inner.select(id).await
    }

    async fn select_all(&self) -> AppResult<Vec<BookRecordOwned>> {
        self.record();
        self.inner.select_all().await
    }

    async fn select_by_author_name(&self, author_name: &str) -> AppResult<Vec<BookRecordOwned>> {
        self.record();
        self.inner.select_by_author_name(author_name).await
    }
}

#[derive(Debug, Default)]
pub struct CountingReviewRepository {
    pub inner: MemoryReviewRepository,
    calls: AtomicUsize,
}

impl CountingReviewRepository {
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReviewRepository for CountingReviewRepository {
    async fn insert(&self, record: ReviewRecordInsert) -> AppResult<ReviewRecordOwned> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(record).await
    }

    async fn select_by_book_id(&self, book_id: &BookId) -> AppResult<Vec<ReviewRecordOwned>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.select_by_book_id(book_id).await
    }
}

/// Adapters wired to counting in-memory repositories and the production pipeline.
#[derive(Debug)]
pub struct Harness {
    pub books: Arc<CountingBookRepository>,
    pub reviews: Arc<CountingReviewRepository>,
    pipeline: Pipeline,
    events: Arc<Mutex<Vec<String>>>,
}

impl Harness {
    pub fn new() -> Self {
        let recorder = OutcomeRecorder::default();
        let events = Arc::clone(&recorder.events);
        let authenticator = MemoryAuthenticator::with_users([(USERNAME, PASSWORD)]);
        Self {
            books: Arc::default(),
            reviews: Arc::default(),
            pipeline: pipeline_builder(Arc::new(authenticator))
                .stage(recorder)
                .build(),
            events,
        }
    }

    /// A harness whose store holds the bundled fixtures.
    pub async fn seeded() -> Self {
        let harness = Self::new();
        Fixtures::from_json(include_str!("../config/fixtures.json"))
            .unwrap()
            .seed(&harness.book_repository(), &harness.review_repository())
            .await
            .unwrap();
        harness
    }

    pub fn book_repository(&self) -> BookRepositoryArc {
        Arc::clone(&self.books) as BookRepositoryArc
    }

    pub fn review_repository(&self) -> ReviewRepositoryArc {
        Arc::clone(&self.reviews) as ReviewRepositoryArc
    }

    pub fn book_adapter(&self) -> BookAdapter {
        BookAdapter::new(
            self.pipeline.clone(),
            AddBookCommand::new(self.book_repository()),
            BookQueryManager::new(self.book_repository()),
        )
    }

    pub fn review_adapter(&self) -> ReviewAdapter {
        ReviewAdapter::new(
            self.pipeline.clone(),
            ReviewQueryManager::new(self.review_repository()),
        )
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}
