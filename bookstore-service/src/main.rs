//! Bookstore gRPC Service
//!
//! A gRPC service for browsing a book catalog and its reviews.
//!
//! ## Features
//!
//! - Adding, fetching, listing, and searching books
//! - Streaming reviews newest first
//! - HTTP Basic authentication and access logging on every call
//! - Structured logging and tracing

use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use bookstore_api::proto::{
    book_service_server::BookServiceServer, review_service_server::ReviewServiceServer,
};
use bookstore_service::{
    book::{
        adapter::BookAdapter,
        add_book_command::AddBookCommand,
        query_manager::BookQueryManager,
        repository::{BookRepositoryArc, memory::MemoryBookRepository},
    },
    config::{AppConfig, AuthConfig, DatabaseConfig},
    create_pipeline,
    error::AppResult,
    fixtures::Fixtures,
    review::{
        adapter::ReviewAdapter,
        query_manager::ReviewQueryManager,
        repository::{ReviewRepositoryArc, memory::MemoryReviewRepository},
    },
    tracing::tracer::Tracer,
};
use grpc_common::auth::{authenticator::AuthenticatorArc, memory::MemoryAuthenticator};

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = AppConfig::init()?;

    Tracer::install(&config.tracing, &config.distribution)?;

    info!(
        "Starting {} v{}",
        config.distribution.name,
        config.distribution.version.as_deref().unwrap_or("unknown"),
    );

    start(config).await?;

    Ok(())
}

async fn start(config: &AppConfig) -> AppResult<()> {
    let authenticator: AuthenticatorArc = match &config.auth {
        AuthConfig::Memory(auth) => Arc::new(MemoryAuthenticator::with_users(
            auth.users
                .iter()
                .map(|user| (user.username.clone(), user.password.clone())),
        )),
    };

    let pipeline = create_pipeline(authenticator);

    let book_repository: BookRepositoryArc = Arc::new(MemoryBookRepository::new());
    let review_repository: ReviewRepositoryArc = Arc::new(MemoryReviewRepository::new());

    match &config.database {
        DatabaseConfig::Memory(database) => {
            if let Some(fixtures_path) = &database.fixtures {
                info!("Loading fixtures from {}", fixtures_path.display());
                Fixtures::load(fixtures_path)?
                    .seed(&book_repository, &review_repository)
                    .await?;
            }
        }
    }

    let book_adapter = BookAdapter::new(
        pipeline.clone(),
        AddBookCommand::new(Arc::clone(&book_repository)),
        BookQueryManager::new(Arc::clone(&book_repository)),
    );

    let review_adapter = ReviewAdapter::new(
        pipeline,
        ReviewQueryManager::new(Arc::clone(&review_repository)),
    );

    let grpc_server = Server::builder()
        .add_service(BookServiceServer::new(book_adapter))
        .add_service(ReviewServiceServer::new(review_adapter));

    info!("gRPC server started at {}", config.server.grpc_address);

    grpc_server
        .serve_with_shutdown(config.server.grpc_address, async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutting down");
            }
        })
        .await?;

    Ok(())
}
