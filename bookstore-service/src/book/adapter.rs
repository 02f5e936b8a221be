use bookstore_api::{
    model::{
        book_service::{
            ParsedAddBookRequest, ParsedGetBookDetailsRequest, ParsedSearchBooksByAuthorRequest,
        },
        operation::Operation,
    },
    proto::{
        AddBookRequest, Book, GetBookDetailsRequest, ListBooksRequest, SearchBooksByAuthorRequest,
        book_service_server::BookService,
    },
};
use futures::{StreamExt, stream};
use grpc_common::pipeline::{Pipeline, ResponseStream};
use tonic::{Request, Response, Status};

use super::{
    add_book_command::{AddBookCommand, AddBookCommandInput},
    query_manager::BookQueryManager,
};

#[derive(Debug)]
pub struct BookAdapter {
    pipeline: Pipeline,
    add_book_command: AddBookCommand,
    book_query_manager: BookQueryManager,
}

impl BookAdapter {
    pub fn new(
        pipeline: Pipeline,
        add_book_command: AddBookCommand,
        book_query_manager: BookQueryManager,
    ) -> Self {
        Self {
            pipeline,
            add_book_command,
            book_query_manager,
        }
    }
}

#[tonic::async_trait]
impl BookService for BookAdapter {
    type ListBooksStream = ResponseStream<Book>;
    type SearchBooksByAuthorStream = ResponseStream<Book>;

    #[tracing::instrument(skip_all)]
    async fn add_book(&self, request: Request<AddBookRequest>) -> Result<Response<Book>, Status> {
        self.pipeline
            .unary(Operation::AddBook.path(), request, |request| async move {
                let request = ParsedAddBookRequest::try_from(request.into_inner())?;

                let result = self
                    .add_book_command
                    .execute(AddBookCommandInput {
                        title: &request.title,
                        publisher: &request.publisher,
                        published_date: request.published_date,
                    })
                    .await?;

                Ok(Response::new(result.book))
            })
            .await
    }

    #[tracing::instrument(skip_all)]
    async fn get_book_details(
        &self,
        request: Request<GetBookDetailsRequest>,
    ) -> Result<Response<Book>, Status> {
        self.pipeline
            .unary(
                Operation::GetBookDetails.path(),
                request,
                |request| async move {
                    let request = ParsedGetBookDetailsRequest::from(request.into_inner());
                    let book = self.book_query_manager.query_single(request.id).await?;
                    Ok(Response::new(book))
                },
            )
            .await
    }

    #[tracing::instrument(skip_all)]
    async fn list_books(
        &self,
        request: Request<ListBooksRequest>,
    ) -> Result<Response<Self::ListBooksStream>, Status> {
        self.pipeline
            .server_streaming(Operation::ListBooks.path(), request, |_request| async move {
                let books = self.book_query_manager.query_all().await?;
                Ok(Response::new(stream::iter(books.into_iter().map(Ok)).boxed()))
            })
            .await
    }

    #[tracing::instrument(skip_all)]
    async fn search_books_by_author(
        &self,
        request: Request<SearchBooksByAuthorRequest>,
    ) -> Result<Response<Self::SearchBooksByAuthorStream>, Status> {
        self.pipeline
            .server_streaming(
                Operation::SearchBooksByAuthor.path(),
                request,
                |request| async move {
                    let request = ParsedSearchBooksByAuthorRequest::from(request.into_inner());
                    let books = self
                        .book_query_manager
                        .query_by_author_name(&request.author_name)
                        .await?;
                    Ok(Response::new(stream::iter(books.into_iter().map(Ok)).boxed()))
                },
            )
            .await
    }
}
