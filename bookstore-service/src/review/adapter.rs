use bookstore_api::{
    model::{operation::Operation, review_service::ParsedGetReviewsRequest},
    proto::{GetReviewsRequest, Review, review_service_server::ReviewService},
};
use futures::{StreamExt, stream};
use grpc_common::pipeline::{Pipeline, ResponseStream};
use tonic::{Request, Response, Status};

use super::query_manager::ReviewQueryManager;

#[derive(Debug)]
pub struct ReviewAdapter {
    pipeline: Pipeline,
    review_query_manager: ReviewQueryManager,
}

impl ReviewAdapter {
    pub fn new(pipeline: Pipeline, review_query_manager: ReviewQueryManager) -> Self {
        Self {
            pipeline,
            review_query_manager,
        }
    }
}

#[tonic::async_trait]
impl ReviewService for ReviewAdapter {
    type GetReviewsStream = ResponseStream<Review>;

    #[tracing::instrument(skip_all)]
    async fn get_reviews(
        &self,
        request: Request<GetReviewsRequest>,
    ) -> Result<Response<Self::GetReviewsStream>, Status> {
        self.pipeline
            .server_streaming(Operation::GetReviews.path(), request, |request| async move {
                let request = ParsedGetReviewsRequest::from(request.into_inner());
                let reviews = self
                    .review_query_manager
                    .query_by_book_id(request.book_id)
                    .await?;
                Ok(Response::new(stream::iter(reviews.into_iter().map(Ok)).boxed()))
            })
            .await
    }
}
