use crate::model::book::BookId;
use crate::proto::GetReviewsRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedGetReviewsRequest {
    pub book_id: BookId,
}

impl From<GetReviewsRequest> for ParsedGetReviewsRequest {
    fn from(request: GetReviewsRequest) -> Self {
        Self {
            book_id: BookId::new(request.book_id),
        }
    }
}
