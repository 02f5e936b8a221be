use time::Date;

use crate::model::book::BookId;
use crate::model::error::{ModelError, ModelResult};
use crate::proto::{AddBookRequest, GetBookDetailsRequest, SearchBooksByAuthorRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddBookRequest {
    pub title: String,
    pub publisher: String,
    pub published_date: Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedGetBookDetailsRequest {
    pub id: BookId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSearchBooksByAuthorRequest {
    pub author_name: String,
}

impl TryFrom<AddBookRequest> for ParsedAddBookRequest {
    type Error = ModelError;

    /// An unset `published_date` decodes as the default timestamp, the Unix epoch.
    fn try_from(request: AddBookRequest) -> ModelResult<Self> {
        let published_date = Date::try_from(request.published_date.unwrap_or_default())
            .map_err(|source| ModelError::InvalidTimestamp {
                field: "published_date",
                source,
            })?;
        Ok(Self {
            title: request.title,
            publisher: request.publisher,
            published_date,
        })
    }
}

impl From<GetBookDetailsRequest> for ParsedGetBookDetailsRequest {
    fn from(request: GetBookDetailsRequest) -> Self {
        Self {
            id: BookId::new(request.book_id),
        }
    }
}

impl From<SearchBooksByAuthorRequest> for ParsedSearchBooksByAuthorRequest {
    fn from(request: SearchBooksByAuthorRequest) -> Self {
        Self {
            author_name: request.author_name,
        }
    }
}
