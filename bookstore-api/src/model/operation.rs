/// Every RPC the bookstore serves, keyed by its gRPC method path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AddBook,
    GetBookDetails,
    ListBooks,
    SearchBooksByAuthor,
    GetReviews,
}

impl Operation {
    pub const fn path(self) -> &'static str {
        match self {
            Self::AddBook => "/bookstore.BookService/AddBook",
            Self::GetBookDetails => "/bookstore.BookService/GetBookDetails",
            Self::ListBooks => "/bookstore.BookService/ListBooks",
            Self::SearchBooksByAuthor => "/bookstore.BookService/SearchBooksByAuthor",
            Self::GetReviews => "/bookstore.ReviewService/GetReviews",
        }
    }
}
