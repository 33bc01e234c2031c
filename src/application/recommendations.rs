use std::sync::Arc;

use tracing::debug;

use crate::application::books::{BookService, BookServiceError};
use crate::application::repos::BooksRepo;
use crate::domain::entities::BookRecord;

/// Derives candidate books from a user's read history.
///
/// Every genre and author of every book the user has read is collected, then
/// one query returns all books sharing any of them. Books the user has already
/// read or queued are not filtered out and the result is not ranked.
#[derive(Clone)]
pub struct RecommendationService {
    books: Arc<BookService>,
    repo: Arc<dyn BooksRepo>,
}

impl RecommendationService {
    pub fn new(books: Arc<BookService>, repo: Arc<dyn BooksRepo>) -> Self {
        Self { books, repo }
    }

    pub async fn recommend_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<BookRecord>, BookServiceError> {
        let history = self.books.get_read_books_by_user(user_id).await?;

        let mut genres = Vec::new();
        let mut authors = Vec::new();
        for entry in &history {
            let book = self.books.get_book_by_id(entry.book_id).await?;
            genres.extend(book.genre);
            authors.extend(book.authors);
        }

        debug!(
            target = "booktrack::recommendations",
            user_id,
            history = history.len(),
            genres = genres.len(),
            authors = authors.len(),
            "querying recommendation candidates"
        );

        self.repo
            .list_matching(&genres, &authors)
            .await
            .map_err(BookServiceError::from)
    }
}
