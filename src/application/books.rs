//! Book query service: read-through lookups and uncached mutations.

use std::{future::Future, sync::Arc};

use thiserror::Error;
use tracing::debug;

use crate::application::repos::{
    BookParams, BooksRepo, BooksWriteRepo, ReadBookParams, ReadBooksRepo, ReadBooksWriteRepo,
    RepoError, ToBeReadBookParams, ToBeReadRepo, ToBeReadWriteRepo,
};
use crate::cache::{Cacheable, QueryCache, QueryKey};
use crate::domain::entities::{BookRecord, ReadBookRecord, ToBeReadBookRecord};

#[derive(Debug, Error)]
pub enum BookServiceError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct BookCommand {
    pub title: String,
    pub authors: Vec<String>,
    pub genre: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ReadBookCommand {
    pub user_id: i32,
    pub book_id: i32,
    pub read_date: String,
    pub rating: i32,
    pub review: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ToBeReadBookCommand {
    pub user_id: i32,
    pub book_id: i32,
}

/// Storage handles the book service reads from and writes to.
#[derive(Clone)]
pub struct BookRepositories {
    pub books: Arc<dyn BooksRepo>,
    pub books_write: Arc<dyn BooksWriteRepo>,
    pub read_books: Arc<dyn ReadBooksRepo>,
    pub read_books_write: Arc<dyn ReadBooksWriteRepo>,
    pub to_be_read: Arc<dyn ToBeReadRepo>,
    pub to_be_read_write: Arc<dyn ToBeReadWriteRepo>,
}

/// Book, read-book and to-be-read operations.
///
/// Keyed lookups go through the query cache: a hit is returned as stored, a
/// miss issues exactly one repository query and caches the full result for
/// the configured TTL. Mutations go straight to the repositories and leave
/// cached entries untouched, so keyed reads may lag behind writes until their
/// entries expire.
#[derive(Clone)]
pub struct BookService {
    repos: BookRepositories,
    cache: Arc<QueryCache>,
}

impl BookService {
    pub fn new(repos: BookRepositories, cache: Arc<QueryCache>) -> Self {
        Self { repos, cache }
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    // ------------------------------------------------------------------
    // Read-through lookups
    // ------------------------------------------------------------------

    pub async fn get_book_by_id(&self, id: i32) -> Result<BookRecord, BookServiceError> {
        let books = self.repos.books.clone();
        self.read_through(QueryKey::BookById(id), || async move {
            books.find_book(id).await
        })
        .await
    }

    pub async fn get_read_book_by_id(&self, id: i32) -> Result<ReadBookRecord, BookServiceError> {
        let read_books = self.repos.read_books.clone();
        self.read_through(QueryKey::ReadBookById(id), || async move {
            read_books.find_read_book(id).await
        })
        .await
    }

    pub async fn get_books_by_genre(
        &self,
        genre: &str,
    ) -> Result<Vec<BookRecord>, BookServiceError> {
        let books = self.repos.books.clone();
        self.read_through(QueryKey::BooksByGenre(genre), || async move {
            books.list_by_genre(genre).await
        })
        .await
    }

    pub async fn get_books_by_author(
        &self,
        author: &str,
    ) -> Result<Vec<BookRecord>, BookServiceError> {
        let books = self.repos.books.clone();
        self.read_through(QueryKey::BooksByAuthor(author), || async move {
            books.list_by_author(author).await
        })
        .await
    }

    pub async fn get_books_by_title(
        &self,
        title: &str,
    ) -> Result<Vec<BookRecord>, BookServiceError> {
        let books = self.repos.books.clone();
        self.read_through(QueryKey::BooksByTitle(title), || async move {
            books.list_by_title(title).await
        })
        .await
    }

    pub async fn get_read_books_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<ReadBookRecord>, BookServiceError> {
        let read_books = self.repos.read_books.clone();
        self.read_through(QueryKey::ReadBooksByUser(user_id), || async move {
            read_books.list_read_books_for_user(user_id).await
        })
        .await
    }

    pub async fn get_to_be_read_books_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<ToBeReadBookRecord>, BookServiceError> {
        let to_be_read = self.repos.to_be_read.clone();
        self.read_through(QueryKey::ToBeReadBooksByUser(user_id), || async move {
            to_be_read.list_to_be_read_for_user(user_id).await
        })
        .await
    }

    async fn read_through<T, F, Fut>(
        &self,
        key: QueryKey<'_>,
        fetch: F,
    ) -> Result<T, BookServiceError>
    where
        T: Cacheable,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, RepoError>>,
    {
        let key = key.to_string();
        if let Some(cached) = self.cache.get_as::<T>(&key) {
            return Ok(cached);
        }

        let value = fetch().await?;
        debug!(target = "booktrack::books", key = %key, "populating query cache");
        self.cache.set_as(key, value.clone(), self.cache.ttl());
        Ok(value)
    }

    // ------------------------------------------------------------------
    // Uncached listings
    // ------------------------------------------------------------------

    pub async fn get_books(&self) -> Result<Vec<BookRecord>, BookServiceError> {
        self.repos
            .books
            .list_books()
            .await
            .map_err(BookServiceError::from)
    }

    pub async fn get_read_books(&self) -> Result<Vec<ReadBookRecord>, BookServiceError> {
        self.repos
            .read_books
            .list_read_books()
            .await
            .map_err(BookServiceError::from)
    }

    pub async fn get_to_be_read_books(
        &self,
    ) -> Result<Vec<ToBeReadBookRecord>, BookServiceError> {
        self.repos
            .to_be_read
            .list_to_be_read()
            .await
            .map_err(BookServiceError::from)
    }

    // ------------------------------------------------------------------
    // Mutations (never touch the cache)
    // ------------------------------------------------------------------

    pub async fn create_book(&self, command: BookCommand) -> Result<BookRecord, BookServiceError> {
        let params = book_params(command)?;
        self.repos
            .books_write
            .create_book(params)
            .await
            .map_err(BookServiceError::from)
    }

    pub async fn update_book(
        &self,
        id: i32,
        command: BookCommand,
    ) -> Result<BookRecord, BookServiceError> {
        let params = book_params(command)?;
        self.repos
            .books_write
            .update_book(id, params)
            .await
            .map_err(BookServiceError::from)
    }

    pub async fn delete_book(&self, id: i32) -> Result<(), BookServiceError> {
        self.repos
            .books_write
            .delete_book(id)
            .await
            .map_err(BookServiceError::from)
    }

    pub async fn create_read_book(
        &self,
        command: ReadBookCommand,
    ) -> Result<ReadBookRecord, BookServiceError> {
        self.repos
            .read_books_write
            .create_read_book(read_book_params(command))
            .await
            .map_err(BookServiceError::from)
    }

    pub async fn update_read_book(
        &self,
        id: i32,
        command: ReadBookCommand,
    ) -> Result<ReadBookRecord, BookServiceError> {
        self.repos
            .read_books_write
            .update_read_book(id, read_book_params(command))
            .await
            .map_err(BookServiceError::from)
    }

    pub async fn delete_read_book(&self, id: i32) -> Result<(), BookServiceError> {
        self.repos
            .read_books_write
            .delete_read_book(id)
            .await
            .map_err(BookServiceError::from)
    }

    pub async fn create_to_be_read_book(
        &self,
        command: ToBeReadBookCommand,
    ) -> Result<ToBeReadBookRecord, BookServiceError> {
        let params = ToBeReadBookParams {
            user_id: command.user_id,
            book_id: command.book_id,
        };
        self.repos
            .to_be_read_write
            .create_to_be_read(params)
            .await
            .map_err(BookServiceError::from)
    }

    pub async fn delete_to_be_read_book(&self, id: i32) -> Result<(), BookServiceError> {
        self.repos
            .to_be_read_write
            .delete_to_be_read(id)
            .await
            .map_err(BookServiceError::from)
    }
}

fn book_params(command: BookCommand) -> Result<BookParams, BookServiceError> {
    let BookCommand {
        title,
        authors,
        genre,
    } = command;

    if title.trim().is_empty() {
        return Err(BookServiceError::Validation(
            "title must not be empty".to_string(),
        ));
    }

    Ok(BookParams {
        title,
        authors,
        genre,
    })
}

fn read_book_params(command: ReadBookCommand) -> ReadBookParams {
    ReadBookParams {
        user_id: command.user_id,
        book_id: command.book_id,
        read_date: command.read_date,
        rating: command.rating,
        review: command.review,
    }
}
