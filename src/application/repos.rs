//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{BookRecord, ReadBookRecord, ToBeReadBookRecord, UserRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct BookParams {
    pub title: String,
    pub authors: Vec<String>,
    pub genre: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ReadBookParams {
    pub user_id: i32,
    pub book_id: i32,
    pub read_date: String,
    pub rating: i32,
    pub review: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ToBeReadBookParams {
    pub user_id: i32,
    pub book_id: i32,
}

#[derive(Debug, Clone)]
pub struct UserParams {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[async_trait]
pub trait BooksRepo: Send + Sync {
    async fn list_books(&self) -> Result<Vec<BookRecord>, RepoError>;

    /// Fails with [`RepoError::NotFound`] when no book has this id.
    async fn find_book(&self, id: i32) -> Result<BookRecord, RepoError>;

    async fn list_by_genre(&self, genre: &str) -> Result<Vec<BookRecord>, RepoError>;

    async fn list_by_author(&self, author: &str) -> Result<Vec<BookRecord>, RepoError>;

    async fn list_by_title(&self, title: &str) -> Result<Vec<BookRecord>, RepoError>;

    /// Books sharing at least one genre with `genres` or one author with `authors`.
    async fn list_matching(
        &self,
        genres: &[String],
        authors: &[String],
    ) -> Result<Vec<BookRecord>, RepoError>;
}

#[async_trait]
pub trait BooksWriteRepo: Send + Sync {
    async fn create_book(&self, params: BookParams) -> Result<BookRecord, RepoError>;

    async fn update_book(&self, id: i32, params: BookParams) -> Result<BookRecord, RepoError>;

    async fn delete_book(&self, id: i32) -> Result<(), RepoError>;
}

#[async_trait]
pub trait ReadBooksRepo: Send + Sync {
    async fn list_read_books(&self) -> Result<Vec<ReadBookRecord>, RepoError>;

    /// Fails with [`RepoError::NotFound`] when no read book has this id.
    async fn find_read_book(&self, id: i32) -> Result<ReadBookRecord, RepoError>;

    async fn list_read_books_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<ReadBookRecord>, RepoError>;
}

#[async_trait]
pub trait ReadBooksWriteRepo: Send + Sync {
    async fn create_read_book(&self, params: ReadBookParams)
    -> Result<ReadBookRecord, RepoError>;

    async fn update_read_book(
        &self,
        id: i32,
        params: ReadBookParams,
    ) -> Result<ReadBookRecord, RepoError>;

    async fn delete_read_book(&self, id: i32) -> Result<(), RepoError>;
}

#[async_trait]
pub trait ToBeReadRepo: Send + Sync {
    async fn list_to_be_read(&self) -> Result<Vec<ToBeReadBookRecord>, RepoError>;

    async fn list_to_be_read_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<ToBeReadBookRecord>, RepoError>;
}

#[async_trait]
pub trait ToBeReadWriteRepo: Send + Sync {
    async fn create_to_be_read(
        &self,
        params: ToBeReadBookParams,
    ) -> Result<ToBeReadBookRecord, RepoError>;

    async fn delete_to_be_read(&self, id: i32) -> Result<(), RepoError>;
}

#[async_trait]
pub trait UsersRepo: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserRecord>, RepoError>;

    async fn find_user(&self, id: i32) -> Result<UserRecord, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<UserRecord, RepoError>;

    /// Whether another user (any id except `exclude_id`) already uses `username`.
    async fn username_taken(&self, username: &str, exclude_id: i32) -> Result<bool, RepoError>;

    /// Whether another user (any id except `exclude_id`) already uses `email`.
    async fn email_taken(&self, email: &str, exclude_id: i32) -> Result<bool, RepoError>;
}

#[async_trait]
pub trait UsersWriteRepo: Send + Sync {
    async fn create_user(&self, params: UserParams) -> Result<UserRecord, RepoError>;

    async fn update_user(&self, id: i32, params: UserParams) -> Result<UserRecord, RepoError>;

    async fn delete_user(&self, id: i32) -> Result<(), RepoError>;
}

#[async_trait]
pub trait StorageHealth: Send + Sync {
    /// Round-trip to the store; succeeds when it answers a trivial query.
    async fn ping(&self) -> Result<(), RepoError>;
}
