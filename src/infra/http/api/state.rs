use std::sync::Arc;

use crate::application::books::{BookRepositories, BookService};
use crate::application::recommendations::RecommendationService;
use crate::application::repos::{
    BooksRepo, BooksWriteRepo, ReadBooksRepo, ReadBooksWriteRepo, StorageHealth, ToBeReadRepo,
    ToBeReadWriteRepo, UsersRepo, UsersWriteRepo,
};
use crate::application::users::UserService;
use crate::cache::QueryCache;

#[derive(Clone)]
pub struct ApiState {
    pub books: Arc<BookService>,
    pub recommendations: Arc<RecommendationService>,
    pub users: Arc<UserService>,
    pub health: Arc<dyn StorageHealth>,
}

impl ApiState {
    /// Wire every service against one storage backend and a shared query cache.
    pub fn from_repositories<R>(repos: Arc<R>, cache: Arc<QueryCache>) -> Self
    where
        R: BooksRepo
            + BooksWriteRepo
            + ReadBooksRepo
            + ReadBooksWriteRepo
            + ToBeReadRepo
            + ToBeReadWriteRepo
            + UsersRepo
            + UsersWriteRepo
            + StorageHealth
            + 'static,
    {
        let book_repos = BookRepositories {
            books: repos.clone(),
            books_write: repos.clone(),
            read_books: repos.clone(),
            read_books_write: repos.clone(),
            to_be_read: repos.clone(),
            to_be_read_write: repos.clone(),
        };
        let books = Arc::new(BookService::new(book_repos, cache));
        let recommendations = Arc::new(RecommendationService::new(books.clone(), repos.clone()));
        let users = Arc::new(UserService::new(repos.clone(), repos.clone()));

        Self {
            books,
            recommendations,
            users,
            health: repos,
        }
    }
}
