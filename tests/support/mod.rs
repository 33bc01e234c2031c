//! In-memory repositories shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use booktrack::application::repos::{
    BookParams, BooksRepo, BooksWriteRepo, ReadBookParams, ReadBooksRepo, ReadBooksWriteRepo,
    RepoError, StorageHealth, ToBeReadBookParams, ToBeReadRepo, ToBeReadWriteRepo, UserParams,
    UsersRepo, UsersWriteRepo,
};
use booktrack::domain::entities::{BookRecord, ReadBookRecord, ToBeReadBookRecord, UserRecord};

#[derive(Default)]
struct Tables {
    books: Vec<BookRecord>,
    read_books: Vec<ReadBookRecord>,
    to_be_read: Vec<ToBeReadBookRecord>,
    users: Vec<UserRecord>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Storage double: keeps rows in memory and counts every read query by name.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    queries: Mutex<HashMap<&'static str, usize>>,
    total_queries: AtomicUsize,
    failing: AtomicBool,
    healthy: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        let store = Self::default();
        store.healthy.store(true, Ordering::SeqCst);
        store
    }

    pub fn insert_book(&self, title: &str, authors: &[&str], genre: &[&str]) -> BookRecord {
        let mut tables = self.tables.lock().unwrap();
        let book = BookRecord {
            id: tables.next_id(),
            title: title.to_string(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            genre: genre.iter().map(|g| g.to_string()).collect(),
        };
        tables.books.push(book.clone());
        book
    }

    pub fn insert_read_book(&self, user_id: i32, book_id: i32) -> ReadBookRecord {
        let mut tables = self.tables.lock().unwrap();
        let read_book = ReadBookRecord {
            id: tables.next_id(),
            user_id,
            book_id,
            read_date: "2024-01-01".to_string(),
            rating: 5,
            review: String::new(),
        };
        tables.read_books.push(read_book.clone());
        read_book
    }

    pub fn insert_user(&self, username: &str, email: &str) -> UserRecord {
        let mut tables = self.tables.lock().unwrap();
        let user = UserRecord {
            id: tables.next_id(),
            username: username.to_string(),
            password: "secret".to_string(),
            email: email.to_string(),
        };
        tables.users.push(user.clone());
        user
    }

    /// Number of read queries issued under `name` (e.g. `"find_book"`).
    pub fn query_count(&self, name: &str) -> usize {
        self.queries
            .lock()
            .unwrap()
            .get(name)
            .copied()
            .unwrap_or_default()
    }

    pub fn total_queries(&self) -> usize {
        self.total_queries.load(Ordering::SeqCst)
    }

    /// Make every subsequent read query fail with a persistence error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    fn record(&self, name: &'static str) -> Result<(), RepoError> {
        self.total_queries.fetch_add(1, Ordering::SeqCst);
        *self.queries.lock().unwrap().entry(name).or_default() += 1;
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepoError::Persistence("connection reset".to_string()));
        }
        Ok(())
    }

    fn books_where(&self, predicate: impl Fn(&BookRecord) -> bool) -> Vec<BookRecord> {
        self.tables
            .lock()
            .unwrap()
            .books
            .iter()
            .filter(|book| predicate(book))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BooksRepo for MemoryStore {
    async fn list_books(&self) -> Result<Vec<BookRecord>, RepoError> {
        self.record("list_books")?;
        Ok(self.books_where(|_| true))
    }

    async fn find_book(&self, id: i32) -> Result<BookRecord, RepoError> {
        self.record("find_book")?;
        self.books_where(|book| book.id == id)
            .into_iter()
            .next()
            .ok_or(RepoError::NotFound)
    }

    async fn list_by_genre(&self, genre: &str) -> Result<Vec<BookRecord>, RepoError> {
        self.record("list_by_genre")?;
        Ok(self.books_where(|book| book.genre.iter().any(|g| g == genre)))
    }

    async fn list_by_author(&self, author: &str) -> Result<Vec<BookRecord>, RepoError> {
        self.record("list_by_author")?;
        Ok(self.books_where(|book| book.authors.iter().any(|a| a == author)))
    }

    async fn list_by_title(&self, title: &str) -> Result<Vec<BookRecord>, RepoError> {
        self.record("list_by_title")?;
        Ok(self.books_where(|book| book.title == title))
    }

    async fn list_matching(
        &self,
        genres: &[String],
        authors: &[String],
    ) -> Result<Vec<BookRecord>, RepoError> {
        self.record("list_matching")?;
        Ok(self.books_where(|book| {
            book.genre.iter().any(|g| genres.contains(g))
                || book.authors.iter().any(|a| authors.contains(a))
        }))
    }
}

#[async_trait]
impl BooksWriteRepo for MemoryStore {
    async fn create_book(&self, params: BookParams) -> Result<BookRecord, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        let book = BookRecord {
            id: tables.next_id(),
            title: params.title,
            authors: params.authors,
            genre: params.genre,
        };
        tables.books.push(book.clone());
        Ok(book)
    }

    async fn update_book(&self, id: i32, params: BookParams) -> Result<BookRecord, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        let book = tables
            .books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(RepoError::NotFound)?;
        book.title = params.title;
        book.authors = params.authors;
        book.genre = params.genre;
        Ok(book.clone())
    }

    async fn delete_book(&self, id: i32) -> Result<(), RepoError> {
        self.tables.lock().unwrap().books.retain(|book| book.id != id);
        Ok(())
    }
}

#[async_trait]
impl ReadBooksRepo for MemoryStore {
    async fn list_read_books(&self) -> Result<Vec<ReadBookRecord>, RepoError> {
        self.record("list_read_books")?;
        Ok(self.tables.lock().unwrap().read_books.clone())
    }

    async fn find_read_book(&self, id: i32) -> Result<ReadBookRecord, RepoError> {
        self.record("find_read_book")?;
        self.tables
            .lock()
            .unwrap()
            .read_books
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn list_read_books_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<ReadBookRecord>, RepoError> {
        self.record("list_read_books_for_user")?;
        Ok(self
            .tables
            .lock()
            .unwrap()
            .read_books
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReadBooksWriteRepo for MemoryStore {
    async fn create_read_book(
        &self,
        params: ReadBookParams,
    ) -> Result<ReadBookRecord, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        let entry = ReadBookRecord {
            id: tables.next_id(),
            user_id: params.user_id,
            book_id: params.book_id,
            read_date: params.read_date,
            rating: params.rating,
            review: params.review,
        };
        tables.read_books.push(entry.clone());
        Ok(entry)
    }

    async fn update_read_book(
        &self,
        id: i32,
        params: ReadBookParams,
    ) -> Result<ReadBookRecord, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        let entry = tables
            .read_books
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(RepoError::NotFound)?;
        entry.user_id = params.user_id;
        entry.book_id = params.book_id;
        entry.read_date = params.read_date;
        entry.rating = params.rating;
        entry.review = params.review;
        Ok(entry.clone())
    }

    async fn delete_read_book(&self, id: i32) -> Result<(), RepoError> {
        self.tables
            .lock()
            .unwrap()
            .read_books
            .retain(|entry| entry.id != id);
        Ok(())
    }
}

#[async_trait]
impl ToBeReadRepo for MemoryStore {
    async fn list_to_be_read(&self) -> Result<Vec<ToBeReadBookRecord>, RepoError> {
        self.record("list_to_be_read")?;
        Ok(self.tables.lock().unwrap().to_be_read.clone())
    }

    async fn list_to_be_read_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<ToBeReadBookRecord>, RepoError> {
        self.record("list_to_be_read_for_user")?;
        Ok(self
            .tables
            .lock()
            .unwrap()
            .to_be_read
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ToBeReadWriteRepo for MemoryStore {
    async fn create_to_be_read(
        &self,
        params: ToBeReadBookParams,
    ) -> Result<ToBeReadBookRecord, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        let entry = ToBeReadBookRecord {
            id: tables.next_id(),
            user_id: params.user_id,
            book_id: params.book_id,
        };
        tables.to_be_read.push(entry.clone());
        Ok(entry)
    }

    async fn delete_to_be_read(&self, id: i32) -> Result<(), RepoError> {
        self.tables
            .lock()
            .unwrap()
            .to_be_read
            .retain(|entry| entry.id != id);
        Ok(())
    }
}

#[async_trait]
impl UsersRepo for MemoryStore {
    async fn list_users(&self) -> Result<Vec<UserRecord>, RepoError> {
        self.record("list_users")?;
        Ok(self.tables.lock().unwrap().users.clone())
    }

    async fn find_user(&self, id: i32) -> Result<UserRecord, RepoError> {
        self.record("find_user")?;
        self.tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn find_by_username(&self, username: &str) -> Result<UserRecord, RepoError> {
        self.record("find_by_username")?;
        self.tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn username_taken(&self, username: &str, exclude_id: i32) -> Result<bool, RepoError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .iter()
            .any(|user| user.username == username && user.id != exclude_id))
    }

    async fn email_taken(&self, email: &str, exclude_id: i32) -> Result<bool, RepoError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .iter()
            .any(|user| user.email == email && user.id != exclude_id))
    }
}

#[async_trait]
impl UsersWriteRepo for MemoryStore {
    async fn create_user(&self, params: UserParams) -> Result<UserRecord, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        let user = UserRecord {
            id: tables.next_id(),
            username: params.username,
            password: params.password,
            email: params.email,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: i32, params: UserParams) -> Result<UserRecord, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        let user = tables
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or(RepoError::NotFound)?;
        user.username = params.username;
        user.password = params.password;
        user.email = params.email;
        Ok(user.clone())
    }

    async fn delete_user(&self, id: i32) -> Result<(), RepoError> {
        self.tables.lock().unwrap().users.retain(|user| user.id != id);
        Ok(())
    }
}

#[async_trait]
impl StorageHealth for MemoryStore {
    async fn ping(&self) -> Result<(), RepoError> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RepoError::Persistence("database unreachable".to_string()))
        }
    }
}
