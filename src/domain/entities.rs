//! Domain entities mirrored from persistent storage.

use serde::Serialize;

/// A catalogued book. `authors` keeps the stored order; `genre` is an ordered
/// set-like list as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookRecord {
    pub id: i32,
    pub title: String,
    pub authors: Vec<String>,
    pub genre: Vec<String>,
}

/// A completed read of a book by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadBookRecord {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub read_date: String,
    pub rating: i32,
    pub review: String,
}

/// A queued intent to read a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToBeReadBookRecord {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
}
