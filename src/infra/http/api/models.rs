use serde::{Deserialize, Serialize};

use crate::application::books::{BookCommand, ReadBookCommand, ToBeReadBookCommand};
use crate::application::users::UserCommand;

#[derive(Debug, Deserialize, Serialize)]
pub struct BookRequest {
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub genre: Vec<String>,
}

impl From<BookRequest> for BookCommand {
    fn from(request: BookRequest) -> Self {
        Self {
            title: request.title,
            authors: request.authors,
            genre: request.genre,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReadBookRequest {
    pub user_id: i32,
    pub book_id: i32,
    #[serde(default)]
    pub read_date: String,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub review: String,
}

impl From<ReadBookRequest> for ReadBookCommand {
    fn from(request: ReadBookRequest) -> Self {
        Self {
            user_id: request.user_id,
            book_id: request.book_id,
            read_date: request.read_date,
            rating: request.rating,
            review: request.review,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ToBeReadBookRequest {
    pub user_id: i32,
    pub book_id: i32,
}

impl From<ToBeReadBookRequest> for ToBeReadBookCommand {
    fn from(request: ToBeReadBookRequest) -> Self {
        Self {
            user_id: request.user_id,
            book_id: request.book_id,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl From<UserRequest> for UserCommand {
    fn from(request: UserRequest) -> Self {
        Self {
            username: request.username,
            password: request.password,
            email: request.email,
        }
    }
}
