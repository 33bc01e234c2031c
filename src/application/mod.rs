//! Application services: book queries, recommendations and user accounts.

pub mod books;
pub mod error;
pub mod recommendations;
pub mod repos;
pub mod users;
