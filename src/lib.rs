//! Book tracking API: a read-through query cache over Postgres-backed
//! book, reading-history and user repositories.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
