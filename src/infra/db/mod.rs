//! Postgres-backed repository implementations.

mod books;
mod read_books;
mod to_be_read;
mod users;
mod util;

pub use util::map_sqlx_error;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    query,
};

use crate::application::repos::{RepoError, StorageHealth};
use crate::infra::error::InfraError;

#[derive(Clone)]
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
    }

    pub async fn run_migrations(pool: &PgPool) -> Result<(), InfraError> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(InfraError::from)
    }

    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        query("SELECT 1").execute(self.pool()).await.map(|_| ())
    }
}

#[async_trait]
impl StorageHealth for PostgresRepositories {
    async fn ping(&self) -> Result<(), RepoError> {
        self.health_check().await.map_err(map_sqlx_error)
    }
}
