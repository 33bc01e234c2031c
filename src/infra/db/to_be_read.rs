use async_trait::async_trait;

use crate::{
    application::repos::{RepoError, ToBeReadBookParams, ToBeReadRepo, ToBeReadWriteRepo},
    domain::entities::ToBeReadBookRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct ToBeReadRow {
    id: i32,
    user_id: i32,
    book_id: i32,
}

impl From<ToBeReadRow> for ToBeReadBookRecord {
    fn from(row: ToBeReadRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            book_id: row.book_id,
        }
    }
}

#[async_trait]
impl ToBeReadRepo for PostgresRepositories {
    async fn list_to_be_read(&self) -> Result<Vec<ToBeReadBookRecord>, RepoError> {
        let rows = sqlx::query_as::<_, ToBeReadRow>(
            "SELECT id, user_id, book_id FROM to_be_read_books ORDER BY id",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ToBeReadBookRecord::from).collect())
    }

    async fn list_to_be_read_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<ToBeReadBookRecord>, RepoError> {
        let rows = sqlx::query_as::<_, ToBeReadRow>(
            r#"
            SELECT id, user_id, book_id
            FROM to_be_read_books
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ToBeReadBookRecord::from).collect())
    }
}

#[async_trait]
impl ToBeReadWriteRepo for PostgresRepositories {
    async fn create_to_be_read(
        &self,
        params: ToBeReadBookParams,
    ) -> Result<ToBeReadBookRecord, RepoError> {
        let row = sqlx::query_as::<_, ToBeReadRow>(
            r#"
            INSERT INTO to_be_read_books (user_id, book_id)
            VALUES ($1, $2)
            RETURNING id, user_id, book_id
            "#,
        )
        .bind(params.user_id)
        .bind(params.book_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn delete_to_be_read(&self, id: i32) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM to_be_read_books WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
