use async_trait::async_trait;

use crate::{
    application::repos::{ReadBookParams, ReadBooksRepo, ReadBooksWriteRepo, RepoError},
    domain::entities::ReadBookRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct ReadBookRow {
    id: i32,
    user_id: i32,
    book_id: i32,
    read_date: String,
    rating: i32,
    review: String,
}

impl From<ReadBookRow> for ReadBookRecord {
    fn from(row: ReadBookRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            book_id: row.book_id,
            read_date: row.read_date,
            rating: row.rating,
            review: row.review,
        }
    }
}

#[async_trait]
impl ReadBooksRepo for PostgresRepositories {
    async fn list_read_books(&self) -> Result<Vec<ReadBookRecord>, RepoError> {
        let rows = sqlx::query_as::<_, ReadBookRow>(
            r#"
            SELECT id, user_id, book_id, read_date, rating, review
            FROM read_books
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ReadBookRecord::from).collect())
    }

    async fn find_read_book(&self, id: i32) -> Result<ReadBookRecord, RepoError> {
        let row = sqlx::query_as::<_, ReadBookRow>(
            r#"
            SELECT id, user_id, book_id, read_date, rating, review
            FROM read_books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn list_read_books_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<ReadBookRecord>, RepoError> {
        let rows = sqlx::query_as::<_, ReadBookRow>(
            r#"
            SELECT id, user_id, book_id, read_date, rating, review
            FROM read_books
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ReadBookRecord::from).collect())
    }
}

#[async_trait]
impl ReadBooksWriteRepo for PostgresRepositories {
    async fn create_read_book(
        &self,
        params: ReadBookParams,
    ) -> Result<ReadBookRecord, RepoError> {
        let row = sqlx::query_as::<_, ReadBookRow>(
            r#"
            INSERT INTO read_books (user_id, book_id, read_date, rating, review)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, book_id, read_date, rating, review
            "#,
        )
        .bind(params.user_id)
        .bind(params.book_id)
        .bind(&params.read_date)
        .bind(params.rating)
        .bind(&params.review)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_read_book(
        &self,
        id: i32,
        params: ReadBookParams,
    ) -> Result<ReadBookRecord, RepoError> {
        let row = sqlx::query_as::<_, ReadBookRow>(
            r#"
            UPDATE read_books
            SET user_id = $1, book_id = $2, read_date = $3, rating = $4, review = $5
            WHERE id = $6
            RETURNING id, user_id, book_id, read_date, rating, review
            "#,
        )
        .bind(params.user_id)
        .bind(params.book_id)
        .bind(&params.read_date)
        .bind(params.rating)
        .bind(&params.review)
        .bind(id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn delete_read_book(&self, id: i32) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM read_books WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
