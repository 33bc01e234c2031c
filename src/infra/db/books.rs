use async_trait::async_trait;

use crate::{
    application::repos::{BookParams, BooksRepo, BooksWriteRepo, RepoError},
    domain::entities::BookRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i32,
    title: String,
    authors: Vec<String>,
    genre: Vec<String>,
}

impl From<BookRow> for BookRecord {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            authors: row.authors,
            genre: row.genre,
        }
    }
}

#[async_trait]
impl BooksRepo for PostgresRepositories {
    async fn list_books(&self) -> Result<Vec<BookRecord>, RepoError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, authors, genre
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(BookRecord::from).collect())
    }

    async fn find_book(&self, id: i32) -> Result<BookRecord, RepoError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, authors, genre
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn list_by_genre(&self, genre: &str) -> Result<Vec<BookRecord>, RepoError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, authors, genre
            FROM books
            WHERE $1 = ANY(genre)
            ORDER BY id
            "#,
        )
        .bind(genre)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(BookRecord::from).collect())
    }

    async fn list_by_author(&self, author: &str) -> Result<Vec<BookRecord>, RepoError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, authors, genre
            FROM books
            WHERE $1 = ANY(authors)
            ORDER BY id
            "#,
        )
        .bind(author)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(BookRecord::from).collect())
    }

    async fn list_by_title(&self, title: &str) -> Result<Vec<BookRecord>, RepoError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, authors, genre
            FROM books
            WHERE title = $1
            ORDER BY id
            "#,
        )
        .bind(title)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(BookRecord::from).collect())
    }

    async fn list_matching(
        &self,
        genres: &[String],
        authors: &[String],
    ) -> Result<Vec<BookRecord>, RepoError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, authors, genre
            FROM books
            WHERE genre && $1 OR authors && $2
            "#,
        )
        .bind(genres)
        .bind(authors)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(BookRecord::from).collect())
    }
}

#[async_trait]
impl BooksWriteRepo for PostgresRepositories {
    async fn create_book(&self, params: BookParams) -> Result<BookRecord, RepoError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            INSERT INTO books (title, authors, genre)
            VALUES ($1, $2, $3)
            RETURNING id, title, authors, genre
            "#,
        )
        .bind(&params.title)
        .bind(&params.authors)
        .bind(&params.genre)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_book(&self, id: i32, params: BookParams) -> Result<BookRecord, RepoError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            UPDATE books
            SET title = $1, authors = $2, genre = $3
            WHERE id = $4
            RETURNING id, title, authors, genre
            "#,
        )
        .bind(&params.title)
        .bind(&params.authors)
        .bind(&params.genre)
        .bind(id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn delete_book(&self, id: i32) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
