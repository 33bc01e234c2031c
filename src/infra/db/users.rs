use async_trait::async_trait;

use crate::{
    application::repos::{RepoError, UserParams, UsersRepo, UsersWriteRepo},
    domain::entities::UserRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: String,
    password: String,
    email: String,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password: row.password,
            email: row.email,
        }
    }
}

#[async_trait]
impl UsersRepo for PostgresRepositories {
    async fn list_users(&self) -> Result<Vec<UserRecord>, RepoError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, email FROM users ORDER BY id",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(UserRecord::from).collect())
    }

    async fn find_user(&self, id: i32) -> Result<UserRecord, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, email FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find_by_username(&self, username: &str) -> Result<UserRecord, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, email FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn username_taken(&self, username: &str, exclude_id: i32) -> Result<bool, RepoError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 AND id <> $2)",
        )
        .bind(username)
        .bind(exclude_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn email_taken(&self, email: &str, exclude_id: i32) -> Result<bool, RepoError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id <> $2)",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl UsersWriteRepo for PostgresRepositories {
    async fn create_user(&self, params: UserParams) -> Result<UserRecord, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password, email)
            VALUES ($1, $2, $3)
            RETURNING id, username, password, email
            "#,
        )
        .bind(&params.username)
        .bind(&params.password)
        .bind(&params.email)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_user(&self, id: i32, params: UserParams) -> Result<UserRecord, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = $1, password = $2, email = $3
            WHERE id = $4
            RETURNING id, username, password, email
            "#,
        )
        .bind(&params.username)
        .bind(&params.password)
        .bind(&params.email)
        .bind(id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn delete_user(&self, id: i32) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
