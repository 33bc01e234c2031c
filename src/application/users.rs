use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::application::repos::{RepoError, UserParams, UsersRepo, UsersWriteRepo};
use crate::domain::{entities::UserRecord, users::is_email_valid};

/// Id used when checking availability for an account that does not exist yet.
const NEW_USER_ID: i32 = 0;

#[derive(Debug, Error)]
pub enum UserServiceError {
    #[error("Username is taken")]
    UsernameTaken,
    #[error("Email is taken")]
    EmailTaken,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("`{0}` must not be empty")]
    MissingField(&'static str),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct UserCommand {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Account management. Users are never cached.
#[derive(Clone)]
pub struct UserService {
    reader: Arc<dyn UsersRepo>,
    writer: Arc<dyn UsersWriteRepo>,
}

impl UserService {
    pub fn new(reader: Arc<dyn UsersRepo>, writer: Arc<dyn UsersWriteRepo>) -> Self {
        Self { reader, writer }
    }

    pub async fn create_user(&self, command: UserCommand) -> Result<UserRecord, UserServiceError> {
        let params = self.validate(command, NEW_USER_ID).await?;
        let user = self.writer.create_user(params).await?;
        info!(
            target = "booktrack::users",
            user_id = user.id,
            username = %user.username,
            "user created"
        );
        Ok(user)
    }

    /// Validates every account before inserting any; inserts stop at the
    /// first storage failure.
    pub async fn create_users(
        &self,
        commands: Vec<UserCommand>,
    ) -> Result<Vec<UserRecord>, UserServiceError> {
        let mut batch = Vec::with_capacity(commands.len());
        for command in commands {
            batch.push(self.validate(command, NEW_USER_ID).await?);
        }

        let mut created = Vec::with_capacity(batch.len());
        for params in batch {
            created.push(self.writer.create_user(params).await?);
        }

        info!(
            target = "booktrack::users",
            count = created.len(),
            "users created"
        );
        Ok(created)
    }

    pub async fn update_user(
        &self,
        id: i32,
        command: UserCommand,
    ) -> Result<UserRecord, UserServiceError> {
        let params = self.validate(command, id).await?;
        self.writer
            .update_user(id, params)
            .await
            .map_err(UserServiceError::from)
    }

    pub async fn delete_user(&self, id: i32) -> Result<(), UserServiceError> {
        self.writer
            .delete_user(id)
            .await
            .map_err(UserServiceError::from)
    }

    pub async fn get_users(&self) -> Result<Vec<UserRecord>, UserServiceError> {
        self.reader
            .list_users()
            .await
            .map_err(UserServiceError::from)
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<UserRecord, UserServiceError> {
        self.reader
            .find_user(id)
            .await
            .map_err(UserServiceError::from)
    }

    pub async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<UserRecord, UserServiceError> {
        self.reader
            .find_by_username(username)
            .await
            .map_err(UserServiceError::from)
    }

    async fn validate(
        &self,
        command: UserCommand,
        id: i32,
    ) -> Result<UserParams, UserServiceError> {
        let UserCommand {
            username,
            password,
            email,
        } = command;

        if username.trim().is_empty() {
            return Err(UserServiceError::MissingField("username"));
        }
        if email.trim().is_empty() {
            return Err(UserServiceError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(UserServiceError::MissingField("password"));
        }

        if self.reader.username_taken(&username, id).await? {
            return Err(UserServiceError::UsernameTaken);
        }
        if self.reader.email_taken(&email, id).await? {
            return Err(UserServiceError::EmailTaken);
        }
        if !is_email_valid(&email) {
            return Err(UserServiceError::InvalidEmail);
        }

        Ok(UserParams {
            username,
            password,
            email,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct StubUsers {
        existing: Vec<UserRecord>,
        created: Mutex<Vec<UserParams>>,
        fail_insert_after: Option<usize>,
    }

    impl StubUsers {
        fn with_existing(existing: Vec<UserRecord>) -> Self {
            Self {
                existing,
                ..Default::default()
            }
        }

        fn created_usernames(&self) -> Vec<String> {
            self.created
                .lock()
                .unwrap()
                .iter()
                .map(|params| params.username.clone())
                .collect()
        }
    }

    #[async_trait]
    impl UsersRepo for StubUsers {
        async fn list_users(&self) -> Result<Vec<UserRecord>, RepoError> {
            Ok(self.existing.clone())
        }

        async fn find_user(&self, id: i32) -> Result<UserRecord, RepoError> {
            self.existing
                .iter()
                .find(|user| user.id == id)
                .cloned()
                .ok_or(RepoError::NotFound)
        }

        async fn find_by_username(&self, username: &str) -> Result<UserRecord, RepoError> {
            self.existing
                .iter()
                .find(|user| user.username == username)
                .cloned()
                .ok_or(RepoError::NotFound)
        }

        async fn username_taken(&self, username: &str, exclude_id: i32) -> Result<bool, RepoError> {
            Ok(self
                .existing
                .iter()
                .any(|user| user.username == username && user.id != exclude_id))
        }

        async fn email_taken(&self, email: &str, exclude_id: i32) -> Result<bool, RepoError> {
            Ok(self
                .existing
                .iter()
                .any(|user| user.email == email && user.id != exclude_id))
        }
    }

    #[async_trait]
    impl UsersWriteRepo for StubUsers {
        async fn create_user(&self, params: UserParams) -> Result<UserRecord, RepoError> {
            let mut created = self.created.lock().unwrap();
            if self.fail_insert_after == Some(created.len()) {
                return Err(RepoError::Duplicate {
                    constraint: "users_username_key".to_string(),
                });
            }
            created.push(params.clone());
            Ok(UserRecord {
                id: 100 + created.len() as i32,
                username: params.username,
                password: params.password,
                email: params.email,
            })
        }

        async fn update_user(&self, id: i32, params: UserParams) -> Result<UserRecord, RepoError> {
            Ok(UserRecord {
                id,
                username: params.username,
                password: params.password,
                email: params.email,
            })
        }

        async fn delete_user(&self, _id: i32) -> Result<(), RepoError> {
            Ok(())
        }
    }

    fn existing_user(id: i32, username: &str, email: &str) -> UserRecord {
        UserRecord {
            id,
            username: username.to_string(),
            password: "secret".to_string(),
            email: email.to_string(),
        }
    }

    fn command(username: &str, email: &str) -> UserCommand {
        UserCommand {
            username: username.to_string(),
            password: "hunter2".to_string(),
            email: email.to_string(),
        }
    }

    fn service(stub: Arc<StubUsers>) -> UserService {
        UserService::new(stub.clone(), stub)
    }

    #[tokio::test]
    async fn create_user_returns_stored_record() {
        let stub = Arc::new(StubUsers::default());
        let user = service(stub.clone())
            .create_user(command("ada", "ada@example.com"))
            .await
            .expect("user created");

        assert_eq!(user.id, 101);
        assert_eq!(user.username, "ada");
        assert_eq!(stub.created_usernames(), vec!["ada".to_string()]);
    }

    #[tokio::test]
    async fn username_check_runs_before_email_checks() {
        let stub = Arc::new(StubUsers::with_existing(vec![existing_user(
            1,
            "ada",
            "ada@example.com",
        )]));

        let err = service(stub.clone())
            .create_user(command("ada", "not-an-email"))
            .await
            .expect_err("username taken");

        assert!(matches!(err, UserServiceError::UsernameTaken));
        assert!(stub.created_usernames().is_empty());
    }

    #[tokio::test]
    async fn taken_email_is_reported_before_format() {
        let stub = Arc::new(StubUsers::with_existing(vec![existing_user(
            1,
            "ada",
            "shared",
        )]));

        let err = service(stub)
            .create_user(command("grace", "shared"))
            .await
            .expect_err("email taken");

        assert!(matches!(err, UserServiceError::EmailTaken));
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let stub = Arc::new(StubUsers::default());

        let err = service(stub)
            .create_user(command("grace", "grace@localhost"))
            .await
            .expect_err("invalid email");

        assert!(matches!(err, UserServiceError::InvalidEmail));
        assert_eq!(err.to_string(), "Invalid email");
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let stub = Arc::new(StubUsers::default());
        let users = service(stub);

        let err = users
            .create_user(command("  ", "a@example.com"))
            .await
            .expect_err("blank username");
        assert!(matches!(err, UserServiceError::MissingField("username")));

        let mut missing_password = command("grace", "grace@example.com");
        missing_password.password.clear();
        let err = users
            .create_user(missing_password)
            .await
            .expect_err("blank password");
        assert!(matches!(err, UserServiceError::MissingField("password")));
    }

    #[tokio::test]
    async fn update_may_keep_own_username_and_email() {
        let stub = Arc::new(StubUsers::with_existing(vec![
            existing_user(1, "ada", "ada@example.com"),
            existing_user(2, "grace", "grace@example.com"),
        ]));
        let users = service(stub);

        let updated = users
            .update_user(1, command("ada", "ada@example.com"))
            .await
            .expect("own name is available");
        assert_eq!(updated.id, 1);

        let err = users
            .update_user(1, command("grace", "ada@example.com"))
            .await
            .expect_err("other user's name");
        assert!(matches!(err, UserServiceError::UsernameTaken));
    }

    #[tokio::test]
    async fn bulk_create_validates_everything_before_inserting() {
        let stub = Arc::new(StubUsers::default());

        let err = service(stub.clone())
            .create_users(vec![
                command("ada", "ada@example.com"),
                command("grace", "broken"),
            ])
            .await
            .expect_err("second user invalid");

        assert!(matches!(err, UserServiceError::InvalidEmail));
        assert!(stub.created_usernames().is_empty());
    }

    #[tokio::test]
    async fn bulk_create_stops_at_first_storage_failure() {
        let stub = Arc::new(StubUsers {
            fail_insert_after: Some(1),
            ..Default::default()
        });

        let err = service(stub.clone())
            .create_users(vec![
                command("ada", "ada@example.com"),
                command("grace", "grace@example.com"),
                command("linus", "linus@example.com"),
            ])
            .await
            .expect_err("second insert fails");

        assert!(matches!(
            err,
            UserServiceError::Repo(RepoError::Duplicate { .. })
        ));
        assert_eq!(stub.created_usernames(), vec!["ada".to_string()]);
    }
}
