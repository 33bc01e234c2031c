use std::error::Error as StdError;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::books::BookServiceError;
use crate::application::error::ErrorReport;
use crate::application::repos::RepoError;
use crate::application::users::UserServiceError;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const INVALID_BODY: &str = "invalid_body";
    pub const INVALID_PATH: &str = "invalid_path";
    pub const VALIDATION: &str = "validation_error";
    pub const USERNAME_TAKEN: &str = "username_taken";
    pub const EMAIL_TAKEN: &str = "email_taken";
    pub const INVALID_EMAIL: &str = "invalid_email";
    pub const NOT_FOUND: &str = "not_found";
    pub const DUPLICATE: &str = "duplicate";
    pub const INVALID_INPUT: &str = "invalid_input";
    pub const INTEGRITY: &str = "integrity_error";
    pub const DB_TIMEOUT: &str = "db_timeout";
    pub const DB_UNAVAILABLE: &str = "db_unavailable";
    pub const REPO: &str = "repo_error";
}

#[derive(Debug, Serialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

const REPORT_SOURCE: &str = "infra::http::api";

/// Error returned by API handlers.
///
/// `hint` is shown to the client. `cause` is only recorded in the attached
/// [`ErrorReport`].
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
    hint: Option<String>,
    cause: Option<Box<dyn StdError + Send + Sync>>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: &'static str,
        hint: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message,
            hint,
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl StdError + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn bad_request(message: &'static str, hint: Option<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::BAD_REQUEST, message, hint)
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, message, None)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let report = match self.cause.as_deref() {
            Some(cause) => ErrorReport::from_error(REPORT_SOURCE, self.status, cause),
            None => ErrorReport::from_message(
                REPORT_SOURCE,
                self.status,
                self.hint.as_deref().unwrap_or(self.message),
            ),
        }
        .with_code(self.code);

        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message.to_string(),
                hint: self.hint,
            },
        };
        let mut response = (self.status, Json(body)).into_response();
        report.attach(&mut response);
        response
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_BODY,
            "Failed decoding",
            Some(rejection.body_text()),
        )
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_PATH,
            "Invalid path parameter",
            Some(rejection.body_text()),
        )
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        let api = match &err {
            RepoError::Duplicate { constraint } => ApiError::new(
                StatusCode::CONFLICT,
                codes::DUPLICATE,
                "Duplicate record",
                Some(constraint.clone()),
            ),
            RepoError::NotFound => ApiError::not_found("resource not found"),
            RepoError::InvalidInput { .. } => ApiError::new(
                StatusCode::BAD_REQUEST,
                codes::INVALID_INPUT,
                "Invalid input",
                None,
            ),
            RepoError::Integrity { .. } => ApiError::new(
                StatusCode::CONFLICT,
                codes::INTEGRITY,
                "Integrity constraint violated",
                None,
            ),
            RepoError::Timeout => ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                codes::DB_TIMEOUT,
                "Database timeout",
                None,
            ),
            RepoError::Persistence(_) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::REPO,
                "Persistence error",
                None,
            ),
        };
        api.with_cause(err)
    }
}

impl From<BookServiceError> for ApiError {
    fn from(err: BookServiceError) -> Self {
        match err {
            BookServiceError::Validation(message) => ApiError::new(
                StatusCode::BAD_REQUEST,
                codes::VALIDATION,
                "Invalid book",
                Some(message),
            ),
            BookServiceError::Repo(repo) => repo.into(),
        }
    }
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::UsernameTaken => ApiError::new(
                StatusCode::BAD_REQUEST,
                codes::USERNAME_TAKEN,
                "Username is taken",
                None,
            ),
            UserServiceError::EmailTaken => ApiError::new(
                StatusCode::BAD_REQUEST,
                codes::EMAIL_TAKEN,
                "Email is taken",
                None,
            ),
            UserServiceError::InvalidEmail => ApiError::new(
                StatusCode::BAD_REQUEST,
                codes::INVALID_EMAIL,
                "Invalid email",
                None,
            ),
            missing @ UserServiceError::MissingField(_) => ApiError::new(
                StatusCode::BAD_REQUEST,
                codes::VALIDATION,
                "Invalid user",
                Some(missing.to_string()),
            ),
            UserServiceError::Repo(repo) => repo.into(),
        }
    }
}
