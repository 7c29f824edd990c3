use axum::extract::multipart::MultipartError;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("No user with email '{0}'")]
    UnknownEmail(String),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User token does not exist")]
    TokenNotFound,

    #[error("User token expired")]
    TokenExpired,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Upload(#[from] MultipartError),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Avatar storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Token signing error: {0}")]
    Token(String),

    #[error(transparent)]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::UnknownEmail(_) => {
                AppError::NotFound("User not found.".to_string())
            }
            UserError::DuplicateEmail(_) => {
                AppError::Conflict("Email address already used.".to_string())
            }
            UserError::InvalidCredentials => {
                AppError::Unauthorized("Incorrect email/password combination.".to_string())
            }
            UserError::TokenNotFound => {
                AppError::NotFound("User token does not exist.".to_string())
            }
            UserError::TokenExpired => AppError::BadRequest("Token expired.".to_string()),
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::Upload(e) => AppError::Multipart(e),
            UserError::Storage(e) => AppError::Io(e),
            UserError::Database(e) => AppError::Database(e),
            UserError::PasswordHash(msg) | UserError::Token(msg) | UserError::Internal(msg) => {
                AppError::InternalServerError(msg)
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<validator::ValidationErrors> for UserError {
    fn from(err: validator::ValidationErrors) -> Self {
        UserError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (UserError::NotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (
                UserError::DuplicateEmail("a@b.c".to_string()),
                StatusCode::CONFLICT,
            ),
            (UserError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (UserError::TokenNotFound, StatusCode::NOT_FOUND),
            (UserError::TokenExpired, StatusCode::BAD_REQUEST),
            (
                UserError::PasswordHash("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let app_error: AppError = err.into();
            assert_eq!(app_error.status_code(), status);
        }
    }
}
