pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// { "status": "error", "message": "Product not found." }
/// ```
///
/// `details` is only present for field validation failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `"error"`
    pub status: String,
    /// Human-readable error message
    pub message: String,
    /// Field-level validation errors, keyed by field name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// Error type every handler ultimately returns.
///
/// Domain errors convert into it; `into_response` is the one place that
/// turns a failure into a `{status, message}` body.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("database: {0}")]
    Database(#[from] DbErr),

    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON body: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("validation: {0}")]
    ValidationError(#[from] ValidationErrors),

    /// A path segment that should be a UUID; carries the raw segment.
    #[error("invalid uuid: {0}")]
    InvalidUuid(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
            AppError::JsonExtractorRejection(_) => ErrorCode::JsonExtraction,
            AppError::Multipart(_) => ErrorCode::MultipartError,
            AppError::ValidationError(_) => ErrorCode::ValidationError,
            AppError::InvalidUuid(_) => ErrorCode::InvalidUuid,
            AppError::BadRequest(_) => ErrorCode::BadRequest,
            AppError::Unauthorized(_) => ErrorCode::Unauthorized,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Conflict(_) => ErrorCode::Conflict,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            code if code.is_server_error() => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// What the client is told. Server faults collapse to a generic line.
    fn public_message(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Io(_) | AppError::InternalServerError(_) => {
                "Internal server error".to_string()
            }
            AppError::JsonExtractorRejection(e) => e.body_text(),
            AppError::Multipart(e) => e.body_text(),
            AppError::ValidationError(_) => "Validation failed".to_string(),
            AppError::InvalidUuid(raw) => format!("Invalid UUID: {raw}"),
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();

        if code.is_server_error() {
            tracing::error!(error_code = code.code(), error = ?self, "Request failed");
        } else {
            tracing::info!(error_code = code.code(), "Request rejected: {}", self);
        }

        let details = match &self {
            AppError::ValidationError(errors) => Some(validation_details(errors)),
            _ => None,
        };
        let body = ErrorResponse {
            details,
            ..ErrorResponse::new(self.public_message())
        };

        (self.status_code(), [("x-error-code", code.as_str())], Json(body)).into_response()
    }
}

/// Flatten validator output into `{ field: [{code, message, params}] }`.
pub fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let entries = errors
                .iter()
                .map(|err| json!({ "code": err.code, "message": err.message, "params": err.params }))
                .collect::<Vec<_>>();
            (field.to_string(), json!(entries))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_domain_errors_keep_their_message() {
        let response = AppError::Conflict("There is already one product with this name".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "There is already one product with this name");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_internal_errors_do_not_leak_detail() {
        let response =
            AppError::InternalServerError("connection refused on 10.0.0.3".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_database_errors_are_generic_500() {
        let response = AppError::from(DbErr::Custom("relation does not exist".into()))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get("x-error-code").unwrap(),
            "DATABASE_ERROR"
        );

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_validation_errors_carry_field_details() {
        use validator::Validate;

        #[derive(Validate)]
        struct Input {
            #[validate(length(min = 1))]
            name: String,
        }

        let errors = Input { name: String::new() }.validate().unwrap_err();
        let response = AppError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["details"]["name"][0]["code"], "length");
    }

    #[tokio::test]
    async fn test_invalid_uuid_echoes_the_segment() {
        let response = AppError::InvalidUuid("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers().get("x-error-code").unwrap(), "INVALID_UUID");

        let body = body_json(response).await;
        assert_eq!(body["message"], "Invalid UUID: nope");
    }
}
