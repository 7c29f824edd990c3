//! Stable identifiers for error categories.
//!
//! Clients only ever see `{status, message}` plus the `x-error-code`
//! header; the numeric code goes to the logs as `error_code`.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidUuid,
    JsonExtraction,
    MultipartError,
    BadRequest,
    Unauthorized,
    NotFound,
    Conflict,
    InternalError,
    DatabaseError,
    IoError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        self.describe().0
    }

    /// 1xxx rejected requests, 2xxx database, 4xxx filesystem, 5xxx other server faults.
    pub fn code(self) -> i32 {
        self.describe().1
    }

    /// Server-side failures; their details never reach the client.
    pub fn is_server_error(self) -> bool {
        self.code() >= 2000
    }

    fn describe(self) -> (&'static str, i32) {
        match self {
            Self::ValidationError => ("VALIDATION_ERROR", 1001),
            Self::InvalidUuid => ("INVALID_UUID", 1002),
            Self::JsonExtraction => ("JSON_EXTRACTION", 1003),
            Self::MultipartError => ("MULTIPART_ERROR", 1004),
            Self::BadRequest => ("BAD_REQUEST", 1005),
            Self::Unauthorized => ("UNAUTHORIZED", 1006),
            Self::NotFound => ("NOT_FOUND", 1007),
            Self::Conflict => ("CONFLICT", 1008),
            Self::DatabaseError => ("DATABASE_ERROR", 2001),
            Self::IoError => ("IO_ERROR", 4001),
            Self::InternalError => ("INTERNAL_ERROR", 5001),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
