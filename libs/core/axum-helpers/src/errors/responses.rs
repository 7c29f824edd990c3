//! `ToResponse` types for `#[utoipa::path]` annotations, one per error
//! status the handlers can produce.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

/// Declares a documented error response whose example body is
/// `{"status": "error", "message": <message>}`.
macro_rules! error_response {
    ($(#[$doc:meta])* $name:ident, $description:tt, $message:tt) => {
        $(#[$doc])*
        #[derive(ToResponse)]
        #[response(
            description = $description,
            content_type = "application/json",
            example = json!({ "status": "error", "message": $message })
        )]
        pub struct $name(pub ErrorResponse);
    };
}

error_response!(
    /// 400 for a path segment that is not a UUID.
    BadRequestUuidResponse,
    "Malformed id",
    "Invalid UUID: not-a-uuid"
);
error_response!(UnauthorizedResponse, "Missing or invalid bearer token", "JWT Token is missing.");
error_response!(NotFoundResponse, "No such record", "Product not found.");
error_response!(
    ConflictResponse,
    "Unique field already taken",
    "There is already one product with this name"
);
error_response!(
    /// Details of the failure are logged, never returned.
    InternalServerErrorResponse,
    "Unexpected server failure",
    "Internal server error"
);

/// 400 with per-field validator output under `details`.
#[derive(ToResponse)]
#[response(
    description = "Request body failed validation",
    content_type = "application/json",
    example = json!({
        "status": "error",
        "message": "Validation failed",
        "details": {
            "email": [{ "code": "email", "message": null, "params": { "value": "ana@" } }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);
