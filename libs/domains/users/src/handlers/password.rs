use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{ForgotPassword, ResetPassword};
use crate::password::PasswordService;
use crate::repository::{UserRepository, UserTokenRepository};

pub const TAG: &str = "password";

#[derive(OpenApi)]
#[openapi(
    paths(forgot_password, reset_password),
    components(
        schemas(ForgotPassword, ResetPassword),
        responses(
            BadRequestValidationResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Password recovery")
    )
)]
pub struct PasswordApiDoc;

pub fn router<R, T>(service: PasswordService<R, T>) -> Router
where
    R: UserRepository + 'static,
    T: UserTokenRepository + 'static,
{
    Router::new()
        .route("/forgot", post(forgot_password))
        .route("/reset", post(reset_password))
        .with_state(Arc::new(service))
}

/// Request a password reset token
#[utoipa::path(
    post,
    path = "/forgot",
    tag = TAG,
    request_body = ForgotPassword,
    responses(
        (status = 204, description = "Reset token issued"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn forgot_password<R: UserRepository, T: UserTokenRepository>(
    State(service): State<Arc<PasswordService<R, T>>>,
    ValidatedJson(input): ValidatedJson<ForgotPassword>,
) -> UserResult<impl IntoResponse> {
    service.forgot_password(input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Set a new password using a reset token
#[utoipa::path(
    post,
    path = "/reset",
    tag = TAG,
    request_body = ResetPassword,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Validation failed or token expired"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn reset_password<R: UserRepository, T: UserTokenRepository>(
    State(service): State<Arc<PasswordService<R, T>>>,
    ValidatedJson(input): ValidatedJson<ResetPassword>,
) -> UserResult<impl IntoResponse> {
    service.reset_password(input).await?;
    Ok(StatusCode::NO_CONTENT)
}
