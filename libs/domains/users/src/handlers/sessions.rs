use axum::{Json, Router, extract::State, routing::post};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateSession, SessionResponse};
use crate::repository::UserRepository;
use crate::session::SessionService;

pub const TAG: &str = "sessions";

#[derive(OpenApi)]
#[openapi(
    paths(create_session),
    components(
        schemas(CreateSession, SessionResponse),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Sign in")
    )
)]
pub struct SessionsApiDoc;

pub fn router<R: UserRepository + 'static>(service: SessionService<R>) -> Router {
    Router::new()
        .route("/", post(create_session))
        .with_state(Arc::new(service))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateSession,
    responses(
        (status = 200, description = "Signed in", body = SessionResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_session<R: UserRepository>(
    State(service): State<Arc<SessionService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateSession>,
) -> UserResult<Json<SessionResponse>> {
    let session = service.create_session(input).await?;
    Ok(Json(session))
}
