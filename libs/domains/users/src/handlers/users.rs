use axum::{
    Json, Router,
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use axum_helpers::{
    AppError, AuthUser, JwtAuth, UuidPath, ValidatedJson,
    auth::{INVALID_TOKEN, MISSING_TOKEN},
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    jwt_auth_middleware, optional_jwt_auth_middleware,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::entity::user;
use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const AVATAR_FIELD: &str = "avatar";
pub const AVATAR_REQUIRED: &str = "Avatar file is required";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        create_user,
        get_user,
        update_user,
        delete_user,
        update_avatar,
    ),
    components(
        schemas(UserResponse, CreateUser, UpdateUser, AvatarUpload),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = user::Model::TAG, description = "User accounts and avatars")
    )
)]
pub struct ApiDoc;

/// Multipart body of `PATCH /users/avatar`
#[derive(ToSchema)]
pub struct AvatarUpload {
    #[schema(value_type = String, format = Binary)]
    pub avatar: Vec<u8>,
}

/// Users router.
///
/// Sign up (`POST /`) is public, `PATCH /avatar` resolves the caller itself
/// so it can reject a missing file before a missing token, every other
/// route requires a valid JWT.
pub fn router<R: UserRepository + 'static>(service: UserService<R>, auth: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    let protected = Router::new()
        .route("/", get(list_users))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(
            auth.clone(),
            jwt_auth_middleware,
        ));

    let avatar = Router::new()
        .route("/avatar", patch(update_avatar))
        .route_layer(middleware::from_fn_with_state(
            auth,
            optional_jwt_auth_middleware,
        ));

    Router::new()
        .route("/", post(create_user))
        .merge(protected)
        .merge(avatar)
        .with_state(shared_service)
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = user::Model::TAG,
    responses(
        (status = 200, description = "All users, oldest first", body = Vec<UserResponse>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Sign up
#[utoipa::path(
    post,
    path = "",
    tag = user::Model::TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = user::Model::TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user(id).await?;
    Ok(Json(user))
}

/// Replace a user's name, email and password
#[utoipa::path(
    put,
    path = "/{id}",
    tag = user::Model::TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<UserResponse>> {
    let user = service.update_user(id, input).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = user::Model::TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<impl IntoResponse> {
    service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Upload the caller's avatar
#[utoipa::path(
    patch,
    path = "/avatar",
    tag = user::Model::TAG,
    request_body(content = AvatarUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Avatar updated", body = UserResponse),
        (status = 400, description = "No avatar file in the request",
            example = json!({"error": AVATAR_REQUIRED})),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_avatar<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    auth_user: Option<AuthUser>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let upload = match multipart {
        Ok(multipart) => read_avatar(multipart).await?,
        Err(rejection) => {
            tracing::debug!("Avatar request is not multipart: {}", rejection);
            None
        }
    };

    let Some((original_name, bytes)) = upload else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": AVATAR_REQUIRED })),
        )
            .into_response());
    };

    let Some(AuthUser(user_id)) = auth_user else {
        let message = if headers.contains_key(AUTHORIZATION) {
            INVALID_TOKEN
        } else {
            MISSING_TOKEN
        };
        return Err(AppError::Unauthorized(message.to_string()));
    };

    let user = service
        .update_avatar(user_id, &original_name, &bytes)
        .await?;

    Ok(Json(user).into_response())
}

/// First `avatar` part that carries a file name. Browsers send an empty
/// file part with an empty name when nothing was selected.
async fn read_avatar(mut multipart: Multipart) -> UserResult<Option<(String, Bytes)>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }

        let Some(file_name) = field.file_name().filter(|n| !n.is_empty()).map(str::to_owned)
        else {
            continue;
        };

        let bytes = field.bytes().await?;
        return Ok(Some((file_name, bytes)));
    }

    Ok(None)
}
