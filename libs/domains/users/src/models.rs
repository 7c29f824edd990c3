use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// How long a password reset token stays usable.
pub const RESET_TOKEN_TTL: Duration = Duration::hours(2);

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Unique across all users
    pub email: String,
    /// Argon2 password hash (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Stored avatar filename under the upload directory
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build an unpersisted user; the password must already be hashed.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name,
            email,
            password_hash,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite name, email and password hash.
    pub fn apply_update(&mut self, name: String, email: String, password_hash: String) {
        self.name = name;
        self.email = email;
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}

/// User as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Stored avatar filename
    pub avatar: Option<String>,
    /// Public URL of the avatar, served under `/files`
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn new(user: User, avatar_url: Option<String>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            avatar_url,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// DTO for replacing a user's name, email and password
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// DTO for signing in
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSession {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response after a successful sign in
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub user: UserResponse,
    /// Bearer token for the `Authorization` header
    pub token: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ForgotPassword {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ResetPassword {
    pub token: Uuid,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(must_match(other = "password"))]
    pub password_confirmation: String,
}

/// Password reset token. It stays valid until it is two hours old, even after a successful reset.
#[derive(Debug, Clone, PartialEq)]
pub struct UserToken {
    pub id: Uuid,
    pub token: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl UserToken {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            token: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.created_at + RESET_TOKEN_TTL
    }
}
