//! Users Domain
//!
//! Accounts that can sign in to the API: sign up, profile CRUD, avatar
//! upload, email + password sessions and the forgot/reset password flow.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /users, /sessions, /password
//! └──────┬──────┘
//!        │
//! ┌──────▼──────────────────────────────┐
//! │ UserService / SessionService /       │
//! │ PasswordService                      │  ← Hashing, uniqueness, tokens
//! └──────┬──────────────────────────────┘
//!        │
//! ┌──────▼──────┐   ┌───────────────┐
//! │ Repository  │   │ AvatarStorage │  ← Database rows / files on disk
//! └──────┬──────┘   └───────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_users::{handlers, AvatarStorage, PgUserRepository, UserService};
//!
//! let avatars = AvatarStorage::new(upload_config);
//! let service = UserService::new(PgUserRepository::new(db), avatars);
//! let router = handlers::router(service, jwt_auth);
//! ```

pub mod avatar;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod hashing;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod session;

pub use avatar::AvatarStorage;
pub use error::{UserError, UserResult};
pub use handlers::{ApiDoc, PasswordApiDoc, SessionsApiDoc};
pub use models::{
    CreateSession, CreateUser, ForgotPassword, ResetPassword, SessionResponse, UpdateUser, User,
    UserResponse, UserToken,
};
pub use password::PasswordService;
pub use postgres::{PgUserRepository, PgUserTokenRepository};
pub use repository::{
    InMemoryUserRepository, InMemoryUserTokenRepository, UserRepository, UserTokenRepository,
};
pub use service::UserService;
pub use session::SessionService;
