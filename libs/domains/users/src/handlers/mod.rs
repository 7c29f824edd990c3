//! HTTP handlers for the users domain.
//!
//! Three routers are exposed so the application can mount them at
//! `/users`, `/sessions` and `/password`.

pub mod password;
pub mod sessions;
pub mod users;

pub use password::PasswordApiDoc;
pub use sessions::SessionsApiDoc;
pub use users::{ApiDoc, router};
