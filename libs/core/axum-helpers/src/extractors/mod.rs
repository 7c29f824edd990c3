//! Extractors whose rejections render as [`AppError`](crate::AppError)
//! bodies instead of axum's plain-text defaults.

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
