//! Sea-ORM entities for the `users` and `user_tokens` tables

pub mod user;
pub mod user_token;
