use axum::{Json, Router, middleware, routing::get};
use axum_helpers::{JwtAuth, jwt_auth_middleware};
use domain_products::{
    InMemoryProductRepository, PgProductRepository, ProductRepository, ProductService,
};
use domain_users::{
    AvatarStorage, InMemoryUserRepository, InMemoryUserTokenRepository, PasswordService,
    PgUserRepository, PgUserTokenRepository, SessionService, UserRepository, UserService,
    UserTokenRepository, handlers as users,
};
use tower_http::services::ServeDir;

use crate::state::AppState;

pub mod health;

pub const APP_TITLE: &str = "Alpha Tower Sales System";

/// All application routes.
///
/// Returns a stateless Router; every domain router already carries its own
/// state. Repositories are PostgreSQL-backed when a database is configured
/// and in-memory otherwise.
pub fn routes(state: &AppState) -> Router {
    let avatars = AvatarStorage::new(state.config.upload.clone());
    let files = ServeDir::new(avatars.directory());

    let domains = match &state.db {
        Some(db) => domain_routes(
            &state.jwt_auth,
            PgProductRepository::new(db.clone()),
            PgUserRepository::new(db.clone()),
            PgUserTokenRepository::new(db.clone()),
            avatars,
        ),
        None => {
            tracing::warn!("DATABASE_URL not set, data is kept in memory only");
            domain_routes(
                &state.jwt_auth,
                InMemoryProductRepository::new(),
                InMemoryUserRepository::new(),
                InMemoryUserTokenRepository::new(),
                avatars,
            )
        }
    };

    Router::new()
        .route("/", get(home))
        .merge(domains)
        .nest_service("/files", files)
}

fn domain_routes<P, U, T>(
    auth: &JwtAuth,
    products: P,
    users: U,
    tokens: T,
    avatars: AvatarStorage,
) -> Router
where
    P: ProductRepository + 'static,
    U: UserRepository + Clone + 'static,
    T: UserTokenRepository + 'static,
{
    let products = domain_products::handlers::router(ProductService::new(products)).route_layer(
        middleware::from_fn_with_state(auth.clone(), jwt_auth_middleware),
    );

    Router::new()
        .nest("/products", products)
        .nest(
            "/users",
            users::router(UserService::new(users.clone(), avatars.clone()), auth.clone()),
        )
        .nest(
            "/sessions",
            users::sessions::router(SessionService::new(users.clone(), auth.clone(), avatars)),
        )
        .nest(
            "/password",
            users::password::router(PasswordService::new(users, tokens)),
        )
}

async fn home() -> Json<&'static str> {
    Json(APP_TITLE)
}

/// `/ready` with the state it needs applied, ready to merge into the
/// stateless app router.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
