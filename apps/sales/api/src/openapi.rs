use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Alpha Tower Sales System",
        version = "0.1.0",
        description = "Products catalogue and user accounts"
    ),
    modifiers(&BearerAuth),
    nest(
        (path = "/products", api = domain_products::ApiDoc),
        (path = "/users", api = domain_users::ApiDoc),
        (path = "/sessions", api = domain_users::SessionsApiDoc),
        (path = "/password", api = domain_users::PasswordApiDoc)
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme used by the protected routes.
struct BearerAuth;

impl utoipa::Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
