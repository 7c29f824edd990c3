use super::{INVALID_TOKEN, MISSING_TOKEN, jwt::JwtAuth};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// Extract JWT from Authorization header or cookie
fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.trim().to_string()))
        .or_else(|| {
            headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        let (name, value) = cookie.trim().split_once('=')?;
                        (name == "access_token").then(|| value.to_string())
                    })
                })
        })
}

/// JWT authentication middleware
///
/// Validates the token from the `Authorization: Bearer` header (or the
/// `access_token` cookie) and inserts [`JwtClaims`](super::JwtClaims) into
/// the request extensions. Missing or invalid tokens answer 401.
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = extract_token_from_request(&headers) else {
        tracing::debug!("No JWT found in Authorization header or cookie");
        return Err(AppError::Unauthorized(MISSING_TOKEN.to_string()));
    };

    let claims = auth.verify_token(&token).map_err(|e| {
        tracing::debug!("JWT verification failed: {}", e);
        AppError::Unauthorized(INVALID_TOKEN.to_string())
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Optional JWT authentication middleware
///
/// Like [`jwt_auth_middleware`] but never rejects; claims are only inserted
/// when a valid token is present. Handlers decide what anonymous access means.
pub async fn optional_jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_token_from_request(&headers) {
        match auth.verify_token(&token) {
            Ok(claims) => {
                request.extensions_mut().insert(claims);
            }
            Err(e) => tracing::debug!("Ignoring invalid JWT: {}", e),
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthUser, JwtConfig};
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("this-is-a-valid-secret-with-32-chars!").unwrap())
    }

    async fn whoami(AuthUser(id): AuthUser) -> String {
        id.to_string()
    }

    fn app(auth: JwtAuth) -> Router {
        Router::new()
            .route("/me", get(whoami))
            .route_layer(from_fn_with_state(auth, jwt_auth_middleware))
    }

    async fn call(app: Router, header: Option<String>) -> (StatusCode, String) {
        let mut builder = Request::builder().uri("/me");
        if let Some(value) = header {
            builder = builder.header("authorization", value);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_extract_token_prefers_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer abc".parse().unwrap());
        headers.insert("cookie", "access_token=xyz".parse().unwrap());
        assert_eq!(extract_token_from_request(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn test_extract_token_falls_back_to_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", "theme=dark; access_token=xyz".parse().unwrap());
        assert_eq!(extract_token_from_request(&headers).as_deref(), Some("xyz"));
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let (status, body) = call(app(auth()), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains(MISSING_TOKEN));
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized() {
        let (status, body) = call(app(auth()), Some("Bearer garbage".into())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains(INVALID_TOKEN));
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let auth = auth();
        let user_id = Uuid::new_v4();
        let token = auth.create_token(user_id).unwrap();

        let (status, body) = call(app(auth), Some(format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, user_id.to_string());
    }
}
