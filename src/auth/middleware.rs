use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use futures::future::BoxFuture;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::jwt::extract_bearer_token;
use crate::auth::models::{UserRole, UserSession};
use crate::auth::service::AuthService;
use crate::errors::ApiError;

/// Pull the token from the `x-access-token` header, falling back to
/// `Authorization: Bearer <token>`.
fn extract_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    if let Some(token) = headers.get("x-access-token").and_then(|h| h.to_str().ok()) {
        if !token.is_empty() {
            return Ok(token);
        }
    }

    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::MissingToken)?;

    extract_bearer_token(auth_header)
}

/// JWT authentication middleware. Verifies the token, re-checks that the
/// subject still exists, and attaches the session to the request.
pub async fn jwt_auth_middleware(
    State(auth_service): State<AuthService>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers())?;

    let session = auth_service.validate_session(token).await?;

    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

/// Role-based authorization middleware. Must run inside the
/// authentication layer.
pub fn require_role(
    required_role: UserRole,
) -> impl Fn(Request, Next) -> BoxFuture<'static, Result<Response, ApiError>> + Clone {
    move |request: Request, next: Next| {
        let required_role = required_role.clone();
        Box::pin(async move {
            let session = request
                .extensions()
                .get::<UserSession>()
                .ok_or(ApiError::AuthenticationRequired)?;

            if session.role != required_role {
                return Err(ApiError::InsufficientRole(
                    required_role.as_str().to_string(),
                ));
            }

            Ok(next.run(request).await)
        })
    }
}

/// Authorization middleware accepting any of the given roles
pub fn require_any_role(
    allowed_roles: &'static [UserRole],
) -> impl Fn(Request, Next) -> BoxFuture<'static, Result<Response, ApiError>> + Clone {
    move |request: Request, next: Next| {
        Box::pin(async move {
            let session = request
                .extensions()
                .get::<UserSession>()
                .ok_or(ApiError::AuthenticationRequired)?;

            if !allowed_roles.contains(&session.role) {
                let wanted = allowed_roles
                    .iter()
                    .map(UserRole::as_str)
                    .collect::<Vec<_>>()
                    .join(" or ");
                return Err(ApiError::InsufficientRole(wanted));
            }

            Ok(next.run(request).await)
        })
    }
}

/// CORS configuration
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Security headers middleware
pub fn security_headers_layer(
) -> tower_http::set_header::SetResponseHeaderLayer<axum::http::HeaderValue> {
    tower_http::set_header::SetResponseHeaderLayer::overriding(
        axum::http::header::HeaderName::from_static("x-content-type-options"),
        axum::http::HeaderValue::from_static("nosniff"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::{ServiceBuilder, ServiceExt};
    use uuid::Uuid;

    async fn ok_handler() -> &'static str {
        "ok"
    }

    fn session(role: UserRole) -> UserSession {
        UserSession {
            user_id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            role,
        }
    }

    /// Test stand-in for the authentication layer
    fn inject_session(
        session: UserSession,
    ) -> impl Fn(Request, Next) -> BoxFuture<'static, Result<Response, ApiError>> + Clone {
        move |mut request: Request, next: Next| {
            let session = session.clone();
            Box::pin(async move {
                request.extensions_mut().insert(session);
                Ok(next.run(request).await)
            })
        }
    }

    fn gated_app<F>(gate: F, attached: Option<UserSession>) -> Router
    where
        F: Fn(Request, Next) -> BoxFuture<'static, Result<Response, ApiError>>
            + Clone
            + Send
            + Sync
            + 'static,
    {
        let router = Router::new().route("/", get(ok_handler));
        match attached {
            Some(session) => router.layer(
                ServiceBuilder::new()
                    .layer(middleware::from_fn(inject_session(session)))
                    .layer(middleware::from_fn(gate)),
            ),
            None => router.layer(middleware::from_fn(gate)),
        }
    }

    async fn status_for(app: Router) -> StatusCode {
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn test_matching_role_passes() {
        let app = gated_app(
            require_role(UserRole::Trainer),
            Some(session(UserRole::Trainer)),
        );
        assert_eq!(status_for(app).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wrong_role_is_forbidden() {
        let app = gated_app(
            require_role(UserRole::Trainer),
            Some(session(UserRole::Client)),
        );
        assert_eq!(status_for(app).await, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_session_is_unauthorized() {
        let app = gated_app(require_role(UserRole::Client), None);
        assert_eq!(status_for(app).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_any_role_gate() {
        const BOTH: &[UserRole] = &[UserRole::Trainer, UserRole::Client];

        let app = gated_app(require_any_role(BOTH), Some(session(UserRole::Client)));
        assert_eq!(status_for(app).await, StatusCode::OK);

        let app = gated_app(require_any_role(BOTH), Some(session(UserRole::Trainer)));
        assert_eq!(status_for(app).await, StatusCode::OK);

        const TRAINER_ONLY: &[UserRole] = &[UserRole::Trainer];
        let app = gated_app(
            require_any_role(TRAINER_ONLY),
            Some(session(UserRole::Client)),
        );
        assert_eq!(status_for(app).await, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_token_extraction_precedence() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            extract_token(&headers),
            Err(ApiError::MissingToken)
        ));

        headers.insert(AUTHORIZATION, "Bearer from-bearer".parse().unwrap());
        assert_eq!(extract_token(&headers).unwrap(), "from-bearer");

        headers.insert("x-access-token", "from-custom-header".parse().unwrap());
        assert_eq!(extract_token(&headers).unwrap(), "from-custom-header");

        let mut malformed = HeaderMap::new();
        malformed.insert(AUTHORIZATION, "no-bearer-prefix".parse().unwrap());
        assert!(matches!(
            extract_token(&malformed),
            Err(ApiError::InvalidAuthHeaderFormat)
        ));
    }
}
