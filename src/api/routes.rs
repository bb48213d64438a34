use axum::{routing::get, Router};
use chrono::Duration;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use super::auth::auth_routes;
use super::health::{health_check, root};
use super::workouts::{client_routes, workout_routes};
use crate::auth::{cors_layer, security_headers_layer, AuthService, JwtService};
use crate::config::AppConfig;
use crate::services::WorkoutService;

pub fn create_routes(db: PgPool, config: &AppConfig) -> Router {
    let jwt_service = JwtService::new(
        &config.jwt_secret,
        Duration::seconds(config.token_lifetime_secs),
    );
    let auth_service = AuthService::new(db.clone(), jwt_service);
    let workout_service = WorkoutService::new(db);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes(auth_service.clone()))
        .nest(
            "/api/workouts",
            workout_routes(workout_service.clone(), auth_service.clone()),
        )
        .nest(
            "/api/my-workouts",
            client_routes(workout_service, auth_service),
        )
        .layer(TraceLayer::new_for_http())
        .layer(security_headers_layer())
        .layer(cors_layer())
}
