use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceBuilder;
use uuid::Uuid;

use crate::auth::models::{UserRole, UserSession};
use crate::auth::{jwt_auth_middleware, require_role, AuthService};
use crate::errors::ApiError;
use crate::models::workout::{
    AssignWorkoutRequest, AssignmentResponse, ClientAssignment, CreateWorkoutRequest,
    WorkoutListItem, WorkoutResponse,
};
use crate::services::WorkoutService;

/// Trainer-facing workout routes. The authentication layer wraps the role
/// gate so the session is attached before it is checked.
pub fn workout_routes(workout_service: WorkoutService, auth_service: AuthService) -> Router {
    Router::new()
        .route("/", post(create_workout).get(list_workouts))
        .route("/:id/assign", post(assign_workout))
        .route_layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn_with_state(
                    auth_service,
                    jwt_auth_middleware,
                ))
                .layer(middleware::from_fn(require_role(UserRole::Trainer))),
        )
        .with_state(workout_service)
}

/// Client-facing assigned-workout routes
pub fn client_routes(workout_service: WorkoutService, auth_service: AuthService) -> Router {
    Router::new()
        .route("/", get(my_workouts))
        .route_layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn_with_state(
                    auth_service,
                    jwt_auth_middleware,
                ))
                .layer(middleware::from_fn(require_role(UserRole::Client))),
        )
        .with_state(workout_service)
}

/// Create a new workout
#[tracing::instrument(skip(workout_service, request))]
async fn create_workout(
    State(workout_service): State<WorkoutService>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<WorkoutResponse>), ApiError> {
    let workout = workout_service
        .create_workout(session.user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

/// List the logged-in trainer's workouts
#[tracing::instrument(skip(workout_service))]
async fn list_workouts(
    State(workout_service): State<WorkoutService>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Vec<WorkoutListItem>>, ApiError> {
    let workouts = workout_service.list_for_trainer(session.user_id).await?;
    Ok(Json(workouts))
}

/// Assign a workout to a client
#[tracing::instrument(skip(workout_service, request))]
async fn assign_workout(
    State(workout_service): State<WorkoutService>,
    Extension(session): Extension<UserSession>,
    Path(workout_id): Path<Uuid>,
    Json(request): Json<AssignWorkoutRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), ApiError> {
    let assignment = workout_service
        .assign(session.user_id, workout_id, request.client_id)
        .await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// List the logged-in client's assigned workouts
#[tracing::instrument(skip(workout_service))]
async fn my_workouts(
    State(workout_service): State<WorkoutService>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Vec<ClientAssignment>>, ApiError> {
    let assignments = workout_service.list_for_client(session.user_id).await?;
    Ok(Json(assignments))
}
