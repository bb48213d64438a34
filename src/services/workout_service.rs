use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::models::UserRole;
use crate::errors::{is_unique_violation, ApiError};
use crate::models::validation::{validate_workout_description, validate_workout_name};
use crate::models::workout::{
    AssignedWorkout, AssignmentResponse, AssignmentStatus, ClientAssignment, ClientSummary,
    CreateWorkoutRequest, TrainerSummary, WorkoutListItem, WorkoutResponse, WorkoutSummary,
};

#[derive(Debug, Clone, sqlx::FromRow)]
struct WorkoutRef {
    id: Uuid,
    trainer_id: Uuid,
    name: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct ClientRef {
    id: Uuid,
    email: String,
    role: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct AssignmentRow {
    id: Uuid,
    assigned_date: DateTime<Utc>,
    status: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct ClientAssignmentRow {
    id: Uuid,
    assigned_date: DateTime<Utc>,
    status: String,
    workout_id: Uuid,
    workout_name: String,
    workout_description: String,
    trainer_id: Uuid,
    trainer_email: String,
}

fn assignment_status(raw: &str) -> Result<AssignmentStatus, ApiError> {
    AssignmentStatus::from_str(raw).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!("unknown assignment status {:?}", raw))
    })
}

#[derive(Debug, Clone)]
pub struct WorkoutService {
    db: PgPool,
}

impl WorkoutService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a workout owned by the given trainer
    pub async fn create_workout(
        &self,
        trainer_id: Uuid,
        request: CreateWorkoutRequest,
    ) -> Result<WorkoutResponse, ApiError> {
        validate_workout_name(&request.name)?;
        validate_workout_description(&request.description)?;

        let now = Utc::now();

        let workout = sqlx::query_as::<_, WorkoutResponse>(
            "INSERT INTO workouts (id, name, description, trainer_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING id, name, description, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&request.description)
        .bind(trainer_id)
        .bind(now)
        .fetch_one(&self.db)
        .await
        .map_err(ApiError::Database)?;

        Ok(workout)
    }

    /// All workouts owned by a trainer, newest first, with assignment counts
    pub async fn list_for_trainer(
        &self,
        trainer_id: Uuid,
    ) -> Result<Vec<WorkoutListItem>, ApiError> {
        let workouts = sqlx::query_as::<_, WorkoutListItem>(
            "SELECT w.id, w.name, w.description, w.created_at, w.updated_at,
                    COUNT(a.id) AS assignment_count
             FROM workouts w
             LEFT JOIN workout_assignments a ON a.workout_id = w.id
             WHERE w.trainer_id = $1
             GROUP BY w.id
             ORDER BY w.created_at DESC",
        )
        .bind(trainer_id)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::Database)?;

        Ok(workouts)
    }

    /// All assignments for a client, newest-assigned first
    pub async fn list_for_client(&self, client_id: Uuid) -> Result<Vec<ClientAssignment>, ApiError> {
        let rows = sqlx::query_as::<_, ClientAssignmentRow>(
            "SELECT a.id, a.assigned_date, a.status,
                    w.id AS workout_id, w.name AS workout_name,
                    w.description AS workout_description,
                    t.id AS trainer_id, t.email AS trainer_email
             FROM workout_assignments a
             JOIN workouts w ON w.id = a.workout_id
             JOIN users t ON t.id = w.trainer_id
             WHERE a.client_id = $1
             ORDER BY a.assigned_date DESC",
        )
        .bind(client_id)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::Database)?;

        rows.into_iter()
            .map(|row| {
                let status = assignment_status(&row.status)?;
                Ok(ClientAssignment {
                    id: row.id,
                    assigned_date: row.assigned_date,
                    status,
                    workout: AssignedWorkout {
                        id: row.workout_id,
                        name: row.workout_name,
                        description: row.workout_description,
                        trainer: TrainerSummary {
                            id: row.trainer_id,
                            email: row.trainer_email,
                        },
                    },
                })
            })
            .collect()
    }

    /// Assign a workout to a client
    pub async fn assign(
        &self,
        trainer_id: Uuid,
        workout_id: Uuid,
        client_id: Uuid,
    ) -> Result<AssignmentResponse, ApiError> {
        let workout =
            sqlx::query_as::<_, WorkoutRef>("SELECT id, trainer_id, name FROM workouts WHERE id = $1")
                .bind(workout_id)
                .fetch_optional(&self.db)
                .await
                .map_err(ApiError::Database)?
                .ok_or(ApiError::WorkoutNotFound)?;

        // Ownership is checked before the client lookup; a non-owning
        // trainer never learns whether the client exists.
        if workout.trainer_id != trainer_id {
            return Err(ApiError::NotWorkoutOwner);
        }

        let client =
            sqlx::query_as::<_, ClientRef>("SELECT id, email, role FROM users WHERE id = $1")
                .bind(client_id)
                .fetch_optional(&self.db)
                .await
                .map_err(ApiError::Database)?
                .ok_or(ApiError::ClientNotFound)?;

        if client.role != UserRole::Client.as_str() {
            return Err(ApiError::NotAClient);
        }

        // Duplicate assignments are fenced by the (workout_id, client_id)
        // unique constraint, not by any in-process check.
        let assignment = sqlx::query_as::<_, AssignmentRow>(
            "INSERT INTO workout_assignments (id, workout_id, client_id, assigned_date, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, assigned_date, status",
        )
        .bind(Uuid::new_v4())
        .bind(workout.id)
        .bind(client.id)
        .bind(Utc::now())
        .bind(AssignmentStatus::Assigned.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                ApiError::AlreadyAssigned
            } else {
                ApiError::Database(err)
            }
        })?;

        let status = assignment_status(&assignment.status)?;

        Ok(AssignmentResponse {
            id: assignment.id,
            assigned_date: assignment.assigned_date,
            status,
            workout: WorkoutSummary {
                id: workout.id,
                name: workout.name,
            },
            client: ClientSummary {
                id: client.id,
                email: client.email,
            },
        })
    }
}
