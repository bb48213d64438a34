use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Assignment lifecycle states
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Assigned,
    Cancelled,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Assigned => "assigned",
            AssignmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "assigned" => Some(AssignmentStatus::Assigned),
            "cancelled" => Some(AssignmentStatus::Cancelled),
            _ => None,
        }
    }
}

/// Workout request models
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignWorkoutRequest {
    pub client_id: Uuid,
}

/// Created workout projection
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Trainer's workout list entry, with its assignment count
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutListItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub assignment_count: i64,
}

/// Client's view of an assignment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientAssignment {
    pub id: Uuid,
    pub assigned_date: DateTime<Utc>,
    pub status: AssignmentStatus,
    pub workout: AssignedWorkout,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedWorkout {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub trainer: TrainerSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerSummary {
    pub id: Uuid,
    pub email: String,
}

/// Response after assigning a workout
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub assigned_date: DateTime<Utc>,
    pub status: AssignmentStatus,
    pub workout: WorkoutSummary,
    pub client: ClientSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub id: Uuid,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_round_trip() {
        assert_eq!(AssignmentStatus::from_str("assigned"), Some(AssignmentStatus::Assigned));
        assert_eq!(AssignmentStatus::from_str("cancelled"), Some(AssignmentStatus::Cancelled));
        assert_eq!(AssignmentStatus::from_str("done"), None);

        assert_eq!(
            serde_json::to_string(&AssignmentStatus::Assigned).unwrap(),
            "\"assigned\""
        );
    }

    #[test]
    fn test_assign_request_uses_camel_case() {
        let client_id = Uuid::new_v4();
        let body = format!("{{\"clientId\":\"{client_id}\"}}");

        let request: AssignWorkoutRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(request.client_id, client_id);

        assert!(serde_json::from_str::<AssignWorkoutRequest>("{\"clientId\":\"nope\"}").is_err());
    }

    #[test]
    fn test_client_assignment_wire_shape() {
        let assignment = ClientAssignment {
            id: Uuid::new_v4(),
            assigned_date: Utc::now(),
            status: AssignmentStatus::Assigned,
            workout: AssignedWorkout {
                id: Uuid::new_v4(),
                name: "Leg Day".to_string(),
                description: "Squats and lunges".to_string(),
                trainer: TrainerSummary {
                    id: Uuid::new_v4(),
                    email: "trainer@example.com".to_string(),
                },
            },
        };

        let value = serde_json::to_value(&assignment).unwrap();
        assert_eq!(value["status"], "assigned");
        assert!(value["assignedDate"].is_string());
        assert_eq!(value["workout"]["name"], "Leg Day");
        assert_eq!(value["workout"]["trainer"]["email"], "trainer@example.com");
    }
}
