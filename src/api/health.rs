use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Workout Assignment API" }))
}

pub async fn health_check() -> Result<Json<Value>, StatusCode> {
    Ok(Json(json!({
        "status": "healthy",
        "service": "workout-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
