use crate::auth::models::UserRole;
use crate::errors::ApiError;

fn invalid(field: &'static str, message: impl Into<String>) -> ApiError {
    ApiError::Validation {
        field,
        message: message.into(),
    }
}

/// Email validation
pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.is_empty() {
        return Err(invalid("email", "Email cannot be empty"));
    }

    if !email.contains('@') || !email.contains('.') {
        return Err(invalid("email", "Invalid email format"));
    }

    if email.len() > 255 {
        return Err(invalid("email", "Email cannot be longer than 255 characters"));
    }

    Ok(())
}

/// Password validation
pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < 8 {
        return Err(invalid(
            "password",
            "Password must be at least 8 characters long",
        ));
    }

    if password.len() > 128 {
        return Err(invalid(
            "password",
            "Password cannot be longer than 128 characters",
        ));
    }

    Ok(())
}

/// Parse and validate the requested role
pub fn validate_role(role: &str) -> Result<UserRole, ApiError> {
    UserRole::from_str(role).ok_or_else(|| invalid("role", "Role must be either trainer or client"))
}

/// Workout name validation
pub fn validate_workout_name(name: &str) -> Result<(), ApiError> {
    if name.is_empty() {
        return Err(invalid("name", "Name is required"));
    }

    if name.len() > 100 {
        return Err(invalid("name", "Name cannot be longer than 100 characters"));
    }

    Ok(())
}

/// Workout description validation
pub fn validate_workout_description(description: &str) -> Result<(), ApiError> {
    if description.is_empty() {
        return Err(invalid("description", "Description is required"));
    }

    if description.len() > 500 {
        return Err(invalid(
            "description",
            "Description cannot be longer than 500 characters",
        ));
    }

    Ok(())
}
