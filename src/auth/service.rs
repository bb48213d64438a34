use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::jwt::JwtService;
use crate::auth::models::{
    AuthResponse, LoginRequest, RegisterRequest, UserInfo, UserRole, UserSession,
};
use crate::auth::password::{hash_password, verify_password};
use crate::errors::{is_unique_violation, ApiError};
use crate::models::validation::{validate_email, validate_password, validate_role};

/// Minimal user row used by the authentication flows
#[derive(Debug, Clone, sqlx::FromRow)]
struct User {
    id: Uuid,
    email: String,
    password_hash: String,
    role: String,
}

#[derive(Debug, Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    db: PgPool,
}

impl AuthService {
    pub fn new(db: PgPool, jwt_service: JwtService) -> Self {
        Self { jwt_service, db }
    }

    /// Register a new user
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, ApiError> {
        validate_email(&request.email)?;
        validate_password(&request.password)?;
        let role = validate_role(&request.role)?;

        if self.get_user_by_email(&request.email).await?.is_some() {
            return Err(ApiError::EmailAlreadyExists);
        }

        let password_hash = hash_password(&request.password)?;
        let user_id = Uuid::new_v4();
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, password_hash, role, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING id, email, password_hash, role",
        )
        .bind(user_id)
        .bind(&request.email)
        .bind(&password_hash)
        .bind(role.as_str())
        .bind(now)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            // The unique index on email stays authoritative if two
            // registrations race past the pre-check.
            if is_unique_violation(&err) {
                ApiError::EmailAlreadyExists
            } else {
                ApiError::Database(err)
            }
        })?;

        let token = self
            .jwt_service
            .create_token(user.id, &user.email, role.clone())?;

        Ok(AuthResponse {
            user: UserInfo {
                id: user.id,
                email: user.email,
                role,
            },
            token,
        })
    }

    /// Login user. Unknown email and wrong password are indistinguishable
    /// to the caller.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, ApiError> {
        let user = self
            .get_user_by_email(&request.email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(ApiError::InvalidCredentials);
        }

        let role = UserRole::from_str(&user.role).ok_or_else(|| {
            ApiError::Internal(anyhow::anyhow!(
                "unknown role {:?} stored for user {}",
                user.role,
                user.id
            ))
        })?;

        let token = self
            .jwt_service
            .create_token(user.id, &user.email, role.clone())?;

        Ok(AuthResponse {
            user: UserInfo {
                id: user.id,
                email: user.email,
                role,
            },
            token,
        })
    }

    /// Validate a token and confirm the subject still exists
    pub async fn validate_session(&self, token: &str) -> Result<UserSession, ApiError> {
        let session = self.jwt_service.extract_user_session(token)?;

        if !self.user_exists(session.user_id).await? {
            return Err(ApiError::UserGone);
        }

        Ok(session)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::Database)?;

        Ok(user)
    }

    async fn user_exists(&self, user_id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("SELECT 1 FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(result.is_some())
    }
}
