use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::auth::models::{Claims, UserRole, UserSession};
use crate::errors::ApiError;

/// JWT token service for creating and validating tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expires_in: Duration,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .field("token_expires_in", &self.token_expires_in)
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given secret and token lifetime
    pub fn new(secret: &str, token_expires_in: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expires_in,
        }
    }

    /// Create a signed identity token for a user
    pub fn create_token(
        &self,
        user_id: Uuid,
        email: &str,
        role: UserRole,
    ) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = now + self.token_expires_in;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(ApiError::Jwt)
    }

    /// Validate and decode a token. Only HS256 is accepted.
    pub fn validate_token(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|_| ApiError::InvalidToken)
    }

    /// Extract user session from token
    pub fn extract_user_session(&self, token: &str) -> Result<UserSession, ApiError> {
        let claims = self.validate_token(token)?;
        UserSession::from_claims(&claims).map_err(|_| ApiError::InvalidToken)
    }
}

/// Extract bearer token from authorization header
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, ApiError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::InvalidAuthHeaderFormat)?;

    if token.is_empty() {
        return Err(ApiError::InvalidAuthHeaderFormat);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test_secret", Duration::days(7))
    }

    #[test]
    fn test_jwt_creation_and_validation() {
        let jwt_service = service();
        let user_id = Uuid::new_v4();
        let email = "trainer@example.com";

        let token = jwt_service
            .create_token(user_id, email, UserRole::Trainer)
            .unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = jwt_service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, email);
        assert_eq!(claims.role, UserRole::Trainer);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let jwt_service = service();
        let token = jwt_service
            .create_token(Uuid::new_v4(), "t@example.com", UserRole::Client)
            .unwrap();

        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(jwt_service.validate_token(&token).is_ok());
        assert!(jwt_service.validate_token(&tampered).is_err());
        assert!(jwt_service.validate_token("garbage").is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = service()
            .create_token(Uuid::new_v4(), "t@example.com", UserRole::Trainer)
            .unwrap();

        let other = JwtService::new("another_secret", Duration::days(7));
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt_service = JwtService::new("test_secret", Duration::seconds(-3600));
        let token = jwt_service
            .create_token(Uuid::new_v4(), "t@example.com", UserRole::Client)
            .unwrap();

        assert!(jwt_service.validate_token(&token).is_err());
    }

    #[test]
    fn test_user_session_extraction() {
        let jwt_service = service();
        let user_id = Uuid::new_v4();

        let token = jwt_service
            .create_token(user_id, "c@example.com", UserRole::Client)
            .unwrap();
        let session = jwt_service.extract_user_session(&token).unwrap();

        assert_eq!(session.user_id, user_id);
        assert_eq!(session.email, "c@example.com");
        assert_eq!(session.role, UserRole::Client);
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(
            extract_bearer_token("Bearer test_token").unwrap(),
            "test_token"
        );

        assert!(extract_bearer_token("Invalid header").is_err());
        assert!(extract_bearer_token("Bearer ").is_err());
    }
}
