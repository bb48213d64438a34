use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User roles for role-based access control
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Trainer,
    Client,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Trainer => "trainer",
            UserRole::Client => "client",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trainer" => Some(UserRole::Trainer),
            "client" => Some(UserRole::Client),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,    // Subject (user ID)
    pub email: String,  // User email
    pub role: UserRole, // User role
    pub exp: usize,     // Expiration time
    pub iat: usize,     // Issued at
}

/// Authentication request models
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Authentication response models
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserInfo,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

/// Identity attached to a request after authentication
#[derive(Debug, Clone)]
pub struct UserSession {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl UserSession {
    pub fn from_claims(claims: &Claims) -> Result<Self, uuid::Error> {
        Ok(Self {
            user_id: Uuid::parse_str(&claims.sub)?,
            email: claims.email.clone(),
            role: claims.role.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Trainer).unwrap(), "\"trainer\"");
        assert_eq!(serde_json::to_string(&UserRole::Client).unwrap(), "\"client\"");

        let role: UserRole = serde_json::from_str("\"client\"").unwrap();
        assert_eq!(role, UserRole::Client);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!(UserRole::from_str("trainer"), Some(UserRole::Trainer));
        assert_eq!(UserRole::from_str("Client"), Some(UserRole::Client));
        assert_eq!(UserRole::from_str("admin"), None);
        assert_eq!(UserRole::from_str(""), None);
    }

    #[test]
    fn test_session_from_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims {
            sub: user_id.to_string(),
            email: "t@example.com".to_string(),
            role: UserRole::Trainer,
            exp: 0,
            iat: 0,
        };

        let session = UserSession::from_claims(&claims).unwrap();
        assert_eq!(session.user_id, user_id);
        assert_eq!(session.email, "t@example.com");
        assert_eq!(session.role, UserRole::Trainer);

        let bad = Claims {
            sub: "not-a-uuid".to_string(),
            email: "t@example.com".to_string(),
            role: UserRole::Trainer,
            exp: 0,
            iat: 0,
        };
        assert!(UserSession::from_claims(&bad).is_err());
    }
}
