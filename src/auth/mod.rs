// Authentication and authorization

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;

pub use jwt::{extract_bearer_token, JwtService};
pub use middleware::{
    cors_layer, jwt_auth_middleware, require_any_role, require_role, security_headers_layer,
};
pub use models::*;
pub use service::AuthService;
