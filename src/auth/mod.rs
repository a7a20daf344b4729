pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::models::user::{Role, User};

// Re-export necessary items
pub use extractors::CurrentUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{TokenError, TokenService};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username of the account to authenticate.
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    /// User's password.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username for the new account.
    /// Must be between 3 and 64 characters, alphanumeric, and can include
    /// underscores or hyphens.
    #[validate(
        length(min = 3, max = 64),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// Password for the new account.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Response structure after a successful login.
/// Contains the bearer token and the ID of the authenticated user.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The signed bearer token for subsequent requests.
    pub token: String,
    /// The unique identifier of the authenticated user.
    pub user_id: i32,
}

/// Authorization predicate for admin-only operations.
///
/// Handlers that expose bulk-destructive task operations call this with the
/// resolved user before touching the store.
pub fn require_admin(user: &User) -> Result<(), AppError> {
    if user.role == Role::Admin {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin privileges required".into()))
    }
}
