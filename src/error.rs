//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way
//! to represent the conditions the API can fail with, from authorization
//! failures to database outages.
//!
//! `AppError` implements `actix_web::error::ResponseError` to seamlessly
//! convert application errors into appropriate HTTP responses with JSON
//! bodies. It also provides `From` trait implementations for common error
//! types like `sqlx::Error`, `validator::ValidationErrors` and
//! `bcrypt::BcryptError`, allowing for easy conversion using the `?`
//! operator.
//!
//! Token verification failures are deliberately NOT converted here: the
//! authentication middleware collapses every token problem into a single
//! `Unauthorized` response so clients cannot distinguish a malformed token
//! from an expired one.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
///
/// Each variant corresponds to a specific type of error, carrying a message
/// detailing the issue. These errors are then converted into appropriate
/// HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failed or is required but missing (HTTP 401).
    Unauthorized(String),
    /// The authenticated user lacks the role required for the operation
    /// (HTTP 403). Used for the admin-only bulk task deletions.
    Forbidden(String),
    /// A uniqueness rule was violated, e.g. registering a username that is
    /// already taken (HTTP 409).
    Conflict(String),
    /// A client-side error due to a malformed or invalid request (HTTP 400).
    BadRequest(String),
    /// A requested resource was not found (HTTP 404).
    NotFound(String),
    /// Input failed field-level validation (HTTP 422 Unprocessable Entity).
    ValidationError(String),
    /// An error originating from database operations (HTTP 503).
    /// The message is kept for logs; clients only see a generic body.
    DatabaseError(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation allows Actix Web to automatically translate
/// `AppError` results from handlers into the correct HTTP status codes and
/// JSON error responses.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "error": msg
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "error": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::ValidationError(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "error": msg
            })),
            // Store outages surface as plain unavailability; the SQL detail
            // stays in the log line, not the response.
            AppError::DatabaseError(_) => HttpResponse::ServiceUnavailable().json(json!({
                "error": "Database unavailable"
            })),
            AppError::InternalServerError(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `sqlx::Error::RowNotFound` is mapped to `AppError::NotFound`, while other
/// database errors become `AppError::DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
///
/// This handles errors during password hashing.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = AppError::Unauthorized("Invalid token".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::Forbidden("Admin privileges required".into());
        assert_eq!(error.error_response().status(), 403);

        let error = AppError::Conflict("Username already exists".into());
        assert_eq!(error.error_response().status(), 409);

        let error = AppError::BadRequest("Invalid input".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::NotFound("Resource not found".into());
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::ValidationError("Title cannot be empty".into());
        assert_eq!(error.error_response().status(), 422);

        let error = AppError::DatabaseError("connection refused".into());
        assert_eq!(error.error_response().status(), 503);

        let error = AppError::InternalServerError("Server error".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[actix_rt::test]
    async fn test_database_error_body_is_generic() {
        // The SQL detail stays in Display (for logs); the response body
        // must not echo connection details.
        let error = AppError::DatabaseError("connection refused at 10.0.0.5:5432".into());
        assert!(format!("{}", error).contains("connection refused"));

        let response = error.error_response();
        assert_eq!(response.status(), 503);
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .unwrap();
        let body = String::from_utf8_lossy(&body);
        assert!(!body.contains("10.0.0.5"));
        assert!(body.contains("Database unavailable"));
    }
}
