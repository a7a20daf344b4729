use sqlx::PgPool;

use crate::error::AppError;
use crate::models::user::{Role, User};

/// Persistent user records.
///
/// Constructed once in `main` over the connection pool and handed to the
/// HTTP layer as application data. Role assignment is NOT decided here: the
/// registration handler checks [`count`](UserStore::count) and passes the
/// role into [`create`](UserStore::create).
#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, role, created_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Inserts a new user.
    ///
    /// Callers pre-check duplicates with `find_by_username`, but the unique
    /// constraint on `username` is authoritative: a constraint violation
    /// maps to `Conflict` rather than a generic database error.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING id, username, password_hash, role, created_at",
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                AppError::Conflict("Username already exists".into())
            }
            _ => AppError::from(e),
        })?;

        Ok(user)
    }
}
