use sqlx::SqlitePool;

use crate::domain::actor::{ActingUser, Role};
use crate::domain::error::{AppError, Result};

/// Lookup of authenticated principals. Session management itself lives
/// upstream; this only resolves a presented token to an acting user.
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_token(&self, api_token: &str) -> Result<Option<ActingUser>> {
        let entity = sqlx::query_as::<_, UserEntity>(
            "SELECT id, role, display_name, email, department, institute_id\n             FROM users WHERE api_token = ? LIMIT 1",
        )
        .bind(api_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to look up user: {}", e)))?;

        match entity {
            Some(e) => Ok(Some(e.into_acting_user()?)),
            None => Ok(None),
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserEntity {
    id: String,
    role: String,
    display_name: String,
    email: String,
    department: Option<String>,
    institute_id: Option<String>,
}

impl UserEntity {
    fn into_acting_user(self) -> Result<ActingUser> {
        Ok(ActingUser {
            id: self.id,
            role: Role::parse(&self.role)?,
            display_name: self.display_name,
            email: self.email,
            department: self.department,
            institute_id: self.institute_id,
        })
    }
}
