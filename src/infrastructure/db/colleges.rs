use async_trait::async_trait;
use sqlx::SqlitePool;

use super::CollegeStore;
use crate::domain::college::College;
use crate::domain::error::{AppError, Result};

pub struct CollegeRepository {
    pool: SqlitePool,
}

impl CollegeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollegeStore for CollegeRepository {
    async fn find_by_unique_keys(&self, email: &str, code: &str) -> Result<Option<College>> {
        sqlx::query_as::<_, CollegeEntity>(
            "SELECT id, name, code, email, password_hash, institute_id, created_at\n             FROM colleges WHERE email = ? OR code = ? LIMIT 1",
        )
        .bind(email)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to look up college: {}", e)))
        .map(|entity| entity.map(Into::into))
    }

    async fn insert(&self, college: &College) -> Result<()> {
        sqlx::query(
            "INSERT INTO colleges (id, name, code, email, password_hash, institute_id, created_at)\n             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&college.id)
        .bind(&college.name)
        .bind(&college.code)
        .bind(&college.email)
        .bind(&college.password_hash)
        .bind(&college.institute_id)
        .bind(college.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to insert college: {}", e)))?;

        Ok(())
    }
}

// Internal entity for database mapping
#[derive(sqlx::FromRow)]
struct CollegeEntity {
    id: String,
    name: String,
    code: String,
    email: String,
    password_hash: String,
    institute_id: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CollegeEntity> for College {
    fn from(e: CollegeEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            code: e.code,
            email: e.email,
            password_hash: e.password_hash,
            institute_id: e.institute_id,
            created_at: e.created_at,
        }
    }
}
