use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::StudentStore;
use crate::domain::error::{AppError, Result};
use crate::domain::student::Student;

pub struct StudentRepository {
    pool: SqlitePool,
}

impl StudentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for StudentRepository {
    async fn find_by_unique_keys(
        &self,
        email: &str,
        roll_number: &str,
    ) -> Result<Option<Student>> {
        sqlx::query_as::<_, StudentEntity>(
            "SELECT id, first_name, last_name, email, roll_number, password_hash,\n                    department, coordinator_id, created_at\n             FROM students WHERE email = ? OR roll_number = ? LIMIT 1",
        )
        .bind(email)
        .bind(roll_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to look up student: {}", e)))
        .map(|entity| entity.map(Into::into))
    }

    async fn insert(&self, student: &Student) -> Result<()> {
        sqlx::query(
            "INSERT INTO students (id, first_name, last_name, email, roll_number,\n                                   password_hash, department, coordinator_id, created_at)\n             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&student.id)
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.email)
        .bind(&student.roll_number)
        .bind(&student.password_hash)
        .bind(&student.department)
        .bind(&student.coordinator_id)
        .bind(student.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to insert student: {}", e)))?;

        Ok(())
    }

    async fn append_roster(&self, faculty_id: &str, student_ids: &[String]) -> Result<()> {
        if student_ids.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("INSERT INTO coordinator_roster (faculty_id, student_id) ");
        builder.push_values(student_ids, |mut row, student_id| {
            row.push_bind(faculty_id).push_bind(student_id);
        });

        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to append roster: {}", e)))?;

        Ok(())
    }
}

// Internal entity for database mapping
#[derive(sqlx::FromRow)]
struct StudentEntity {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    roll_number: String,
    password_hash: String,
    department: String,
    coordinator_id: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<StudentEntity> for Student {
    fn from(e: StudentEntity) -> Self {
        Self {
            id: e.id,
            first_name: e.first_name,
            last_name: e.last_name,
            email: e.email,
            roll_number: e.roll_number,
            password_hash: e.password_hash,
            department: e.department,
            coordinator_id: e.coordinator_id,
            created_at: e.created_at,
        }
    }
}
