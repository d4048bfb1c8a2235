use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::sheet::CollegeRow;

/// A persisted college record, owned by an institute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct College {
    pub id: String,
    pub name: String,
    pub code: String,
    pub email: String,
    pub password_hash: String,
    pub institute_id: String,
    pub created_at: DateTime<Utc>,
}

impl College {
    pub fn from_row(row: &CollegeRow, password_hash: String, institute_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: row.name.clone(),
            code: row.code.clone(),
            email: row.email.clone(),
            password_hash,
            institute_id,
            created_at: Utc::now(),
        }
    }
}
