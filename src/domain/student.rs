use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::sheet::StudentRow;

/// A persisted student record. Owned by the store after insertion; the
/// pipeline never mutates it again except for the batched roster append
/// that references its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roll_number: String,
    pub password_hash: String,
    pub department: String,
    pub coordinator_id: String,
    pub created_at: DateTime<Utc>,
}

impl Student {
    /// Build a ready-to-insert student from a validated row plus the
    /// ownership resolved from the acting faculty.
    pub fn from_row(
        row: &StudentRow,
        password_hash: String,
        department: String,
        coordinator_id: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            email: row.email.clone(),
            roll_number: row.roll_number.clone(),
            password_hash,
            department,
            coordinator_id,
            created_at: Utc::now(),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
