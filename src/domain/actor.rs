use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Role of an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Faculty,
    Institute,
    Admin,
}

impl Role {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "faculty" => Ok(Role::Faculty),
            "institute" => Ok(Role::Institute),
            "admin" => Ok(Role::Admin),
            other => Err(AppError::Internal(format!("Unknown role: {}", other))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Faculty => "faculty",
            Role::Institute => "institute",
            Role::Admin => "admin",
        }
    }
}

/// The authenticated principal driving a batch run.
///
/// Always passed into the pipeline as an explicit parameter; processing
/// logic never reads identity from ambient request state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActingUser {
    pub id: String,
    pub role: Role,
    pub display_name: String,
    pub email: String,
    /// Department of a faculty coordinator; owns every student they import.
    pub department: Option<String>,
    /// Owning institute id for institute-role users; donated to college
    /// rows that omit the institute column.
    pub institute_id: Option<String>,
}
