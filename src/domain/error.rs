use serde::{Deserialize, Serialize};
use std::fmt;

/// Service-wide error type.
///
/// `DecodeError`, `SchemaError` and `EmptyBatch` abort a batch before any
/// row is processed; everything that happens inside the row loop is folded
/// into a per-row outcome instead of surfacing here.
#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    NotFound(String),
    ValidationError(String),
    DecodeError(String),
    SchemaError(Vec<String>),
    EmptyBatch,
    Unauthorized(String),
    Forbidden(String),
    HashError(String),
    DatabaseError(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::DecodeError(msg) => write!(f, "Decode error: {}", msg),
            AppError::SchemaError(columns) => {
                write!(f, "Missing required columns: {}", columns.join(", "))
            }
            AppError::EmptyBatch => write!(f, "Spreadsheet contains no data rows"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::HashError(msg) => write!(f, "Hash error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
