use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::domain::sheet::{EntityKind, RowRecord};

static ENTITY_REF_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

/// Syntactic check for a store entity reference (UUID form). Relation
/// resolution rejects anything else before touching the store.
pub fn is_valid_entity_ref(value: &str) -> bool {
    ENTITY_REF_PATTERN.is_match(value)
}

/// A student row that passed presence checks and normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roll_number: String,
    pub password: Option<String>,
}

/// A college row that passed presence checks and normalization. The
/// institute reference stays optional here; resolving it against the
/// acting user happens in the row processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollegeRow {
    pub name: String,
    pub code: String,
    pub email: String,
    pub password: Option<String>,
    pub institute_id: Option<String>,
}

/// Typed variant of one row, produced only through the validating
/// constructors below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ValidatedRow {
    Student(StudentRow),
    College(CollegeRow),
}

impl ValidatedRow {
    /// Validate and normalize a row record for the given entity kind.
    /// The error string becomes the row's Error outcome message.
    pub fn from_record(kind: EntityKind, record: &RowRecord) -> Result<Self, String> {
        match kind {
            EntityKind::Student => Ok(ValidatedRow::Student(StudentRow::from_record(record)?)),
            EntityKind::College => Ok(ValidatedRow::College(CollegeRow::from_record(record)?)),
        }
    }
}

fn check_required(kind: EntityKind, record: &RowRecord) -> Result<(), String> {
    let missing: Vec<&str> = kind
        .required_columns()
        .iter()
        .filter(|(_, key)| record.get(key).is_none())
        .map(|(label, _)| *label)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("missing required fields: {}", missing.join(", ")))
    }
}

fn checked_email(raw: &str) -> Result<String, String> {
    let email = raw.trim().to_ascii_lowercase();
    if email.validate_email() {
        Ok(email)
    } else {
        Err(format!("invalid email address: {}", raw))
    }
}

impl StudentRow {
    pub fn from_record(record: &RowRecord) -> Result<Self, String> {
        // check_required guarantees presence; unwrap_or_default keeps the
        // constructor total anyway.
        check_required(EntityKind::Student, record)?;
        let email = checked_email(record.get("email").unwrap_or_default())?;

        Ok(Self {
            first_name: record.get("firstname").unwrap_or_default().to_string(),
            last_name: record.get("lastname").unwrap_or_default().to_string(),
            email,
            roll_number: record.get("rollnumber").unwrap_or_default().to_string(),
            password: record.get("password").map(|p| p.to_string()),
        })
    }
}

impl CollegeRow {
    pub fn from_record(record: &RowRecord) -> Result<Self, String> {
        check_required(EntityKind::College, record)?;
        let email = checked_email(record.get("email").unwrap_or_default())?;

        Ok(Self {
            name: record.get("name").unwrap_or_default().to_string(),
            code: record
                .get("code")
                .unwrap_or_default()
                .to_ascii_uppercase(),
            email,
            password: record.get("password").map(|p| p.to_string()),
            institute_id: record
                .get("instituteid")
                .or_else(|| record.get("institute"))
                .map(|v| v.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sheet::normalize_header;

    fn record(pairs: &[(&str, &str)]) -> RowRecord {
        let headers: Vec<String> = pairs.iter().map(|(h, _)| normalize_header(h)).collect();
        let cells: Vec<String> = pairs.iter().map(|(_, v)| v.to_string()).collect();
        RowRecord::new(0, &headers, &cells)
    }

    #[test]
    fn test_student_row_normalizes_email() {
        let rec = record(&[
            ("First Name", "Ada"),
            ("Last Name", "Lovelace"),
            ("Email", " Ada.Lovelace@Example.EDU "),
            ("Roll Number", "CS-101"),
        ]);

        let row = StudentRow::from_record(&rec).unwrap();
        assert_eq!(row.email, "ada.lovelace@example.edu");
        assert_eq!(row.roll_number, "CS-101");
        assert!(row.password.is_none());
    }

    #[test]
    fn test_student_row_missing_fields_lists_labels() {
        let rec = record(&[("First Name", "Ada"), ("Email", "ada@example.edu")]);
        let err = ValidatedRow::from_record(EntityKind::Student, &rec).unwrap_err();
        assert_eq!(err, "missing required fields: Last Name, Roll Number");
    }

    #[test]
    fn test_student_row_rejects_bad_email() {
        let rec = record(&[
            ("First Name", "Ada"),
            ("Last Name", "Lovelace"),
            ("Email", "not-an-email"),
            ("Roll Number", "CS-101"),
        ]);
        let err = ValidatedRow::from_record(EntityKind::Student, &rec).unwrap_err();
        assert!(err.contains("invalid email address"));
    }

    #[test]
    fn test_college_row_uppercases_code() {
        let rec = record(&[
            ("Name", "Engineering College"),
            ("Code", "engc"),
            ("Email", "office@engc.edu"),
        ]);

        let row = CollegeRow::from_record(&rec).unwrap();
        assert_eq!(row.code, "ENGC");
        assert!(row.institute_id.is_none());
    }

    #[test]
    fn test_college_row_reads_institute_column_variants() {
        let rec = record(&[
            ("Name", "Engineering College"),
            ("Code", "ENGC"),
            ("Email", "office@engc.edu"),
            ("Institute Id", "123e4567-e89b-42d3-a456-426614174000"),
        ]);

        let row = CollegeRow::from_record(&rec).unwrap();
        assert_eq!(
            row.institute_id.as_deref(),
            Some("123e4567-e89b-42d3-a456-426614174000")
        );
    }

    #[test]
    fn test_entity_ref_syntax() {
        assert!(is_valid_entity_ref("123e4567-e89b-42d3-a456-426614174000"));
        assert!(!is_valid_entity_ref("not-a-reference"));
        assert!(!is_valid_entity_ref(""));
    }
}
