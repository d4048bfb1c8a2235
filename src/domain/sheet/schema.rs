use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Which kind of entity a batch imports. Selects the column contract, the
/// unique keys, the ownership resolution and the target store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Student,
    College,
}

/// (human label, normalized key) pairs; the label is what schema failures
/// and templates show, the key is what row lookups use.
type Column = (&'static str, &'static str);

const STUDENT_REQUIRED: &[Column] = &[
    ("First Name", "firstname"),
    ("Last Name", "lastname"),
    ("Email", "email"),
    ("Roll Number", "rollnumber"),
];

const STUDENT_OPTIONAL: &[Column] = &[("Password", "password")];

const COLLEGE_REQUIRED: &[Column] = &[
    ("Name", "name"),
    ("Code", "code"),
    ("Email", "email"),
];

const COLLEGE_OPTIONAL: &[Column] = &[
    ("Institute Id", "instituteid"),
    ("Password", "password"),
];

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Student => "student",
            EntityKind::College => "college",
        }
    }

    pub fn required_columns(&self) -> &'static [Column] {
        match self {
            EntityKind::Student => STUDENT_REQUIRED,
            EntityKind::College => COLLEGE_REQUIRED,
        }
    }

    pub fn optional_columns(&self) -> &'static [Column] {
        match self {
            EntityKind::Student => STUDENT_OPTIONAL,
            EntityKind::College => COLLEGE_OPTIONAL,
        }
    }
}

/// The required-column contract for one entity kind.
pub struct SheetSchema {
    kind: EntityKind,
}

impl SheetSchema {
    pub fn for_kind(kind: EntityKind) -> Self {
        Self { kind }
    }

    /// Check a decoded header's normalized key set against the contract.
    /// Reports every missing column at once; a failure aborts the whole
    /// batch, unlike per-row validation.
    pub fn validate_header(&self, headers: &[String]) -> Result<()> {
        let missing: Vec<String> = self
            .kind
            .required_columns()
            .iter()
            .filter(|(_, key)| !headers.iter().any(|h| h == key))
            .map(|(label, _)| label.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::SchemaError(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sheet::normalize_header;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| normalize_header(n)).collect()
    }

    #[test]
    fn test_student_header_passes() {
        let schema = SheetSchema::for_kind(EntityKind::Student);
        let hs = headers(&["First Name", "Last Name", "Email", "Roll Number", "Password"]);
        assert!(schema.validate_header(&hs).is_ok());
    }

    #[test]
    fn test_student_header_reports_all_missing_columns() {
        let schema = SheetSchema::for_kind(EntityKind::Student);
        let hs = headers(&["First Name", "Email"]);
        match schema.validate_header(&hs) {
            Err(AppError::SchemaError(missing)) => {
                assert_eq!(missing, vec!["Last Name", "Roll Number"]);
            }
            other => panic!("expected SchemaError, got {:?}", other),
        }
    }

    #[test]
    fn test_college_header_accepts_variant_spellings() {
        let schema = SheetSchema::for_kind(EntityKind::College);
        let hs = headers(&["NAME", "code", "E-Mail"]);
        assert!(schema.validate_header(&hs).is_ok());
    }

    #[test]
    fn test_optional_columns_are_not_required() {
        let schema = SheetSchema::for_kind(EntityKind::College);
        let hs = headers(&["Name", "Code", "Email"]);
        assert!(schema.validate_header(&hs).is_ok());
    }
}
