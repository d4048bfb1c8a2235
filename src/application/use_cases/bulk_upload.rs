// ============================================================
// BULK UPLOAD USE CASE
// ============================================================
// The batch ingestion pipeline: decode -> schema check -> per-row
// processing -> aggregation -> batched roster append.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::actor::{ActingUser, Role};
use crate::domain::college::College;
use crate::domain::error::{AppError, Result};
use crate::domain::outcome::{BatchReport, RowOutcome};
use crate::domain::sheet::{
    is_valid_entity_ref, CollegeRow, EntityKind, RowRecord, SheetSchema, StudentRow, ValidatedRow,
};
use crate::domain::student::Student;
use crate::infrastructure::db::{CollegeStore, StudentStore};
use crate::infrastructure::security::PasswordHasher;
use crate::infrastructure::sheet;

/// Drives one batch run. Rows are processed strictly sequentially and each
/// row performs its own store lookup before its own insert, so the
/// duplicate check observes rows committed earlier in the same batch.
/// There is no cross-row transaction: re-submitting the same file is safe,
/// already-persisted rows simply resolve as duplicates.
pub struct BulkUploadUseCase {
    students: Arc<dyn StudentStore>,
    colleges: Arc<dyn CollegeStore>,
    hasher: PasswordHasher,
}

impl BulkUploadUseCase {
    pub fn new(
        students: Arc<dyn StudentStore>,
        colleges: Arc<dyn CollegeStore>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            students,
            colleges,
            hasher,
        }
    }

    /// Run a batch. Decode and schema failures abort before any row is
    /// touched; once the row loop starts, every row maps to exactly one
    /// outcome and the batch always completes.
    pub async fn run(
        &self,
        kind: EntityKind,
        actor: &ActingUser,
        filename: &str,
        bytes: &[u8],
    ) -> Result<BatchReport> {
        info!(
            kind = kind.label(),
            actor = %actor.id,
            filename,
            size = bytes.len(),
            "Starting bulk upload batch"
        );

        let sheet = sheet::decode(bytes, filename)?;
        SheetSchema::for_kind(kind).validate_header(sheet.headers())?;
        if sheet.rows().is_empty() {
            return Err(AppError::EmptyBatch);
        }

        // Student ownership always comes from the acting faculty's own
        // record, never from the row; resolve it once per batch.
        let department = match kind {
            EntityKind::Student => Some(actor.department.clone().ok_or_else(|| {
                AppError::ValidationError("acting faculty has no department".to_string())
            })?),
            EntityKind::College => None,
        };

        let mut outcomes = Vec::with_capacity(sheet.row_count());
        let mut new_student_ids: Vec<String> = Vec::new();

        for record in sheet.rows() {
            let outcome = self
                .process_row(kind, record, actor, department.as_deref())
                .await;
            log_outcome(kind, &outcome);
            if kind == EntityKind::Student {
                if let RowOutcome::Success(entry) = &outcome {
                    new_student_ids.push(entry.id.clone());
                }
            }
            outcomes.push(outcome);
        }

        // One batched roster write per run; covers every successful row
        // even when a later row failed.
        if !new_student_ids.is_empty() {
            self.students
                .append_roster(&actor.id, &new_student_ids)
                .await?;
            debug!(
                coordinator = %actor.id,
                appended = new_student_ids.len(),
                "Roster updated"
            );
        }

        let report = BatchReport::from_outcomes(sheet.row_count(), outcomes);
        info!(
            kind = kind.label(),
            total = report.summary.total,
            successful = report.summary.successful,
            errors = report.summary.errors,
            duplicates = report.summary.duplicates,
            "Batch completed"
        );
        Ok(report)
    }

    /// The per-row state machine: validate -> duplicate check -> relation
    /// resolution -> credential synthesis -> persist. Every failure folds
    /// into an outcome; nothing crosses the loop boundary.
    async fn process_row(
        &self,
        kind: EntityKind,
        record: &RowRecord,
        actor: &ActingUser,
        department: Option<&str>,
    ) -> RowOutcome {
        let validated = match ValidatedRow::from_record(kind, record) {
            Ok(validated) => validated,
            Err(message) => return RowOutcome::error(record, message),
        };

        match (validated, department) {
            (ValidatedRow::Student(row), Some(department)) => {
                self.import_student(record, row, actor, department).await
            }
            (ValidatedRow::Student(_), None) => {
                RowOutcome::error(record, "acting faculty has no department")
            }
            (ValidatedRow::College(row), _) => self.import_college(record, row, actor).await,
        }
    }

    async fn import_student(
        &self,
        record: &RowRecord,
        row: StudentRow,
        actor: &ActingUser,
        department: &str,
    ) -> RowOutcome {
        match self
            .students
            .find_by_unique_keys(&row.email, &row.roll_number)
            .await
        {
            Ok(Some(existing)) => {
                let conflict = if existing.email == row.email {
                    format!("email {}", row.email)
                } else {
                    format!("roll number {}", row.roll_number)
                };
                return RowOutcome::duplicate(record, conflict);
            }
            Ok(None) => {}
            Err(e) => return RowOutcome::error(record, e.to_string()),
        }

        let password = row
            .password
            .clone()
            .unwrap_or_else(|| format!("{}@123", row.roll_number));
        let password_hash = match self.hasher.hash(&password) {
            Ok(hash) => hash,
            Err(e) => return RowOutcome::error(record, e.to_string()),
        };

        let student =
            Student::from_row(&row, password_hash, department.to_string(), actor.id.clone());
        match self.students.insert(&student).await {
            Ok(()) => RowOutcome::success(
                student.id.clone(),
                student.display_name(),
                student.roll_number.clone(),
            ),
            Err(e) => RowOutcome::error(record, e.to_string()),
        }
    }

    async fn import_college(
        &self,
        record: &RowRecord,
        row: CollegeRow,
        actor: &ActingUser,
    ) -> RowOutcome {
        match self.colleges.find_by_unique_keys(&row.email, &row.code).await {
            Ok(Some(existing)) => {
                let conflict = if existing.email == row.email {
                    format!("email {}", row.email)
                } else {
                    format!("code {}", row.code)
                };
                return RowOutcome::duplicate(record, conflict);
            }
            Ok(None) => {}
            Err(e) => return RowOutcome::error(record, e.to_string()),
        }

        // The row's institute wins; an institute-role actor donates its
        // own id when the row leaves the column blank.
        let institute_id = row.institute_id.clone().or_else(|| match actor.role {
            Role::Institute => actor.institute_id.clone(),
            _ => None,
        });
        let institute_id = match institute_id {
            Some(id) if is_valid_entity_ref(&id) => id,
            _ => return RowOutcome::error(record, "invalid institute reference"),
        };

        let password = row
            .password
            .clone()
            .unwrap_or_else(|| format!("{}@123", row.code));
        let password_hash = match self.hasher.hash(&password) {
            Ok(hash) => hash,
            Err(e) => return RowOutcome::error(record, e.to_string()),
        };

        let college = College::from_row(&row, password_hash, institute_id);
        match self.colleges.insert(&college).await {
            Ok(()) => {
                RowOutcome::success(college.id.clone(), college.name.clone(), college.code.clone())
            }
            Err(e) => RowOutcome::error(record, e.to_string()),
        }
    }
}

fn log_outcome(kind: EntityKind, outcome: &RowOutcome) {
    match outcome {
        RowOutcome::Success(entry) => {
            debug!(kind = kind.label(), id = %entry.id, external_id = %entry.external_id, "Row imported")
        }
        RowOutcome::Duplicate(entry) => {
            debug!(kind = kind.label(), row = entry.row, conflict = %entry.conflict, "Row skipped as duplicate")
        }
        RowOutcome::Error(entry) => {
            warn!(kind = kind.label(), row = entry.row, error = %entry.error, "Row rejected")
        }
    }
}
