use serde::{Deserialize, Serialize};

use crate::domain::sheet::RowRecord;

/// Successful row: the entity the store now owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessEntry {
    pub id: String,
    pub name: String,
    pub external_id: String,
}

/// Row whose unique key collided with a persisted record or with an
/// earlier row of the same batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateEntry {
    pub row: usize,
    pub conflict: String,
}

/// Row rejected for any other reason; echoes the raw row back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub row: usize,
    pub data: serde_json::Value,
    pub error: String,
}

/// Tagged result of processing exactly one row. Every decoded row maps to
/// exactly one of these; nothing crosses the row-loop boundary as an error.
#[derive(Debug, Clone)]
pub enum RowOutcome {
    Success(SuccessEntry),
    Duplicate(DuplicateEntry),
    Error(ErrorEntry),
}

impl RowOutcome {
    pub fn success(id: String, name: String, external_id: String) -> Self {
        RowOutcome::Success(SuccessEntry {
            id,
            name,
            external_id,
        })
    }

    pub fn duplicate(record: &RowRecord, conflict: String) -> Self {
        RowOutcome::Duplicate(DuplicateEntry {
            row: record.row_number(),
            conflict,
        })
    }

    pub fn error(record: &RowRecord, message: impl Into<String>) -> Self {
        RowOutcome::Error(ErrorEntry {
            row: record.row_number(),
            data: record.raw_json(),
            error: message.into(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub errors: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    pub success: Vec<SuccessEntry>,
    pub errors: Vec<ErrorEntry>,
    pub duplicates: Vec<DuplicateEntry>,
}

/// The full batch report returned to the caller. The three result lists
/// partition the decoded row set: `summary.total` always equals
/// `successful + errors + duplicates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub results: BatchResults,
}

impl BatchReport {
    /// Partition outcomes in row order and compute the summary counts.
    pub fn from_outcomes(total: usize, outcomes: Vec<RowOutcome>) -> Self {
        let mut results = BatchResults {
            success: Vec::new(),
            errors: Vec::new(),
            duplicates: Vec::new(),
        };

        for outcome in outcomes {
            match outcome {
                RowOutcome::Success(entry) => results.success.push(entry),
                RowOutcome::Duplicate(entry) => results.duplicates.push(entry),
                RowOutcome::Error(entry) => results.errors.push(entry),
            }
        }

        let summary = BatchSummary {
            total,
            successful: results.success.len(),
            errors: results.errors.len(),
            duplicates: results.duplicates.len(),
        };

        Self { summary, results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sheet::normalize_header;

    fn record(index: usize) -> RowRecord {
        let headers = vec![normalize_header("Email")];
        RowRecord::new(index, &headers, &["x@y.edu".to_string()])
    }

    #[test]
    fn test_report_partitions_all_rows() {
        let outcomes = vec![
            RowOutcome::success("id-1".into(), "Ada Lovelace".into(), "CS-101".into()),
            RowOutcome::error(&record(1), "missing required fields: Email"),
            RowOutcome::duplicate(&record(2), "email x@y.edu".into()),
        ];

        let report = BatchReport::from_outcomes(3, outcomes);
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.successful, 1);
        assert_eq!(report.summary.errors, 1);
        assert_eq!(report.summary.duplicates, 1);
        assert_eq!(
            report.summary.total,
            report.summary.successful + report.summary.errors + report.summary.duplicates
        );
        assert_eq!(report.results.errors[0].row, 3);
        assert_eq!(report.results.duplicates[0].row, 4);
    }

    #[test]
    fn test_report_holds_when_every_row_fails() {
        let outcomes = vec![
            RowOutcome::error(&record(0), "bad"),
            RowOutcome::error(&record(1), "bad"),
        ];

        let report = BatchReport::from_outcomes(2, outcomes);
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.successful, 0);
        assert_eq!(report.summary.errors, 2);
        assert!(report.results.success.is_empty());
    }

    #[test]
    fn test_error_entry_echoes_raw_row() {
        let outcomes = vec![RowOutcome::error(&record(0), "bad")];
        let report = BatchReport::from_outcomes(1, outcomes);
        assert_eq!(report.results.errors[0].data["email"], "x@y.edu");
    }
}
