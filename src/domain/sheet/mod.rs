// ============================================================
// SHEET DOMAIN LAYER
// ============================================================
// Row records, column contracts and validated row types for
// spreadsheet ingestion. No I/O, no async.

mod row;
mod schema;
mod validated;

pub use row::{normalize_header, RowRecord, Sheet};
pub use schema::{EntityKind, SheetSchema};
pub use validated::{is_valid_entity_ref, CollegeRow, StudentRow, ValidatedRow};
