use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::domain::error::{AppError, Result};
use crate::domain::sheet::EntityKind;

/// Build the downloadable template workbook for one entity kind: a data
/// sheet with the documented header and example rows, plus an
/// "Instructions" sheet covering the column contract and default-value
/// rules.
pub fn build_template(kind: EntityKind) -> Result<Vec<u8>> {
    build_workbook(kind).map_err(|e| AppError::Internal(format!("Failed to build template: {}", e)))
}

fn build_workbook(kind: EntityKind) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet_name = match kind {
        EntityKind::Student => "Students",
        EntityKind::College => "Colleges",
    };

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    let mut col: u16 = 0;
    for (label, _) in kind.required_columns().iter().chain(kind.optional_columns()) {
        worksheet.write_with_format(0, col, *label, &bold)?;
        col += 1;
    }

    for (r, row) in example_rows(kind).iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            worksheet.write((r + 1) as u32, c as u16, *value)?;
        }
    }

    let instructions = workbook.add_worksheet();
    instructions.set_name("Instructions")?;
    for (r, line) in instruction_lines(kind).iter().enumerate() {
        if r == 0 {
            instructions.write_with_format(r as u32, 0, *line, &bold)?;
        } else {
            instructions.write(r as u32, 0, *line)?;
        }
    }

    workbook.save_to_buffer()
}

fn example_rows(kind: EntityKind) -> Vec<Vec<&'static str>> {
    match kind {
        EntityKind::Student => vec![
            vec!["Ada", "Lovelace", "ada.lovelace@example.edu", "CS-2024-001", ""],
            vec![
                "Grace",
                "Hopper",
                "grace.hopper@example.edu",
                "CS-2024-002",
                "ChosenSecret42",
            ],
        ],
        EntityKind::College => vec![
            vec!["Engineering College", "ENGC", "office@engc.example.edu", "", ""],
            vec![
                "Arts and Science College",
                "ARSC",
                "office@arsc.example.edu",
                "123e4567-e89b-42d3-a456-426614174000",
                "",
            ],
        ],
    }
}

fn instruction_lines(kind: EntityKind) -> Vec<&'static str> {
    match kind {
        EntityKind::Student => vec![
            "Student bulk upload template",
            "",
            "Required columns: First Name, Last Name, Email, Roll Number.",
            "Optional columns: Password.",
            "Keep the header on row 1; data starts on row 2.",
            "When Password is blank the account password defaults to ROLLNUMBER@123 \
             (for roll number CS-2024-001 that is CS-2024-001@123).",
            "Rows with an email or roll number that already exists are reported as \
             duplicates and skipped; other invalid rows are reported as errors. The \
             rest of the file is still imported.",
        ],
        EntityKind::College => vec![
            "College bulk upload template",
            "",
            "Required columns: Name, Code, Email.",
            "Optional columns: Institute Id, Password.",
            "Keep the header on row 1; data starts on row 2.",
            "When Password is blank the account password defaults to CODE@123 \
             (for code ENGC that is ENGC@123).",
            "Institute Id may be left blank when an institute account uploads the \
             file; the uploader's own institute is used.",
            "Rows with an email or code that already exists are reported as \
             duplicates and skipped; other invalid rows are reported as errors. The \
             rest of the file is still imported.",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sheet::decode;
    use calamine::{Reader, Xlsx};
    use std::io::Cursor;

    #[test]
    fn test_student_template_has_every_required_column() {
        let bytes = build_template(EntityKind::Student).unwrap();
        let sheet = decode(&bytes, "template.xlsx").unwrap();

        for (_, key) in EntityKind::Student.required_columns() {
            assert!(
                sheet.headers().iter().any(|h| h == key),
                "missing column {}",
                key
            );
        }
        assert!(sheet.row_count() >= 1);
    }

    #[test]
    fn test_college_template_has_every_required_column() {
        let bytes = build_template(EntityKind::College).unwrap();
        let sheet = decode(&bytes, "template.xlsx").unwrap();

        for (_, key) in EntityKind::College.required_columns() {
            assert!(sheet.headers().iter().any(|h| h == key));
        }
    }

    #[test]
    fn test_template_carries_instructions_sheet() {
        let bytes = build_template(EntityKind::Student).unwrap();
        let workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.as_slice())).unwrap();
        assert!(workbook
            .sheet_names()
            .iter()
            .any(|name| name == "Instructions"));
    }

    #[test]
    fn test_template_example_rows_decode_cleanly() {
        let bytes = build_template(EntityKind::Student).unwrap();
        let sheet = decode(&bytes, "template.xlsx").unwrap();
        assert_eq!(sheet.rows()[0].get("firstname"), Some("Ada"));
        assert_eq!(sheet.rows()[1].get("password"), Some("ChosenSecret42"));
    }
}
