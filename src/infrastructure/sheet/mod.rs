// ============================================================
// SHEET INFRASTRUCTURE LAYER
// ============================================================
// Spreadsheet decoding (XLSX and CSV) and template generation

mod csv_parser;
mod template;
mod xlsx_parser;

pub use template::build_template;

use crate::domain::error::{AppError, Result};
use crate::domain::sheet::Sheet;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Decode an uploaded buffer into a sheet: header row plus ordered row
/// records. The sequence is consumed once by the batch pipeline; a buffer
/// that cannot be decoded aborts the batch before any row is processed.
pub fn decode(bytes: &[u8], filename: &str) -> Result<Sheet> {
    if bytes.is_empty() {
        return Err(AppError::DecodeError("uploaded file is empty".to_string()));
    }

    let lower = filename.to_ascii_lowercase();
    if bytes.starts_with(ZIP_MAGIC) || lower.ends_with(".xlsx") {
        return xlsx_parser::decode_xlsx(bytes);
    }
    if lower.ends_with(".csv") {
        return csv_parser::decode_csv(bytes);
    }

    // No extension hint and no workbook signature: accept text as CSV,
    // reject binary junk outright.
    if bytes.iter().take(512).any(|b| *b == 0) {
        return Err(AppError::DecodeError(
            "unrecognized spreadsheet format".to_string(),
        ));
    }
    csv_parser::decode_csv(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn xlsx_fixture(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                worksheet.write(r as u32, c as u16, *value).unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_decode_xlsx_rows() {
        let bytes = xlsx_fixture(&[
            &["First Name", "Last Name", "Email", "Roll Number"],
            &["Ada", "Lovelace", "ada@example.edu", "CS-101"],
            &["Grace", "Hopper", "grace@example.edu", "CS-102"],
        ]);

        let sheet = decode(&bytes, "students.xlsx").unwrap();
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.rows()[0].get("firstname"), Some("Ada"));
        assert_eq!(sheet.rows()[1].get("rollnumber"), Some("CS-102"));
    }

    #[test]
    fn test_decode_xlsx_skips_blank_rows_but_keeps_numbering() {
        let bytes = xlsx_fixture(&[
            &["Email"],
            &["a@example.edu"],
            &["", ""],
            &["b@example.edu"],
        ]);

        let sheet = decode(&bytes, "rows.xlsx").unwrap();
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.rows()[0].row_number(), 2);
        assert_eq!(sheet.rows()[1].row_number(), 4);
    }

    #[test]
    fn test_decode_dispatches_csv_by_extension() {
        let bytes = b"email,code\noffice@engc.edu,ENGC\n";
        let sheet = decode(bytes, "colleges.csv").unwrap();
        assert_eq!(sheet.row_count(), 1);
        assert_eq!(sheet.rows()[0].get("code"), Some("ENGC"));
    }

    #[test]
    fn test_decode_rejects_empty_buffer() {
        assert!(matches!(
            decode(b"", "empty.xlsx"),
            Err(AppError::DecodeError(_))
        ));
    }

    #[test]
    fn test_decode_rejects_binary_junk() {
        let junk = [0u8, 159, 146, 150, 0, 1, 2, 3];
        assert!(matches!(
            decode(&junk, "upload.bin"),
            Err(AppError::DecodeError(_))
        ));
    }

    #[test]
    fn test_decode_rejects_corrupt_workbook() {
        let mut bytes = xlsx_fixture(&[&["Email"], &["a@example.edu"]]);
        bytes.truncate(bytes.len() / 2);
        assert!(matches!(
            decode(&bytes, "broken.xlsx"),
            Err(AppError::DecodeError(_))
        ));
    }
}
