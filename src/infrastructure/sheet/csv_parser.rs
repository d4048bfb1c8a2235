use csv::ReaderBuilder;
use encoding_rs::{Encoding, UTF_8};

use crate::domain::error::{AppError, Result};
use crate::domain::sheet::{normalize_header, RowRecord, Sheet};

/// Decode a CSV buffer. Encoding is sniffed from the BOM when present,
/// otherwise the buffer is decoded as UTF-8 with lossy fallback so a stray
/// byte never aborts the batch on its own.
pub(super) fn decode_csv(bytes: &[u8]) -> Result<Sheet> {
    let text = decode_text(bytes);

    let mut reader = ReaderBuilder::new()
        .flexible(true) // allow rows with different lengths
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::DecodeError(format!("Failed to read CSV headers: {}", e)))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(AppError::DecodeError("CSV has no header row".to_string()));
    }

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            AppError::DecodeError(format!("Failed to parse CSV row {}: {}", index + 2, e))
        })?;

        let cells: Vec<String> = record.iter().map(|c| c.to_string()).collect();
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        records.push(RowRecord::new(index, &headers, &cells));
    }

    Ok(Sheet::new(headers, records))
}

fn decode_text(bytes: &[u8]) -> String {
    match Encoding::for_bom(bytes) {
        Some((encoding, _bom_len)) => encoding.decode(bytes).0.into_owned(),
        None => UTF_8.decode(bytes).0.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple_csv() {
        let content = b"First Name,Last Name,Email,Roll Number\nAda,Lovelace,ada@example.edu,CS-101\n";
        let sheet = decode_csv(content).unwrap();

        assert_eq!(sheet.row_count(), 1);
        assert_eq!(sheet.headers().len(), 4);
        assert_eq!(sheet.rows()[0].get("email"), Some("ada@example.edu"));
    }

    #[test]
    fn test_decode_csv_with_utf8_bom() {
        let mut content = vec![0xEF, 0xBB, 0xBF];
        content.extend_from_slice(b"email,code\noffice@engc.edu,ENGC\n");
        let sheet = decode_csv(&content).unwrap();

        assert_eq!(sheet.headers()[0], "email");
        assert_eq!(sheet.rows()[0].get("email"), Some("office@engc.edu"));
    }

    #[test]
    fn test_decode_csv_skips_blank_lines_keeps_numbering() {
        let content = b"email\na@example.edu\n,\nb@example.edu\n";
        let sheet = decode_csv(content).unwrap();

        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.rows()[1].row_number(), 4);
    }

    #[test]
    fn test_decode_csv_without_header_fails() {
        assert!(matches!(
            decode_csv(b""),
            Err(AppError::DecodeError(_))
        ));
    }
}
