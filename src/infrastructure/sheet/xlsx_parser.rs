use calamine::{Data, DataType, Reader, Xlsx};
use std::io::Cursor;

use crate::domain::error::{AppError, Result};
use crate::domain::sheet::{normalize_header, RowRecord, Sheet};

/// Decode an XLSX workbook from an in-memory buffer. Only the first
/// worksheet is read; the first row is the header.
pub(super) fn decode_xlsx(bytes: &[u8]) -> Result<Sheet> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| AppError::DecodeError(format!("Failed to open workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::DecodeError("Workbook has no worksheets".to_string()))?
        .map_err(|e| AppError::DecodeError(format!("Failed to read worksheet: {}", e)))?;

    let mut rows = range.rows();
    let header_cells = rows
        .next()
        .ok_or_else(|| AppError::DecodeError("Worksheet has no rows".to_string()))?;

    let headers: Vec<String> = header_cells
        .iter()
        .map(|cell| normalize_header(&cell_to_string(cell)))
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(AppError::DecodeError(
            "Worksheet has no header row".to_string(),
        ));
    }

    let records = rows
        .enumerate()
        .filter_map(|(index, row)| {
            let cells: Vec<String> = row.iter().map(cell_to_string).collect();
            if cells.iter().all(|c| c.trim().is_empty()) {
                None
            } else {
                Some(RowRecord::new(index, &headers, &cells))
            }
        })
        .collect();

    Ok(Sheet::new(headers, records))
}

fn cell_to_string(cell: &Data) -> String {
    cell.as_string()
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("{}", cell))
}
