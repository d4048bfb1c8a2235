use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rows are reported with 1-based spreadsheet numbering, header on row 1.
const HEADER_ROW_OFFSET: usize = 2;

/// Normalize a column header so that `First Name`, `firstName` and
/// `first_name` all address the same logical column: lowercase, keep
/// alphanumerics only.
pub fn normalize_header(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// One decoded spreadsheet row: a mapping of normalized column name to the
/// trimmed raw cell value. Empty cells are dropped, so `get` returning
/// `None` means "column absent or blank". Created at decode time, consumed
/// exactly once by the row processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowRecord {
    /// 0-based data row index; drives row-number reporting.
    pub index: usize,
    values: HashMap<String, String>,
}

impl RowRecord {
    pub fn new(index: usize, headers: &[String], cells: &[String]) -> Self {
        let values = headers
            .iter()
            .zip(cells.iter())
            .map(|(h, c)| (h.clone(), c.trim().to_string()))
            .filter(|(h, c)| !h.is_empty() && !c.is_empty())
            .collect();

        Self { index, values }
    }

    /// Look up a cell by normalized column name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    /// 1-based spreadsheet row number including the header offset.
    pub fn row_number(&self) -> usize {
        self.index + HEADER_ROW_OFFSET
    }

    /// The row as a JSON object, echoed back in error outcomes so callers
    /// can see exactly what was rejected.
    pub fn raw_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        serde_json::Value::Object(map)
    }
}

/// A fully decoded spreadsheet: normalized header plus ordered data rows.
#[derive(Debug, Clone)]
pub struct Sheet {
    headers: Vec<String>,
    rows: Vec<RowRecord>,
}

impl Sheet {
    pub fn new(headers: Vec<String>, rows: Vec<RowRecord>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| normalize_header(n)).collect()
    }

    #[test]
    fn test_normalize_header_variants() {
        assert_eq!(normalize_header("First Name"), "firstname");
        assert_eq!(normalize_header("firstName"), "firstname");
        assert_eq!(normalize_header("first_name"), "firstname");
        assert_eq!(normalize_header("Roll Number "), "rollnumber");
        assert_eq!(normalize_header("E-Mail"), "email");
    }

    #[test]
    fn test_row_record_trims_and_drops_empty_cells() {
        let hs = headers(&["First Name", "Email", "Password"]);
        let record = RowRecord::new(
            0,
            &hs,
            &[" Ada ".to_string(), "".to_string(), "  ".to_string()],
        );

        assert_eq!(record.get("firstname"), Some("Ada"));
        assert_eq!(record.get("email"), None);
        assert_eq!(record.get("password"), None);
    }

    #[test]
    fn test_row_number_includes_header_offset() {
        let hs = headers(&["Email"]);
        let record = RowRecord::new(0, &hs, &["a@b.edu".to_string()]);
        assert_eq!(record.row_number(), 2);

        let record = RowRecord::new(4, &hs, &["a@b.edu".to_string()]);
        assert_eq!(record.row_number(), 6);
    }

    #[test]
    fn test_raw_json_echoes_values() {
        let hs = headers(&["Email", "Code"]);
        let record = RowRecord::new(0, &hs, &["a@b.edu".to_string(), "CSE".to_string()]);
        let json = record.raw_json();
        assert_eq!(json["email"], "a@b.edu");
        assert_eq!(json["code"], "CSE");
    }
}
