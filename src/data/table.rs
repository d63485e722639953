use std::collections::{HashMap, HashSet};
use std::io::Read;

/// A CSV file read as header-keyed rows.
///
/// Rows keep every cell as text; callers normalize cells themselves so that
/// the distinction between an absent header and an empty cell survives.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: HashSet<String>,
    rows: Vec<HashMap<String, String>>,
}

impl Table {
    pub fn parse<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.deserialize::<HashMap<String, String>>() {
            rows.push(record?);
        }

        Ok(Self { headers, rows })
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.contains(name)
    }

    pub fn rows(&self) -> &[HashMap<String, String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Cell text, empty when the row has no such column
pub fn cell<'r>(row: &'r HashMap<String, String>, name: &str) -> &'r str {
    row.get(name).map(|s| s.as_str()).unwrap_or("")
}

/// Cell text, `None` when missing or blank
pub fn non_empty(row: &HashMap<String, String>, name: &str) -> Option<String> {
    let value = cell(row, name);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
