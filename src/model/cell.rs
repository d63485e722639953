use serde::{Deserialize, Serialize};

/// A raw spreadsheet cell after normalization.
///
/// Every cell read from the wide score table is converted to this type once,
/// at load time, so that classification never has to guess whether it is
/// looking at a string, a number or an empty value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    #[default]
    Missing,
    Numeric(f64),
    Flag(bool),
}

impl CellValue {
    /// Parse a raw cell.
    ///
    /// Empty cells become `Missing`, boolean words become `Flag`, and anything
    /// else is read as a number. Text that is not a number is scored as 0.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return CellValue::Missing;
        }
        match s.to_ascii_lowercase().as_str() {
            "true" | "yes" => return CellValue::Flag(true),
            "false" | "no" => return CellValue::Flag(false),
            _ => {}
        }
        match s.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Numeric(n),
            _ => {
                tracing::debug!(cell = s, "unparseable score cell, treating as 0");
                CellValue::Numeric(0.0)
            }
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Numeric reading of the cell, `None` when missing.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Missing => None,
            CellValue::Numeric(n) => Some(*n),
            CellValue::Flag(true) => Some(1.0),
            CellValue::Flag(false) => Some(0.0),
        }
    }

    /// Numeric reading with missing treated as 0
    pub fn score(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }

    /// Truthiness for flag-like columns (`_absent`, `_cosponsor`, ...)
    pub fn is_set(&self) -> bool {
        match self {
            CellValue::Missing => false,
            CellValue::Numeric(n) => *n > 0.0,
            CellValue::Flag(b) => *b,
        }
    }
}
