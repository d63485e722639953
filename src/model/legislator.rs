use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::cell::CellValue;
use super::column::Chamber;

/// The recorded outcome of one legislator on one action column.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LegislatorActionValue {
    pub score: CellValue,
    pub absent: bool,
    /// Only populated for cosponsorship columns (`<column>_cosponsor`)
    pub cosponsored: Option<bool>,
    pub not_in_office: bool,
}

impl LegislatorActionValue {
    pub fn scored(score: f64) -> Self {
        Self {
            score: CellValue::Numeric(score),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legislator {
    /// Bioguide id
    pub id: String,
    pub name: String,
    pub chamber: Chamber,
    /// State as it appears in the source (postal code or full name)
    pub state: String,
    /// `None` when the source has no district data, `Some("")` for at-large
    pub district: Option<String>,
    pub party: String,
    #[serde(default)]
    pub actions: HashMap<String, LegislatorActionValue>,
}

impl Legislator {
    pub fn new(id: impl Into<String>, chamber: Chamber, state: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            chamber,
            state: state.into(),
            district: None,
            party: String::new(),
            actions: HashMap::new(),
        }
    }

    /// Recorded value for a column; a legislator with no entry has a
    /// missing score and no flags set.
    pub fn value(&self, column_id: &str) -> LegislatorActionValue {
        self.actions.get(column_id).copied().unwrap_or_default()
    }

    pub fn with_value(mut self, column_id: &str, value: LegislatorActionValue) -> Self {
        self.actions.insert(column_id.to_string(), value);
        self
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Normalize party spellings ("democratic" -> "Democrat", "republican" -> "Republican").
pub fn party_label(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if raw.to_ascii_lowercase().starts_with("democ") {
        return "Democrat".to_string();
    }
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
