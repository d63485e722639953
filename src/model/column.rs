use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scoring::chamber::resolve_chamber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Chamber {
    House,
    Senate,
}

impl Chamber {
    /// Parse "HOUSE" / "SENATE" in any case. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HOUSE" => Some(Chamber::House),
            "SENATE" => Some(Chamber::Senate),
            _ => None,
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chamber::House => write!(f, "HOUSE"),
            Chamber::Senate => write!(f, "SENATE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Vote,
    Cosponsor,
    Manual,
}

impl ActionKind {
    /// Resolve the kind from the metadata `type` and `action_types` fields.
    ///
    /// `type = MANUAL` wins; otherwise an `action_types` mentioning
    /// "cosponsor" marks a cosponsorship column and everything else is a vote.
    pub fn resolve(type_tag: &str, action_types: &str) -> Self {
        if type_tag.trim().eq_ignore_ascii_case("MANUAL") {
            ActionKind::Manual
        } else if action_types.to_ascii_lowercase().contains("cosponsor") {
            ActionKind::Cosponsor
        } else {
            ActionKind::Vote
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    Support,
    Oppose,
}

impl Position {
    /// Only an explicit "SUPPORT" counts as support.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("SUPPORT") {
            Position::Support
        } else {
            Position::Oppose
        }
    }
}

/// One scored bill or manual action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionColumn {
    /// Column key in the wide score table
    pub id: String,
    /// Raw chamber field: `None` when the metadata has no chamber at all,
    /// `Some("")` when it is present but blank
    pub chamber_field: Option<String>,
    pub kind: ActionKind,
    pub position: Position,
    /// Maximum achievable points for this column
    pub points: f64,
    pub pair_key: Option<String>,
    pub preferred: bool,
    /// Bioguide id of the bill's sponsor
    pub sponsor_id: Option<String>,
    pub categories: Vec<String>,
    /// Not cosponsoring an opposed bill is neutral rather than rewarded
    pub no_cosponsor_benefit: bool,
    pub bill_number: Option<String>,
    pub short_title: Option<String>,
}

impl ActionColumn {
    /// A vote column that applies to both chambers, for building fixtures
    /// and for callers that only know an id and a point value.
    pub fn new(id: impl Into<String>, points: f64) -> Self {
        Self {
            id: id.into(),
            chamber_field: Some(String::new()),
            kind: ActionKind::Vote,
            position: Position::Support,
            points,
            pair_key: None,
            preferred: false,
            sponsor_id: None,
            categories: Vec::new(),
            no_cosponsor_benefit: false,
            bill_number: None,
            short_title: None,
        }
    }

    /// Effective chamber, `None` meaning the column applies to both chambers
    pub fn chamber(&self) -> Option<Chamber> {
        resolve_chamber(self.chamber_field.as_deref(), &self.id)
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Label for display: short title, then bill number, then the raw id
    pub fn label(&self) -> &str {
        self.short_title
            .as_deref()
            .or(self.bill_number.as_deref())
            .unwrap_or(&self.id)
    }

    pub fn is_sponsor(&self, legislator_id: &str) -> bool {
        match self.sponsor_id.as_deref() {
            Some(sponsor) => !sponsor.is_empty() && sponsor == legislator_id,
            None => false,
        }
    }
}

/// Split a semicolon-delimited category list ("Iran; War Powers").
pub fn parse_categories(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// CSV-tolerant truthiness: `true`, `yes`, or any nonzero number.
pub fn is_truthy(raw: &str) -> bool {
    let s = raw.trim().to_ascii_lowercase();
    if s == "true" || s == "yes" {
        return true;
    }
    s.parse::<f64>().map(|n| n != 0.0 && !n.is_nan()).unwrap_or(false)
}
