mod columns;
mod legislators;
mod table;

pub use columns::{fill_missing_points, parse_columns};
pub use legislators::parse_legislators;
pub use table::Table;

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

use crate::model::{ActionColumn, Legislator};
use crate::scoring::validate_columns;

/// Everything scoring needs, loaded from disk.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub columns: Vec<ActionColumn>,
    pub legislators: Vec<Legislator>,
}

impl Dataset {
    pub fn column(&self, id: &str) -> Option<&ActionColumn> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn legislator(&self, id: &str) -> Option<&Legislator> {
        self.legislators.iter().find(|l| l.id.eq_ignore_ascii_case(id))
    }
}

pub fn load_columns(path: &Path) -> Result<Vec<ActionColumn>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open column metadata at {}", path.display()))?;
    parse_columns(file)
        .with_context(|| format!("Failed to parse column metadata CSV {}", path.display()))
}

pub fn load_legislators(path: &Path, columns: &[ActionColumn]) -> Result<Vec<Legislator>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open score table at {}", path.display()))?;
    parse_legislators(file, columns)
        .with_context(|| format!("Failed to parse score table CSV {}", path.display()))
}

/// Load the metadata and score tables and fill in missing point values.
pub fn load_dataset(scores: &Path, metadata: &Path) -> Result<Dataset> {
    let mut columns = load_columns(metadata)?;
    let legislators = load_legislators(scores, &columns)?;
    fill_missing_points(&mut columns, &legislators);

    if let Err(problems) = validate_columns(&columns) {
        for problem in problems {
            tracing::warn!("{}", problem);
        }
    }

    tracing::debug!(
        columns = columns.len(),
        legislators = legislators.len(),
        "dataset loaded"
    );

    Ok(Dataset { columns, legislators })
}
