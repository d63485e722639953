pub mod cell;
pub mod column;
pub mod legislator;

pub use cell::CellValue;
pub use column::{is_truthy, parse_categories, ActionColumn, ActionKind, Chamber, Position};
pub use legislator::{party_label, Legislator, LegislatorActionValue};
