use crate::model::Chamber;

/// Resolve the chamber a column applies to.
///
/// An explicit HOUSE/SENATE wins. A chamber field that is present but blank
/// (or holds anything else) means the column applies to both chambers. When
/// the metadata carries no chamber at all, the identifier's leading letter
/// decides: `H` for House, `S` for Senate.
///
/// `None` means "both chambers".
pub fn resolve_chamber(chamber_field: Option<&str>, identifier: &str) -> Option<Chamber> {
    match chamber_field {
        Some(field) => Chamber::parse(field),
        None => match identifier.trim_start().chars().next() {
            Some('H') => Some(Chamber::House),
            Some('S') => Some(Chamber::Senate),
            _ => None,
        },
    }
}
