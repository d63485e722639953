use std::collections::HashMap;
use std::io::Read;

use super::table::{cell, Table};
use crate::model::{party_label, ActionColumn, CellValue, Chamber, Legislator, LegislatorActionValue};

/// Suffixes of the per-column flag columns in the score table
const ABSENT_SUFFIX: &str = "_absent";
const COSPONSOR_SUFFIX: &str = "_cosponsor";
const NOT_IN_OFFICE_SUFFIX: &str = "_not_in_office";

/// Read the wide score table: one row per legislator, one cell per column.
///
/// Rows without an id or with an unrecognized chamber are skipped with a
/// warning. Cells are normalized to [`CellValue`] here and nowhere else.
pub fn parse_legislators<R: Read>(
    reader: R,
    columns: &[ActionColumn],
) -> Result<Vec<Legislator>, csv::Error> {
    let table = Table::parse(reader)?;
    let has_district = table.has_column("district");

    let flags: Vec<ColumnFlags> = columns
        .iter()
        .map(|column| ColumnFlags::for_column(column, &table))
        .collect();

    let mut legislators = Vec::with_capacity(table.len());
    for (line, row) in table.rows().iter().enumerate() {
        let id = cell(row, "bioguide_id");
        if id.is_empty() {
            tracing::warn!(row = line + 1, "legislator row without bioguide_id, skipping");
            continue;
        }
        let Some(chamber) = Chamber::parse(cell(row, "chamber")) else {
            tracing::warn!(
                legislator = id,
                chamber = cell(row, "chamber"),
                "unrecognized chamber, skipping"
            );
            continue;
        };

        let mut legislator = Legislator::new(id, chamber, cell(row, "state"));
        legislator.name = cell(row, "full_name").to_string();
        legislator.party = party_label(cell(row, "party"));
        legislator.district = has_district.then(|| normalize_district(cell(row, "district")));
        legislator.actions = columns
            .iter()
            .zip(&flags)
            .map(|(column, flags)| (column.id.clone(), flags.read(&column.id, row)))
            .collect();

        legislators.push(legislator);
    }

    Ok(legislators)
}

/// Which optional flag columns exist for one action column
struct ColumnFlags {
    absent: Option<String>,
    cosponsor: Option<String>,
    not_in_office: Option<String>,
}

impl ColumnFlags {
    fn for_column(column: &ActionColumn, table: &Table) -> Self {
        let header = |suffix: &str| {
            let name = format!("{}{}", column.id, suffix);
            table.has_column(&name).then_some(name)
        };
        Self {
            absent: header(ABSENT_SUFFIX),
            cosponsor: header(COSPONSOR_SUFFIX),
            not_in_office: header(NOT_IN_OFFICE_SUFFIX),
        }
    }

    fn read(&self, column_id: &str, row: &HashMap<String, String>) -> LegislatorActionValue {
        let flag = |name: &Option<String>| {
            name.as_deref()
                .map(|n| CellValue::parse(cell(row, n)).is_set())
        };
        LegislatorActionValue {
            score: CellValue::parse(cell(row, column_id)),
            absent: flag(&self.absent).unwrap_or(false),
            cosponsored: flag(&self.cosponsor),
            not_in_office: flag(&self.not_in_office).unwrap_or(false),
        }
    }
}

/// District numbers sometimes arrive as floats ("7.0"); at-large stays empty
fn normalize_district(raw: &str) -> String {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("at-large") || raw.eq_ignore_ascii_case("AL") {
        return String::new();
    }
    match raw.parse::<f64>() {
        Ok(n) if n.fract() == 0.0 && n >= 0.0 => format!("{}", n as u32),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCORES: &str = "\
bioguide_id,full_name,party,state,chamber,district,HR_1,HR_1_absent,HR_2,HR_2_cosponsor,HR_2_not_in_office
A000001,Ann Example,democratic,CA,HOUSE,12.0,4,,0,1,
B000002,Bob Example,Republican,VT,house,,0,1,,,true
C000003,Cal Example,Independent,ME,SENATE,,2,,,0,
D000004,Dee Example,Democrat,NY,JOINT,,4,,,,
,Nobody,,TX,HOUSE,1,4,,,,
";

    fn columns() -> Vec<ActionColumn> {
        vec![ActionColumn::new("HR_1", 4.0), ActionColumn::new("HR_2", 6.0)]
    }

    #[test]
    fn test_parse_legislators() {
        let legislators = parse_legislators(SCORES.as_bytes(), &columns()).unwrap();
        assert_eq!(legislators.len(), 3);

        let ann = &legislators[0];
        assert_eq!(ann.name, "Ann Example");
        assert_eq!(ann.party, "Democrat");
        assert_eq!(ann.district.as_deref(), Some("12"));
        assert_eq!(ann.value("HR_1").score, CellValue::Numeric(4.0));
        assert!(!ann.value("HR_1").absent);
        assert_eq!(ann.value("HR_1").cosponsored, None);
        assert_eq!(ann.value("HR_2").cosponsored, Some(true));

        let bob = &legislators[1];
        assert_eq!(bob.chamber, Chamber::House);
        assert_eq!(bob.district.as_deref(), Some(""));
        assert!(bob.value("HR_1").absent);
        assert!(bob.value("HR_2").score.is_missing());
        assert!(bob.value("HR_2").not_in_office);

        let cal = &legislators[2];
        assert_eq!(cal.chamber, Chamber::Senate);
        assert_eq!(cal.value("HR_2").cosponsored, Some(false));
    }

    #[test]
    fn test_no_district_column() {
        let csv = "bioguide_id,chamber,state,HR_1\nA000001,HOUSE,CA,4\n";
        let legislators = parse_legislators(csv.as_bytes(), &columns()).unwrap();
        assert_eq!(legislators[0].district, None);
        assert!(legislators[0].value("HR_2").score.is_missing());
    }

    #[test]
    fn test_normalize_district() {
        assert_eq!(normalize_district("7.0"), "7");
        assert_eq!(normalize_district("12"), "12");
        assert_eq!(normalize_district(""), "");
        assert_eq!(normalize_district("At-Large"), "");
        assert_eq!(normalize_district("ZZ"), "ZZ");
    }
}
