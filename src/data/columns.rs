use std::collections::HashMap;
use std::io::Read;

use super::table::{cell, non_empty, Table};
use crate::model::{
    is_truthy, parse_categories, ActionColumn, ActionKind, Legislator, Position,
};

/// Build action columns from the metadata table.
///
/// Metadata never fails to load: malformed fields fall back to defaults.
/// Rows without a column id are skipped.
pub fn parse_columns<R: Read>(reader: R) -> Result<Vec<ActionColumn>, csv::Error> {
    let table = Table::parse(reader)?;
    let has_chamber = table.has_column("chamber");

    let mut columns = Vec::new();
    for row in table.rows() {
        let id = cell(row, "column");
        if id.is_empty() {
            tracing::debug!("metadata row without a column id, skipping");
            continue;
        }
        columns.push(column_from_row(id, row, has_chamber));
    }
    Ok(columns)
}

fn column_from_row(id: &str, row: &HashMap<String, String>, has_chamber: bool) -> ActionColumn {
    let points = match cell(row, "points") {
        "" => 0.0,
        raw => raw.parse::<f64>().ok().filter(|n| n.is_finite()).unwrap_or_else(|| {
            tracing::debug!(column = id, points = raw, "unparseable point value, using 0");
            0.0
        }),
    };

    ActionColumn {
        id: id.to_string(),
        chamber_field: has_chamber.then(|| cell(row, "chamber").to_string()),
        kind: ActionKind::resolve(cell(row, "type"), cell(row, "action_types")),
        position: Position::parse(cell(row, "position_to_score")),
        points,
        pair_key: non_empty(row, "pair_key"),
        preferred: is_truthy(cell(row, "preferred")),
        sponsor_id: non_empty(row, "sponsor_bioguide_id"),
        categories: parse_categories(cell(row, "categories")),
        no_cosponsor_benefit: is_truthy(cell(row, "no_cosponsor_benefit")),
        bill_number: non_empty(row, "bill_number"),
        short_title: non_empty(row, "short_title"),
    }
}

/// Columns with no usable point value take the highest score any
/// legislator recorded on them.
pub fn fill_missing_points(columns: &mut [ActionColumn], legislators: &[Legislator]) {
    for column in columns.iter_mut().filter(|c| c.points <= 0.0) {
        let observed = legislators
            .iter()
            .filter_map(|l| l.actions.get(&column.id))
            .filter_map(|v| v.score.as_number())
            .fold(0.0_f64, f64::max);
        if observed > 0.0 {
            tracing::debug!(column = %column.id, points = observed, "point value taken from scores");
            column.points = observed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chamber, LegislatorActionValue};

    const METADATA: &str = "\
column,type,action_types,chamber,position_to_score,categories,pair_key,preferred,points,sponsor_bioguide_id,no_cosponsor_benefit,bill_number,short_title
H_Con_Res_38,BILL,cosponsor,HOUSE,SUPPORT,Iran; War Powers,war_powers,TRUE,10,M000001,,H.Con.Res. 38,War Powers Resolution
HR_9,BILL,vote,,OPPOSE,Gaza,,,four,,yes,H.R. 9,
Committee_Vote,MANUAL,,SENATE,support,,,,2,,,,
,BILL,vote,,,,,,,,,,
";

    #[test]
    fn test_parse_columns() {
        let columns = parse_columns(METADATA.as_bytes()).unwrap();
        assert_eq!(columns.len(), 3);

        let pref = &columns[0];
        assert_eq!(pref.kind, ActionKind::Cosponsor);
        assert_eq!(pref.chamber(), Some(Chamber::House));
        assert_eq!(pref.position, Position::Support);
        assert_eq!(pref.categories, vec!["Iran", "War Powers"]);
        assert_eq!(pref.pair_key.as_deref(), Some("war_powers"));
        assert!(pref.preferred);
        assert_eq!(pref.points, 10.0);
        assert!(pref.is_sponsor("M000001"));
        assert_eq!(pref.label(), "War Powers Resolution");

        let vote = &columns[1];
        assert_eq!(vote.kind, ActionKind::Vote);
        assert_eq!(vote.chamber_field.as_deref(), Some(""));
        assert_eq!(vote.chamber(), None);
        assert_eq!(vote.points, 0.0);
        assert!(vote.no_cosponsor_benefit);
        assert_eq!(vote.label(), "H.R. 9");

        let manual = &columns[2];
        assert_eq!(manual.kind, ActionKind::Manual);
        assert_eq!(manual.chamber(), Some(Chamber::Senate));
        assert_eq!(manual.position, Position::Support);
    }

    #[test]
    fn test_chamber_inferred_without_header() {
        let csv = "column,points\nS_J_Res_1,4\nHR_2,2\nAmdt_3,1\n";
        let columns = parse_columns(csv.as_bytes()).unwrap();
        assert_eq!(columns[0].chamber_field, None);
        assert_eq!(columns[0].chamber(), Some(Chamber::Senate));
        assert_eq!(columns[1].chamber(), Some(Chamber::House));
        assert_eq!(columns[2].chamber(), None);
    }

    #[test]
    fn test_fill_missing_points() {
        let mut columns = vec![ActionColumn::new("HR_1", 0.0), ActionColumn::new("HR_2", 3.0)];
        let legislators = vec![
            Legislator::new("A", Chamber::House, "CA")
                .with_value("HR_1", LegislatorActionValue::scored(2.0))
                .with_value("HR_2", LegislatorActionValue::scored(5.0)),
            Legislator::new("B", Chamber::House, "CA")
                .with_value("HR_1", LegislatorActionValue::scored(4.0)),
        ];
        fill_missing_points(&mut columns, &legislators);
        assert_eq!(columns[0].points, 4.0);
        assert_eq!(columns[1].points, 3.0);
    }
}
