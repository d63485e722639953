use serde::Serialize;
use std::collections::BTreeMap;

use super::districts::district_key;
use super::fips::state_fips;
use crate::model::{ActionColumn, Chamber, Legislator};
use crate::scoring::{classify, Outcome, PairIndex};

/// A single legislator's stance on one bill, for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    Favorable,
    Unfavorable,
}

impl Stance {
    /// Present counts with favorable; anything not acted on has no stance
    pub fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::Favorable | Outcome::Partial => Some(Stance::Favorable),
            Outcome::Unfavorable => Some(Stance::Unfavorable),
            Outcome::NotApplicable | Outcome::Absent | Outcome::Waived => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateStance {
    BothFavorable,
    Split,
    BothUnfavorable,
}

impl StateStance {
    /// Bucket for a state's senator stances. A state with a single data
    /// point takes that senator's bucket.
    pub fn from_counts(favorable: usize, unfavorable: usize) -> Option<Self> {
        match (favorable, unfavorable) {
            (0, 0) => None,
            (_, 0) => Some(StateStance::BothFavorable),
            (0, _) => Some(StateStance::BothUnfavorable),
            _ => Some(StateStance::Split),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BillMapSummary {
    pub favorable: usize,
    pub unfavorable: usize,
    pub split: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillMap {
    pub column_id: String,
    pub chamber: Chamber,
    /// House: district key -> stance. Senate: state FIPS -> stance.
    pub districts: BTreeMap<String, Stance>,
    pub states: BTreeMap<String, StateStance>,
    pub summary: BillMapSummary,
}

fn counts(stances: &[Stance]) -> (usize, usize) {
    let favorable = stances.iter().filter(|s| **s == Stance::Favorable).count();
    (favorable, stances.len() - favorable)
}

/// Color the map for one column.
///
/// The chamber comes from the column. A column that applies to both
/// chambers is drawn for `fallback`.
pub fn bill_map(
    legislators: &[Legislator],
    column: &ActionColumn,
    pairs: &PairIndex<'_>,
    fallback: Chamber,
) -> BillMap {
    let chamber = column.chamber().unwrap_or(fallback);

    let mut by_unit: BTreeMap<String, Vec<Stance>> = BTreeMap::new();
    for legislator in legislators.iter().filter(|l| l.chamber == chamber) {
        let Some(stance) = Stance::from_outcome(classify(legislator, column, pairs)) else {
            continue;
        };
        let key = match chamber {
            Chamber::House => {
                district_key(&legislator.state, legislator.district.as_deref().unwrap_or_default())
            }
            Chamber::Senate => state_fips(&legislator.state).map(String::from),
        };
        match key {
            Some(key) => by_unit.entry(key).or_default().push(stance),
            None => tracing::warn!(
                legislator = %legislator.id,
                state = %legislator.state,
                "unknown state, left off the bill map"
            ),
        }
    }

    let mut map = BillMap {
        column_id: column.id.clone(),
        chamber,
        districts: BTreeMap::new(),
        states: BTreeMap::new(),
        summary: BillMapSummary::default(),
    };

    for (key, stances) in by_unit {
        let (favorable, unfavorable) = counts(&stances);
        match chamber {
            Chamber::House => {
                if favorable > 0 && unfavorable > 0 {
                    tracing::warn!(district = %key, "conflicting stances in one district, using the last");
                }
                if let Some(stance) = stances.last().copied() {
                    match stance {
                        Stance::Favorable => map.summary.favorable += 1,
                        Stance::Unfavorable => map.summary.unfavorable += 1,
                    }
                    map.districts.insert(key, stance);
                }
            }
            Chamber::Senate => {
                if let Some(stance) = StateStance::from_counts(favorable, unfavorable) {
                    match stance {
                        StateStance::BothFavorable => map.summary.favorable += 1,
                        StateStance::Split => map.summary.split += 1,
                        StateStance::BothUnfavorable => map.summary.unfavorable += 1,
                    }
                    map.states.insert(key, stance);
                }
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LegislatorActionValue;

    fn senate_column() -> ActionColumn {
        let mut column = ActionColumn::new("S_J_Res_10", 4.0);
        column.chamber_field = Some("SENATE".to_string());
        column
    }

    fn senator(id: &str, state: &str, score: f64) -> Legislator {
        Legislator::new(id, Chamber::Senate, state)
            .with_value("S_J_Res_10", LegislatorActionValue::scored(score))
    }

    #[test]
    fn test_state_stance_buckets() {
        assert_eq!(StateStance::from_counts(2, 0), Some(StateStance::BothFavorable));
        assert_eq!(StateStance::from_counts(1, 1), Some(StateStance::Split));
        assert_eq!(StateStance::from_counts(0, 2), Some(StateStance::BothUnfavorable));
        assert_eq!(StateStance::from_counts(1, 0), Some(StateStance::BothFavorable));
        assert_eq!(StateStance::from_counts(0, 1), Some(StateStance::BothUnfavorable));
        assert_eq!(StateStance::from_counts(0, 0), None);
    }

    #[test]
    fn test_senate_bill_map() {
        let columns = vec![senate_column()];
        let pairs = PairIndex::build(&columns);
        let absent = Legislator::new("S6", Chamber::Senate, "TX").with_value(
            "S_J_Res_10",
            LegislatorActionValue {
                absent: true,
                ..Default::default()
            },
        );
        let legislators = vec![
            senator("S1", "VT", 4.0),
            senator("S2", "VT", 4.0),
            senator("S3", "ME", 4.0),
            senator("S4", "ME", 0.0),
            senator("S5", "TX", 0.0),
            absent,
            Legislator::new("H1", Chamber::House, "CA"),
        ];

        let map = bill_map(&legislators, &columns[0], &pairs, Chamber::House);
        assert_eq!(map.chamber, Chamber::Senate);
        assert_eq!(map.states.get("50"), Some(&StateStance::BothFavorable));
        assert_eq!(map.states.get("23"), Some(&StateStance::Split));
        assert_eq!(map.states.get("48"), Some(&StateStance::BothUnfavorable));
        assert_eq!(
            map.summary,
            BillMapSummary {
                favorable: 1,
                unfavorable: 1,
                split: 1
            }
        );
        assert!(map.districts.is_empty());
    }

    #[test]
    fn test_house_bill_map() {
        let mut column = ActionColumn::new("HR_1", 4.0);
        column.chamber_field = None;
        let columns = vec![column];
        let pairs = PairIndex::build(&columns);

        let mut good = Legislator::new("H1", Chamber::House, "CA")
            .with_value("HR_1", LegislatorActionValue::scored(2.0));
        good.district = Some("12".to_string());
        let mut bad = Legislator::new("H2", Chamber::House, "VT")
            .with_value("HR_1", LegislatorActionValue::scored(0.0));
        bad.district = Some(String::new());
        let unscored = Legislator::new("H3", Chamber::House, "NY").with_value(
            "HR_1",
            LegislatorActionValue {
                not_in_office: true,
                ..Default::default()
            },
        );

        let map = bill_map(&[good, bad, unscored], &columns[0], &pairs, Chamber::Senate);
        assert_eq!(map.chamber, Chamber::House);
        assert_eq!(map.districts.get("0612"), Some(&Stance::Favorable));
        assert_eq!(map.districts.get("5000"), Some(&Stance::Unfavorable));
        assert_eq!(map.districts.len(), 2);
        assert_eq!(map.summary.favorable, 1);
        assert_eq!(map.summary.unfavorable, 1);
    }
}
