use serde::{Deserialize, Serialize};
use std::fmt;

use super::pairs::PairIndex;
use crate::model::{ActionColumn, ActionKind, CellValue, Legislator, Position};

/// What a legislator's record on one column amounts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Other chamber, not eligible, or not in office
    NotApplicable,
    /// Did not vote
    Absent,
    /// Excused because the preferred member of the pair was backed
    Waived,
    Favorable,
    /// Voted present
    Partial,
    Unfavorable,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::NotApplicable => "Not applicable",
            Outcome::Absent => "Absent",
            Outcome::Waived => "Waived",
            Outcome::Favorable => "Favorable",
            Outcome::Partial => "Present",
            Outcome::Unfavorable => "Unfavorable",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Raw signals for one legislator on one column, with sponsorship and
/// cosponsorship already merged into `backed`.
#[derive(Debug, Clone, Copy)]
struct Signals {
    score: CellValue,
    backed: bool,
}

impl Signals {
    fn read(legislator: &Legislator, column: &ActionColumn) -> Self {
        let value = legislator.value(&column.id);
        Self {
            score: value.score,
            backed: value.cosponsored == Some(true) || column.is_sponsor(&legislator.id),
        }
    }
}

/// Cosponsorship of an opposed bill where staying off it only avoids a
/// penalty: not cosponsoring is favorable but earns nothing.
pub fn is_neutral_abstention(column: &ActionColumn) -> bool {
    column.kind == ActionKind::Cosponsor
        && column.no_cosponsor_benefit
        && column.position == Position::Oppose
}

fn is_favorable(column: &ActionColumn, signals: &Signals) -> bool {
    if is_neutral_abstention(column) {
        return !signals.backed;
    }
    signals.score.score() > 0.0 || (column.position == Position::Support && signals.backed)
}

fn is_partial(column: &ActionColumn, signals: &Signals) -> bool {
    if column.kind != ActionKind::Vote {
        return false;
    }
    let score = signals.score.score();
    score > 0.0 && score < column.points
}

fn is_waived(
    legislator: &Legislator,
    column: &ActionColumn,
    signals: &Signals,
    pairs: &PairIndex<'_>,
) -> bool {
    let Some(preferred) = pairs.preferred_partner(column) else {
        return false;
    };
    // Satisfying both members earns credit on both rather than a waiver.
    if is_favorable(column, signals) {
        return false;
    }
    let sponsors_preferred =
        preferred.position == Position::Support && preferred.is_sponsor(&legislator.id);
    sponsors_preferred || classify(legislator, preferred, pairs) == Outcome::Favorable
}

/// Classify one legislator's record on one column.
///
/// Checks run in a fixed order: eligibility, then absence, then the pair
/// waiver, then partial credit, then favorable/unfavorable. Absence must be
/// seen before the score, since an absent member also carries a zero.
pub fn classify(legislator: &Legislator, column: &ActionColumn, pairs: &PairIndex<'_>) -> Outcome {
    let value = legislator.value(&column.id);

    if let Some(chamber) = column.chamber() {
        if chamber != legislator.chamber {
            return Outcome::NotApplicable;
        }
    }
    if column.kind == ActionKind::Manual && value.score.is_missing() {
        return Outcome::NotApplicable;
    }
    if value.not_in_office {
        return Outcome::NotApplicable;
    }
    if value.absent {
        return Outcome::Absent;
    }

    let signals = Signals::read(legislator, column);

    if is_waived(legislator, column, &signals, pairs) {
        return Outcome::Waived;
    }
    if is_partial(column, &signals) {
        return Outcome::Partial;
    }
    if is_favorable(column, &signals) {
        Outcome::Favorable
    } else {
        Outcome::Unfavorable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chamber, LegislatorActionValue};

    fn house_member() -> Legislator {
        Legislator::new("M000001", Chamber::House, "CA")
    }

    fn with_score(legislator: Legislator, column: &str, score: f64) -> Legislator {
        legislator.with_value(column, LegislatorActionValue::scored(score))
    }

    fn column(id: &str, points: f64) -> ActionColumn {
        ActionColumn::new(id, points)
    }

    #[test]
    fn test_other_chamber_not_applicable() {
        let mut col = column("HR_1", 4.0);
        col.chamber_field = Some("HOUSE".to_string());
        let columns = vec![col];
        let pairs = PairIndex::build(&columns);

        for score in [0.0, 2.0, 4.0] {
            let senator = with_score(Legislator::new("S000001", Chamber::Senate, "VT"), "HR_1", score);
            assert_eq!(classify(&senator, &columns[0], &pairs), Outcome::NotApplicable);
        }
    }

    #[test]
    fn test_chamber_inferred_from_id() {
        let mut col = column("S_Res_5", 4.0);
        col.chamber_field = None;
        let columns = vec![col];
        let pairs = PairIndex::build(&columns);

        let member = with_score(house_member(), "S_Res_5", 4.0);
        assert_eq!(classify(&member, &columns[0], &pairs), Outcome::NotApplicable);
    }

    #[test]
    fn test_manual_missing_score_not_applicable() {
        let mut col = column("Committee_Vote", 4.0);
        col.kind = ActionKind::Manual;
        let columns = vec![col];
        let pairs = PairIndex::build(&columns);

        assert_eq!(classify(&house_member(), &columns[0], &pairs), Outcome::NotApplicable);

        let member = with_score(house_member(), "Committee_Vote", 0.0);
        assert_eq!(classify(&member, &columns[0], &pairs), Outcome::Unfavorable);
    }

    #[test]
    fn test_not_in_office() {
        let columns = vec![column("HR_1", 4.0)];
        let pairs = PairIndex::build(&columns);
        let member = house_member().with_value(
            "HR_1",
            LegislatorActionValue {
                score: CellValue::Numeric(0.0),
                not_in_office: true,
                ..Default::default()
            },
        );
        assert_eq!(classify(&member, &columns[0], &pairs), Outcome::NotApplicable);
    }

    #[test]
    fn test_absent_beats_zero_score() {
        let columns = vec![column("HR_1", 4.0)];
        let pairs = PairIndex::build(&columns);
        let member = house_member().with_value(
            "HR_1",
            LegislatorActionValue {
                score: CellValue::Numeric(0.0),
                absent: true,
                ..Default::default()
            },
        );
        assert_eq!(classify(&member, &columns[0], &pairs), Outcome::Absent);
    }

    #[test]
    fn test_partial_vote() {
        let columns = vec![column("HR_1", 4.0)];
        let pairs = PairIndex::build(&columns);
        let member = with_score(house_member(), "HR_1", 2.0);
        assert_eq!(classify(&member, &columns[0], &pairs), Outcome::Partial);
    }

    #[test]
    fn test_partial_only_for_votes() {
        let mut col = column("HR_1", 4.0);
        col.kind = ActionKind::Manual;
        let columns = vec![col];
        let pairs = PairIndex::build(&columns);
        let member = with_score(house_member(), "HR_1", 2.0);
        assert_eq!(classify(&member, &columns[0], &pairs), Outcome::Favorable);
    }

    #[test]
    fn test_favorable_and_unfavorable() {
        let columns = vec![column("HR_1", 4.0)];
        let pairs = PairIndex::build(&columns);

        let good = with_score(house_member(), "HR_1", 4.0);
        assert_eq!(classify(&good, &columns[0], &pairs), Outcome::Favorable);

        let bad = with_score(house_member(), "HR_1", 0.0);
        assert_eq!(classify(&bad, &columns[0], &pairs), Outcome::Unfavorable);
    }

    #[test]
    fn test_missing_vote_score_is_unfavorable() {
        let columns = vec![column("HR_1", 4.0)];
        let pairs = PairIndex::build(&columns);
        assert_eq!(classify(&house_member(), &columns[0], &pairs), Outcome::Unfavorable);
    }

    #[test]
    fn test_no_cosponsor_benefit_opposed_bill() {
        let mut col = column("HR_9", 4.0);
        col.kind = ActionKind::Cosponsor;
        col.position = Position::Oppose;
        col.no_cosponsor_benefit = true;
        let columns = vec![col];
        let pairs = PairIndex::build(&columns);

        let stayed_off = house_member().with_value(
            "HR_9",
            LegislatorActionValue {
                score: CellValue::Numeric(0.0),
                cosponsored: Some(false),
                ..Default::default()
            },
        );
        assert_eq!(classify(&stayed_off, &columns[0], &pairs), Outcome::Favorable);

        let signed_on = house_member().with_value(
            "HR_9",
            LegislatorActionValue {
                score: CellValue::Numeric(0.0),
                cosponsored: Some(true),
                ..Default::default()
            },
        );
        assert_eq!(classify(&signed_on, &columns[0], &pairs), Outcome::Unfavorable);
    }

    #[test]
    fn test_opposed_cosponsor_without_flag_uses_score() {
        let mut col = column("HR_9", 4.0);
        col.kind = ActionKind::Cosponsor;
        col.position = Position::Oppose;
        let columns = vec![col];
        let pairs = PairIndex::build(&columns);

        let stayed_off = house_member().with_value(
            "HR_9",
            LegislatorActionValue {
                score: CellValue::Numeric(0.0),
                cosponsored: Some(false),
                ..Default::default()
            },
        );
        assert_eq!(classify(&stayed_off, &columns[0], &pairs), Outcome::Unfavorable);
    }

    #[test]
    fn test_sponsor_counts_as_cosponsor() {
        let mut col = column("HR_2", 6.0);
        col.kind = ActionKind::Cosponsor;
        col.sponsor_id = Some("M000001".to_string());
        let columns = vec![col];
        let pairs = PairIndex::build(&columns);

        let sponsor = with_score(house_member(), "HR_2", 0.0);
        assert_eq!(classify(&sponsor, &columns[0], &pairs), Outcome::Favorable);
    }

    fn pair_columns() -> Vec<ActionColumn> {
        let mut preferred = column("H_Con_Res_38", 10.0);
        preferred.kind = ActionKind::Cosponsor;
        preferred.pair_key = Some("war_powers".to_string());
        preferred.preferred = true;

        let mut other = column("H_Con_Res_40", 3.0);
        other.kind = ActionKind::Cosponsor;
        other.pair_key = Some("war_powers".to_string());

        vec![preferred, other]
    }

    fn cosponsor(score: f64, cosponsored: bool) -> LegislatorActionValue {
        LegislatorActionValue {
            score: CellValue::Numeric(score),
            cosponsored: Some(cosponsored),
            ..Default::default()
        }
    }

    #[test]
    fn test_waiver_when_preferred_backed() {
        let columns = pair_columns();
        let pairs = PairIndex::build(&columns);
        let member = house_member()
            .with_value("H_Con_Res_38", cosponsor(10.0, true))
            .with_value("H_Con_Res_40", cosponsor(0.0, false));

        assert_eq!(classify(&member, &columns[0], &pairs), Outcome::Favorable);
        assert_eq!(classify(&member, &columns[1], &pairs), Outcome::Waived);
    }

    #[test]
    fn test_backing_both_earns_both() {
        let columns = pair_columns();
        let pairs = PairIndex::build(&columns);
        let member = house_member()
            .with_value("H_Con_Res_38", cosponsor(10.0, true))
            .with_value("H_Con_Res_40", cosponsor(3.0, true));

        assert_eq!(classify(&member, &columns[1], &pairs), Outcome::Favorable);
    }

    #[test]
    fn test_no_waiver_without_preferred() {
        let columns = pair_columns();
        let pairs = PairIndex::build(&columns);
        let member = house_member()
            .with_value("H_Con_Res_38", cosponsor(0.0, false))
            .with_value("H_Con_Res_40", cosponsor(0.0, false));

        assert_eq!(classify(&member, &columns[0], &pairs), Outcome::Unfavorable);
        assert_eq!(classify(&member, &columns[1], &pairs), Outcome::Unfavorable);
    }

    #[test]
    fn test_sponsor_of_preferred_waives() {
        let mut columns = pair_columns();
        columns[0].sponsor_id = Some("M000001".to_string());
        let pairs = PairIndex::build(&columns);
        let member = house_member()
            .with_value("H_Con_Res_38", LegislatorActionValue::scored(0.0))
            .with_value("H_Con_Res_40", cosponsor(0.0, false));

        assert_eq!(classify(&member, &columns[0], &pairs), Outcome::Favorable);
        assert_eq!(classify(&member, &columns[1], &pairs), Outcome::Waived);
    }

    #[test]
    fn test_absence_precedes_waiver() {
        let columns = pair_columns();
        let pairs = PairIndex::build(&columns);
        let member = house_member()
            .with_value("H_Con_Res_38", cosponsor(10.0, true))
            .with_value(
                "H_Con_Res_40",
                LegislatorActionValue {
                    absent: true,
                    ..Default::default()
                },
            );
        assert_eq!(classify(&member, &columns[1], &pairs), Outcome::Absent);
    }

    #[test]
    fn test_unpaired_never_waived() {
        let columns = vec![column("A", 4.0), column("B", 2.0)];
        let pairs = PairIndex::build(&columns);
        for score in [0.0, 1.0, 2.0, 4.0] {
            let member = with_score(with_score(house_member(), "A", score), "B", score);
            for col in &columns {
                assert_ne!(classify(&member, col, &pairs), Outcome::Waived);
            }
        }
    }

    #[test]
    fn test_preferred_favorable_partner_never_unfavorable() {
        let columns = pair_columns();
        let pairs = PairIndex::build(&columns);
        for other_score in [0.0, 1.0, 3.0] {
            for other_cosponsored in [false, true] {
                let member = house_member()
                    .with_value("H_Con_Res_38", cosponsor(10.0, true))
                    .with_value("H_Con_Res_40", cosponsor(other_score, other_cosponsored));
                assert_eq!(classify(&member, &columns[0], &pairs), Outcome::Favorable);
                let outcome = classify(&member, &columns[1], &pairs);
                assert!(
                    matches!(outcome, Outcome::Waived | Outcome::Favorable),
                    "unexpected {:?}",
                    outcome
                );
            }
        }
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::Absent.to_string(), "Absent");
        assert_eq!(Outcome::NotApplicable.to_string(), "Not applicable");
        assert_eq!(Outcome::Partial.label(), "Present");
    }
}
