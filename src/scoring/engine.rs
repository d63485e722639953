use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::classify::{classify, is_neutral_abstention, Outcome};
use super::grade::GradeScale;
use super::pairs::PairIndex;
use crate::model::{ActionColumn, Chamber, Legislator};

/// One column's contribution to a legislator's score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionScore {
    pub column_id: String,
    pub outcome: Outcome,
    pub earned: f64,
    pub possible: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGrade {
    pub category: String,
    pub total: f64,
    pub max: f64,
    /// 0-100, `None` when nothing was possible
    pub percent: Option<f64>,
    pub grade: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scorecard {
    pub legislator_id: String,
    pub name: String,
    pub chamber: Chamber,
    pub state: String,
    pub district: Option<String>,
    pub party: String,
    pub overall: CategoryGrade,
    pub categories: BTreeMap<String, CategoryGrade>,
    pub actions: Vec<ActionScore>,
}

impl Scorecard {
    pub fn category(&self, name: &str) -> Option<&CategoryGrade> {
        self.categories.get(name)
    }

    /// Grade for a category, or the overall grade when `category` is `None`
    pub fn grade_for(&self, category: Option<&str>) -> Option<&CategoryGrade> {
        match category {
            Some(name) => self.category(name),
            None => Some(&self.overall),
        }
    }
}

/// Label used for the all-columns grade
pub const OVERALL: &str = "Overall";

/// Score one column for one legislator.
pub fn score_action(
    legislator: &Legislator,
    column: &ActionColumn,
    pairs: &PairIndex<'_>,
) -> ActionScore {
    let outcome = classify(legislator, column, pairs);

    let (earned, possible) = match outcome {
        Outcome::NotApplicable | Outcome::Absent | Outcome::Waived => (0.0, 0.0),
        Outcome::Favorable if is_neutral_abstention(column) => (0.0, 0.0),
        Outcome::Favorable => (column.points, pairs.possible_points(column, true)),
        // Any score on the preferred member satisfies its pair
        Outcome::Partial => {
            let possible = pairs.possible_points(column, true);
            let raw = legislator.value(&column.id).score.score();
            (raw.min(possible), possible)
        }
        Outcome::Unfavorable => (0.0, pairs.possible_points(column, false)),
    };

    ActionScore {
        column_id: column.id.clone(),
        outcome,
        earned,
        possible,
    }
}

fn sum_grade<'s>(
    category: &str,
    scores: impl Iterator<Item = &'s ActionScore>,
    scale: &GradeScale,
) -> CategoryGrade {
    let (total, max) = scores.fold((0.0, 0.0), |(total, max), s| {
        (total + s.earned, max + s.possible)
    });
    let (percent, grade) = scale.grade(total, max);
    CategoryGrade {
        category: category.to_string(),
        total,
        max,
        percent,
        grade,
    }
}

/// Sorted union of every column's categories
pub fn categories(columns: &[ActionColumn]) -> Vec<String> {
    columns
        .iter()
        .flat_map(|c| c.categories.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Build the full scorecard for one legislator: per-column detail, the
/// overall grade, and one grade per category.
pub fn calculate_scorecard(
    legislator: &Legislator,
    columns: &[ActionColumn],
    pairs: &PairIndex<'_>,
    category_names: &[String],
    scale: &GradeScale,
) -> Scorecard {
    let actions: Vec<ActionScore> = columns
        .iter()
        .map(|column| score_action(legislator, column, pairs))
        .collect();

    let overall = sum_grade(OVERALL, actions.iter(), scale);

    let categories = category_names
        .iter()
        .map(|name| {
            let scores = columns
                .iter()
                .zip(actions.iter())
                .filter(|(column, _)| column.in_category(name))
                .map(|(_, score)| score);
            (name.clone(), sum_grade(name, scores, scale))
        })
        .collect();

    Scorecard {
        legislator_id: legislator.id.clone(),
        name: legislator.display_name().to_string(),
        chamber: legislator.chamber,
        state: legislator.state.clone(),
        district: legislator.district.clone(),
        party: legislator.party.clone(),
        overall,
        categories,
        actions,
    }
}

/// Score every legislator against the same column table.
pub fn score_all(
    legislators: &[Legislator],
    columns: &[ActionColumn],
    scale: &GradeScale,
) -> Vec<Scorecard> {
    let pairs = PairIndex::build(columns);
    let category_names = categories(columns);
    legislators
        .iter()
        .map(|legislator| calculate_scorecard(legislator, columns, &pairs, &category_names, scale))
        .collect()
}
