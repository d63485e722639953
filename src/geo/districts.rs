use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::fips::state_fips;
use super::polygon::Point;
use crate::model::Chamber;
use crate::scoring::{GradeScale, Scorecard, NOT_APPLICABLE_GRADE};

/// Map key for a House district: state FIPS followed by the two-digit
/// district number. An at-large (empty) district is "00".
pub fn district_key(state: &str, district: &str) -> Option<String> {
    let fips = state_fips(state)?;
    let district = district.trim();
    let district = if district.is_empty() { "0" } else { district };
    Some(format!("{}{:0>2}", fips, district))
}

/// How House members were grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingMode {
    Districts,
    States,
    /// Districts were asked for but no member carried district data
    StatesFallback,
}

/// Requested grouping for House members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupingRequest {
    /// Districts when any member has district data, otherwise states
    #[default]
    Auto,
    Districts,
    States,
}

/// One shaded area on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeographicUnit {
    /// State FIPS, or state FIPS + two-digit district
    pub key: String,
    /// Postal code of the unit's state
    pub state: String,
    pub members: Vec<String>,
    /// Mean numeric grade value, `None` when no member had a known grade
    pub average: Option<f64>,
    pub grade: String,
    pub centroid: Option<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeographicAggregation {
    pub chamber: Chamber,
    pub mode: GroupingMode,
    /// Sorted by key
    pub units: Vec<GeographicUnit>,
}

impl GeographicAggregation {
    pub fn unit(&self, key: &str) -> Option<&GeographicUnit> {
        self.units.iter().find(|u| u.key == key)
    }

    /// Fill in label positions from a key -> centroid table
    pub fn attach_centroids(&mut self, centroids: &HashMap<String, Point>) {
        for unit in &mut self.units {
            unit.centroid = centroids.get(&unit.key).copied();
        }
    }
}

/// Average letter grades through their numeric values and convert the mean
/// back with the same breakpoints used for individual grades. Grades with no
/// numeric value (such as "N/A") are skipped.
pub fn average_grade<'g>(
    grades: impl IntoIterator<Item = &'g str>,
    scale: &GradeScale,
) -> (Option<f64>, String) {
    let values: Vec<f64> = grades
        .into_iter()
        .filter_map(|grade| scale.value_of(grade))
        .collect();
    if values.is_empty() {
        return (None, NOT_APPLICABLE_GRADE.to_string());
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    (Some(mean), scale.letter_for(mean).to_string())
}

fn grade_of<'c>(card: &'c Scorecard, category: Option<&str>) -> &'c str {
    card.grade_for(category)
        .map(|g| g.grade.as_str())
        .unwrap_or(NOT_APPLICABLE_GRADE)
}

fn build_units(
    groups: BTreeMap<String, Vec<&Scorecard>>,
    category: Option<&str>,
    scale: &GradeScale,
) -> Vec<GeographicUnit> {
    groups
        .into_iter()
        .map(|(key, cards)| {
            let (average, grade) =
                average_grade(cards.iter().map(|c| grade_of(c, category)), scale);
            let state = cards
                .first()
                .and_then(|c| super::fips::state_code(&c.state))
                .unwrap_or_default()
                .to_string();
            GeographicUnit {
                key,
                state,
                members: cards.iter().map(|c| c.legislator_id.clone()).collect(),
                average,
                grade,
                centroid: None,
            }
        })
        .collect()
}

fn group_by_state<'c>(cards: impl Iterator<Item = &'c Scorecard>) -> BTreeMap<String, Vec<&'c Scorecard>> {
    let mut groups: BTreeMap<String, Vec<&Scorecard>> = BTreeMap::new();
    for card in cards {
        match state_fips(&card.state) {
            Some(fips) => groups.entry(fips.to_string()).or_default().push(card),
            None => tracing::warn!(
                legislator = %card.legislator_id,
                state = %card.state,
                "unknown state, left off the map"
            ),
        }
    }
    groups
}

/// Group House members into districts (or states) and average their grades.
///
/// `category` selects a category grade; `None` uses the overall grade.
pub fn aggregate_house(
    cards: &[Scorecard],
    category: Option<&str>,
    request: GroupingRequest,
    scale: &GradeScale,
) -> GeographicAggregation {
    let house: Vec<&Scorecard> = cards.iter().filter(|c| c.chamber == Chamber::House).collect();
    let has_districts = house.iter().any(|c| c.district.is_some());

    let mode = match request {
        GroupingRequest::States => GroupingMode::States,
        GroupingRequest::Districts | GroupingRequest::Auto if has_districts => GroupingMode::Districts,
        GroupingRequest::Districts | GroupingRequest::Auto => {
            if !house.is_empty() {
                tracing::warn!(
                    members = house.len(),
                    "no House member has district data, grouping by state"
                );
            }
            GroupingMode::StatesFallback
        }
    };

    let groups = match mode {
        GroupingMode::Districts => {
            let mut groups: BTreeMap<String, Vec<&Scorecard>> = BTreeMap::new();
            for card in &house {
                let district = card.district.as_deref().unwrap_or_default();
                match district_key(&card.state, district) {
                    Some(key) => groups.entry(key).or_default().push(*card),
                    None => tracing::warn!(
                        legislator = %card.legislator_id,
                        state = %card.state,
                        "unknown state, left off the map"
                    ),
                }
            }
            for (key, members) in &groups {
                if members.len() > 1 {
                    tracing::warn!(
                        district = %key,
                        members = members.len(),
                        "more than one member in district, averaging"
                    );
                }
            }
            groups
        }
        GroupingMode::States | GroupingMode::StatesFallback => group_by_state(house.into_iter()),
    };

    GeographicAggregation {
        chamber: Chamber::House,
        mode,
        units: build_units(groups, category, scale),
    }
}

/// Group senators by state and average their grades.
pub fn aggregate_senate(
    cards: &[Scorecard],
    category: Option<&str>,
    scale: &GradeScale,
) -> GeographicAggregation {
    let groups = group_by_state(cards.iter().filter(|c| c.chamber == Chamber::Senate));
    for (fips, members) in &groups {
        if members.len() > 2 {
            tracing::warn!(state = %fips, members = members.len(), "more than two senators");
        }
    }
    GeographicAggregation {
        chamber: Chamber::Senate,
        mode: GroupingMode::States,
        units: build_units(groups, category, scale),
    }
}
