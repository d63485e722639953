use std::collections::HashMap;

use crate::model::ActionColumn;

/// Columns grouped by pair key.
///
/// A pair is two alternative versions of the same measure. Backing the
/// preferred one excuses a legislator from the other, and the pair as a whole
/// is worth the larger of the two point values.
#[derive(Debug, Clone, Default)]
pub struct PairIndex<'a> {
    groups: HashMap<&'a str, PairGroup<'a>>,
}

#[derive(Debug, Clone, Default)]
struct PairGroup<'a> {
    members: Vec<&'a ActionColumn>,
    preferred: Option<&'a ActionColumn>,
}

impl<'a> PairIndex<'a> {
    /// Group columns by pair key. The first column marked preferred in a group
    /// is its preferred member; later ones are treated as ordinary members.
    pub fn build(columns: &'a [ActionColumn]) -> Self {
        let mut groups: HashMap<&'a str, PairGroup<'a>> = HashMap::new();

        for column in columns {
            let Some(key) = pair_key(column) else {
                continue;
            };
            let group = groups.entry(key).or_default();
            group.members.push(column);
            if column.preferred {
                match group.preferred {
                    None => group.preferred = Some(column),
                    Some(existing) => tracing::warn!(
                        pair_key = key,
                        kept = %existing.id,
                        ignored = %column.id,
                        "pair has more than one preferred column"
                    ),
                }
            }
        }

        for (key, group) in &groups {
            if group.members.len() > 2 {
                tracing::warn!(
                    pair_key = *key,
                    members = group.members.len(),
                    "pair key shared by more than two columns"
                );
            }
        }

        Self { groups }
    }

    /// The preferred column paired with `column`, if `column` is the
    /// non-preferred side of a pair that has one.
    pub fn preferred_partner(&self, column: &ActionColumn) -> Option<&'a ActionColumn> {
        let group = self.groups.get(pair_key(column)?)?;
        let preferred = group.preferred?;
        if preferred.id == column.id {
            None
        } else {
            Some(preferred)
        }
    }

    /// True when `column` is the designated preferred member of its pair
    pub fn is_preferred(&self, column: &ActionColumn) -> bool {
        pair_key(column)
            .and_then(|key| self.groups.get(key))
            .and_then(|group| group.preferred)
            .map(|preferred| preferred.id == column.id)
            .unwrap_or(false)
    }

    /// Points a column contributes to the denominator.
    ///
    /// The preferred member carries the whole pair's value when it is
    /// satisfied, and otherwise only what the other member cannot recover.
    /// Every other column carries its own value.
    pub fn possible_points(&self, column: &ActionColumn, satisfied: bool) -> f64 {
        if !self.is_preferred(column) {
            return column.points;
        }
        let Some(group) = pair_key(column).and_then(|key| self.groups.get(key)) else {
            return column.points;
        };

        let pair_max = group
            .members
            .iter()
            .map(|c| c.points)
            .fold(0.0_f64, f64::max);

        if satisfied {
            pair_max
        } else {
            let other = group
                .members
                .iter()
                .filter(|c| c.id != column.id)
                .map(|c| c.points)
                .fold(0.0_f64, f64::max);
            (pair_max - other).max(0.0)
        }
    }
}

fn pair_key(column: &ActionColumn) -> Option<&str> {
    column
        .pair_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
}
