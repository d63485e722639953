use std::collections::{HashMap, HashSet};

use super::config::GradingConfig;
use crate::model::ActionColumn;

/// Validate grading configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_grading(config: &GradingConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.floor_grade.trim().is_empty() {
        errors.push("grading.floor_grade: must not be empty".to_string());
    }

    if config.bands.is_empty() {
        errors.push("grading.bands: at least one band is required".to_string());
    }

    let mut seen = HashSet::new();
    for (i, band) in config.bands.iter().enumerate() {
        let grade = band.grade.trim();
        if grade.is_empty() {
            errors.push(format!("grading.bands[{}].grade: must not be empty", i));
        } else if !seen.insert(grade.to_ascii_uppercase()) {
            errors.push(format!("grading.bands[{}].grade: duplicate grade '{}'", i, grade));
        }
        if !band.min.is_finite() || !(0.0..=100.0).contains(&band.min) {
            errors.push(format!(
                "grading.bands[{}].min: {} is outside 0-100",
                i, band.min
            ));
        }
    }
    if seen.contains(&config.floor_grade.trim().to_ascii_uppercase()) {
        errors.push(format!(
            "grading.floor_grade: '{}' is also used as a band",
            config.floor_grade.trim()
        ));
    }

    for (i, value) in config.grade_values.iter().enumerate() {
        if value.grade.trim().is_empty() {
            errors.push(format!("grading.grade_values[{}].grade: must not be empty", i));
        }
        if !value.value.is_finite() || value.value < 0.0 {
            errors.push(format!(
                "grading.grade_values[{}].value: must be a non-negative number",
                i
            ));
        }
    }

    let has_value = |grade: &str| {
        config
            .grade_values
            .iter()
            .any(|v| v.grade.trim().eq_ignore_ascii_case(grade))
    };
    for (i, band) in config.bands.iter().enumerate() {
        let grade = band.grade.trim();
        if !grade.is_empty() && !has_value(grade) {
            errors.push(format!(
                "grading.bands[{}].grade: '{}' has no entry in grade_values",
                i, grade
            ));
        }
    }
    let floor = config.floor_grade.trim();
    if !floor.is_empty() && !has_value(floor) {
        errors.push(format!(
            "grading.floor_grade: '{}' has no entry in grade_values",
            floor
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check the column table for structural problems.
///
/// None of these stop scoring; callers report them as warnings.
pub fn validate_columns(columns: &[ActionColumn]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for column in columns {
        if !ids.insert(column.id.as_str()) {
            errors.push(format!("column '{}': duplicate id", column.id));
        }
        if column.points < 0.0 {
            errors.push(format!("column '{}': negative points {}", column.id, column.points));
        }
    }

    let mut pairs: HashMap<&str, Vec<&ActionColumn>> = HashMap::new();
    for column in columns {
        if let Some(key) = column.pair_key.as_deref().map(str::trim) {
            if !key.is_empty() {
                pairs.entry(key).or_default().push(column);
            }
        }
    }

    let mut keys: Vec<&&str> = pairs.keys().collect();
    keys.sort();
    for key in keys {
        let members = &pairs[*key];
        if members.len() > 2 {
            errors.push(format!(
                "pair '{}': shared by {} columns (at most 2)",
                key,
                members.len()
            ));
        }

        let preferred: Vec<&&ActionColumn> = members.iter().filter(|c| c.preferred).collect();
        match preferred.as_slice() {
            [] if members.len() > 1 => {
                errors.push(format!("pair '{}': no preferred column, no waiver applies", key))
            }
            [] => {}
            [only] => {
                if members.iter().any(|c| c.points > only.points) {
                    errors.push(format!(
                        "pair '{}': preferred column '{}' is not the highest-value member",
                        key, only.id
                    ));
                }
            }
            _ => errors.push(format!(
                "pair '{}': {} columns marked preferred (at most 1)",
                key,
                preferred.len()
            )),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
