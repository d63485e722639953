use super::config::GradingConfig;

/// Grade shown when nothing was applicable.
pub const NOT_APPLICABLE_GRADE: &str = "N/A";

/// Breakpoint table compiled from [`GradingConfig`].
///
/// Bands are kept sorted from the highest `min` down, so lookup is a
/// first-match scan. The scale holds no other state: the grade for a given
/// (total, max) is always the same.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeScale {
    bands: Vec<(String, f64)>,
    floor: String,
    values: Vec<(String, f64)>,
}

impl Default for GradeScale {
    fn default() -> Self {
        Self::from_config(&GradingConfig::default())
    }
}

impl GradeScale {
    pub fn from_config(config: &GradingConfig) -> Self {
        let mut bands: Vec<(String, f64)> = config
            .bands
            .iter()
            .map(|b| (b.grade.trim().to_string(), b.min))
            .collect();
        bands.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let values = config
            .grade_values
            .iter()
            .map(|v| (v.grade.trim().to_string(), v.value))
            .collect();

        Self {
            bands,
            floor: config.floor_grade.trim().to_string(),
            values,
        }
    }

    /// Letter grade for a percentage on the 0-100 scale
    pub fn letter_for(&self, percent: f64) -> &str {
        self.bands
            .iter()
            .find(|(_, min)| percent >= *min)
            .map(|(grade, _)| grade.as_str())
            .unwrap_or(self.floor.as_str())
    }

    /// Percentage and letter for earned/possible points.
    /// Nothing possible means no percentage and an "N/A" grade.
    pub fn grade(&self, total: f64, max: f64) -> (Option<f64>, String) {
        if max <= 0.0 {
            return (None, NOT_APPLICABLE_GRADE.to_string());
        }
        let percent = total / max * 100.0;
        (Some(percent), self.letter_for(percent).to_string())
    }

    /// Numeric equivalent of a letter grade, `None` for unknown grades
    pub fn value_of(&self, grade: &str) -> Option<f64> {
        let grade = grade.trim();
        self.values
            .iter()
            .find(|(letter, _)| letter.eq_ignore_ascii_case(grade))
            .map(|(_, value)| *value)
    }

    /// Position of a grade from best (0) to worst; unknown grades sort last
    pub fn rank(&self, grade: &str) -> usize {
        let grade = grade.trim();
        self.bands
            .iter()
            .map(|(letter, _)| letter.as_str())
            .chain(std::iter::once(self.floor.as_str()))
            .position(|letter| letter.eq_ignore_ascii_case(grade))
            .unwrap_or(self.bands.len() + 1)
    }
}
