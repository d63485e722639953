use serde::{Deserialize, Serialize};

/// Grading configuration.
///
/// Maps a percentage of possible points to a letter grade, and letter
/// grades back to numbers for geographic averaging.
///
/// Example YAML:
/// ```yaml
/// grading:
///   floor_grade: F
///   bands:
///     - { grade: "A+", min: 98 }
///     - { grade: "A", min: 93 }
///   grade_values:
///     - { grade: "A+", value: 100 }
///     - { grade: "A", value: 95 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GradingConfig {
    /// Grade given below the lowest band (default: "F")
    #[serde(default = "default_floor_grade")]
    pub floor_grade: String,

    /// Percentage breakpoints; a percentage at or above `min` earns `grade`
    pub bands: Vec<GradeBand>,

    /// Numeric equivalent of each letter grade, used when averaging grades
    /// across a state or district (default: the built-in table)
    #[serde(default = "default_grade_values")]
    pub grade_values: Vec<GradeValue>,
}

fn default_floor_grade() -> String {
    "F".to_string()
}

fn default_grade_values() -> Vec<GradeValue> {
    [
        ("A+", 100.0),
        ("A", 95.0),
        ("A-", 90.0),
        ("B+", 87.0),
        ("B", 83.0),
        ("B-", 80.0),
        ("C+", 77.0),
        ("C", 73.0),
        ("C-", 70.0),
        ("D+", 67.0),
        ("D", 63.0),
        ("D-", 60.0),
        ("F", 50.0),
    ]
    .iter()
    .map(|(grade, value)| GradeValue {
        grade: grade.to_string(),
        value: *value,
    })
    .collect()
}

impl Default for GradingConfig {
    fn default() -> Self {
        let bands = [
            ("A+", 98.0),
            ("A", 93.0),
            ("A-", 88.5),
            ("B+", 85.0),
            ("B", 81.5),
            ("B-", 78.5),
            ("C+", 75.0),
            ("C", 71.5),
            ("C-", 68.5),
            ("D+", 65.0),
            ("D", 61.5),
            ("D-", 55.0),
        ];

        Self {
            floor_grade: default_floor_grade(),
            bands: bands
                .iter()
                .map(|(grade, min)| GradeBand {
                    grade: grade.to_string(),
                    min: *min,
                })
                .collect(),
            grade_values: default_grade_values(),
        }
    }
}

/// Grade breakpoint.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GradeBand {
    /// Letter grade (e.g., "A-")
    pub grade: String,

    /// Inclusive lower bound, as a percentage (0-100)
    pub min: f64,
}

/// Numeric value of a letter grade.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GradeValue {
    pub grade: String,
    pub value: f64,
}
