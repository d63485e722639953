pub mod chamber;
pub mod classify;
pub mod config;
pub mod engine;
pub mod grade;
pub mod pairs;
pub mod validation;

pub use config::*;
pub use classify::{classify, Outcome};
pub use engine::{calculate_scorecard, categories, score_action, score_all, ActionScore, CategoryGrade, Scorecard};
pub use grade::{GradeScale, NOT_APPLICABLE_GRADE};
pub use pairs::PairIndex;
pub use validation::{validate_columns, validate_grading};
