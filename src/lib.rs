//! Legislator scorecards: per-category point totals and letter grades
//! derived from votes, cosponsorships and manually scored actions, plus the
//! geographic aggregation used to draw grade and bill maps.

pub mod config;
pub mod data;
pub mod geo;
pub mod model;
pub mod output;
pub mod scoring;
pub mod telemetry;
