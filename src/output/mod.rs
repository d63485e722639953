pub mod formatter;

pub use formatter::{
    format_aggregation, format_bill_map, format_grade, format_member_detail, format_percent,
    format_points, format_scorecard_table, should_use_colors,
};
