use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::geo::{BillMap, GeographicAggregation, GroupingMode, Stance, StateStance};
use crate::model::{ActionColumn, Chamber};
use crate::scoring::{CategoryGrade, Outcome, Scorecard};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Letter grade, padded to `width` and colored by letter
pub fn format_grade(grade: &str, width: usize, use_colors: bool) -> String {
    let padded = format!("{:<width$}", grade, width = width);
    if !use_colors {
        return padded;
    }
    match grade.chars().next() {
        Some('A') => padded.green().bold().to_string(),
        Some('B') => padded.cyan().to_string(),
        Some('C') => padded.yellow().to_string(),
        Some('D') => padded.magenta().to_string(),
        Some('F') => padded.red().bold().to_string(),
        _ => padded.dimmed().to_string(),
    }
}

/// Percentage with one decimal, "-" when nothing was possible
pub fn format_percent(percent: Option<f64>) -> String {
    match percent {
        Some(p) => format!("{:.1}%", p),
        None => "-".to_string(),
    }
}

/// Points without a trailing ".0" (4 rather than 4.0, 2.5 stays 2.5)
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{:.0}", points)
    } else {
        format!("{:.1}", points)
    }
}

fn seat(card: &Scorecard) -> String {
    match (card.chamber, card.district.as_deref()) {
        (Chamber::House, Some("")) => format!("{}-AL", card.state),
        (Chamber::House, Some(d)) => format!("{}-{}", card.state, d),
        _ => card.state.clone(),
    }
}

/// Format scorecards as a table: Index, Grade, Percent, Seat, Party, Name
/// `category` picks a category grade; `None` shows the overall grade.
pub fn format_scorecard_table(cards: &[Scorecard], category: Option<&str>, use_colors: bool) -> String {
    if cards.is_empty() {
        return "No legislators found.".to_string();
    }

    let term_width = get_terminal_width();
    let fixed_width = 4 + 3 + 7 + 8 + 12 + 2 * 5;

    cards
        .iter()
        .enumerate()
        .map(|(idx, card)| {
            let grade = card.grade_for(category);
            let index_str = format!("{:>3}.", idx + 1);
            let grade_str = format_grade(grade.map(|g| g.grade.as_str()).unwrap_or("N/A"), 3, use_colors);
            let percent_str = format!("{:>7}", format_percent(grade.and_then(|g| g.percent)));
            let seat_str = format!("{:<8}", seat(card));
            let party_str = format!("{:<12}", truncate(&card.party, 12));

            let name = match term_width {
                Some(width) if width > fixed_width + 10 => truncate(&card.name, width - fixed_width),
                Some(_) => truncate(&card.name, 20),
                None => card.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}  {}  {}  {}  {}",
                    index_str.dimmed(),
                    grade_str,
                    percent_str,
                    seat_str.cyan(),
                    party_str,
                    name.bold()
                )
            } else {
                format!(
                    "{} {}  {}  {}  {}  {}",
                    index_str, grade_str, percent_str, seat_str, party_str, name
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_grade_line(label: &str, grade: &CategoryGrade, use_colors: bool) -> String {
    format!(
        "  {:<24} {} {:>7}  ({} / {})",
        truncate(label, 24),
        format_grade(&grade.grade, 3, use_colors),
        format_percent(grade.percent),
        format_points(grade.total),
        format_points(grade.max)
    )
}

fn format_outcome(outcome: Outcome, use_colors: bool) -> String {
    let label = format!("{:<14}", outcome.label());
    if !use_colors {
        return label;
    }
    match outcome {
        Outcome::Favorable => label.green().to_string(),
        Outcome::Partial => label.yellow().to_string(),
        Outcome::Unfavorable => label.red().to_string(),
        Outcome::Waived | Outcome::Absent | Outcome::NotApplicable => label.dimmed().to_string(),
    }
}

/// Multi-line scorecard for one legislator: grades, then one line per
/// applicable column with its outcome and points.
pub fn format_member_detail(card: &Scorecard, columns: &[ActionColumn], use_colors: bool) -> String {
    let mut lines = Vec::new();

    let header = format!("{} ({}, {}, {})", card.name, card.party, seat(card), card.chamber);
    lines.push(if use_colors { header.bold().to_string() } else { header });
    lines.push(format_grade_line("Overall", &card.overall, use_colors));
    for (name, grade) in &card.categories {
        if grade.max > 0.0 {
            lines.push(format_grade_line(name, grade, use_colors));
        }
    }

    lines.push(String::new());
    for (column, score) in columns.iter().zip(&card.actions) {
        if score.outcome == Outcome::NotApplicable {
            continue;
        }
        lines.push(format!(
            "  {} {:>5}  {}",
            format_outcome(score.outcome, use_colors),
            if score.possible > 0.0 {
                format!("{}/{}", format_points(score.earned), format_points(score.possible))
            } else {
                "-".to_string()
            },
            column.label()
        ));
    }

    lines.join("\n")
}

/// One line per map unit: key, state, grade, average, member count
pub fn format_aggregation(aggregation: &GeographicAggregation, use_colors: bool) -> String {
    let mut lines = Vec::new();
    if aggregation.mode == GroupingMode::StatesFallback {
        let note = "No district data; House members grouped by state.";
        lines.push(if use_colors { note.yellow().to_string() } else { note.to_string() });
    }
    if aggregation.units.is_empty() {
        lines.push("No map units.".to_string());
        return lines.join("\n");
    }

    for unit in &aggregation.units {
        let centroid = unit
            .centroid
            .map(|c| format!("  ({:.3}, {:.3})", c.x, c.y))
            .unwrap_or_default();
        lines.push(format!(
            "{:<5} {:<3} {} {:>6}  {} member{}{}",
            unit.key,
            unit.state,
            format_grade(&unit.grade, 3, use_colors),
            unit.average.map(|a| format!("{:.1}", a)).unwrap_or_else(|| "-".to_string()),
            unit.members.len(),
            if unit.members.len() == 1 { "" } else { "s" },
            centroid
        ));
    }
    lines.join("\n")
}

fn stance_label(stance: Stance) -> &'static str {
    match stance {
        Stance::Favorable => "favorable",
        Stance::Unfavorable => "unfavorable",
    }
}

fn state_stance_label(stance: StateStance) -> &'static str {
    match stance {
        StateStance::BothFavorable => "both favorable",
        StateStance::Split => "split",
        StateStance::BothUnfavorable => "both unfavorable",
    }
}

/// Bill map: summary counts, then one line per colored unit
pub fn format_bill_map(map: &BillMap, column: &ActionColumn, use_colors: bool) -> String {
    let mut lines = Vec::new();
    let title = format!("{} ({})", column.label(), map.chamber);
    lines.push(if use_colors { title.bold().to_string() } else { title });

    let summary = match map.chamber {
        Chamber::House => format!(
            "  {} favorable, {} unfavorable districts",
            map.summary.favorable, map.summary.unfavorable
        ),
        Chamber::Senate => format!(
            "  {} both favorable, {} split, {} both unfavorable states",
            map.summary.favorable, map.summary.split, map.summary.unfavorable
        ),
    };
    lines.push(summary);

    let paint = |key: &str, label: &str, good: Option<bool>| {
        let text = format!("  {:<5} {}", key, label);
        match (use_colors, good) {
            (false, _) => text,
            (true, Some(true)) => text.green().to_string(),
            (true, Some(false)) => text.red().to_string(),
            (true, None) => text.yellow().to_string(),
        }
    };

    for (key, stance) in &map.districts {
        lines.push(paint(key, stance_label(*stance), Some(*stance == Stance::Favorable)));
    }
    for (key, stance) in &map.states {
        let good = match stance {
            StateStance::BothFavorable => Some(true),
            StateStance::BothUnfavorable => Some(false),
            StateStance::Split => None,
        };
        lines.push(paint(key, state_stance_label(*stance), good));
    }

    lines.join("\n")
}
