use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use scorecard::config::Config;
use scorecard::data::Dataset;
use scorecard::geo::{self, GroupingRequest};
use scorecard::model::Chamber;
use scorecard::scoring::{self, GradeScale, PairIndex, Scorecard};

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;
const EXIT_DATA: i32 = 5;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ChamberArg {
    House,
    Senate,
}

impl From<ChamberArg> for Chamber {
    fn from(arg: ChamberArg) -> Self {
        match arg {
            ChamberArg::House => Chamber::House,
            ChamberArg::Senate => Chamber::Senate,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum GroupingArg {
    #[default]
    Auto,
    Districts,
    States,
}

impl From<GroupingArg> for GroupingRequest {
    fn from(arg: GroupingArg) -> Self {
        match arg {
            GroupingArg::Auto => GroupingRequest::Auto,
            GroupingArg::Districts => GroupingRequest::Districts,
            GroupingArg::States => GroupingRequest::States,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List legislators by grade, best first (default if no subcommand)
    Grades {
        /// Grade a single category instead of overall
        #[arg(long)]
        category: Option<String>,
        /// Only one chamber
        #[arg(long, value_enum)]
        chamber: Option<ChamberArg>,
        /// Print scorecards as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one legislator's scorecard with per-column outcomes
    Member {
        /// Bioguide id
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Average grades onto districts or states
    Map {
        #[arg(long, value_enum, default_value = "house")]
        chamber: ChamberArg,
        #[arg(long, value_enum, default_value = "auto")]
        grouping: GroupingArg,
        #[arg(long)]
        category: Option<String>,
        /// GeoJSON district boundaries, for label centroids
        #[arg(long)]
        districts: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Color a map by each legislator's stance on one column
    Bill {
        /// Column id from the metadata table
        column: String,
        /// Chamber to draw when the column applies to both
        #[arg(long, value_enum, default_value = "house")]
        chamber: ChamberArg,
        #[arg(long)]
        json: bool,
    },
    /// Validate the config and the column table
    Check,
    /// Write the default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "scorecard")]
#[command(about = "Legislator scorecard and grade map CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/scorecard/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Wide score table CSV (overrides data.scores in config)
    #[arg(long, global = true)]
    scores: Option<PathBuf>,

    /// Column metadata CSV (overrides data.metadata in config)
    #[arg(long, global = true)]
    metadata: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = scorecard::telemetry::init(cli.verbose) {
        eprintln!("Logging disabled: {:#}", e);
    }

    let command = cli.command.unwrap_or(Commands::Grades {
        category: None,
        chamber: None,
        json: false,
    });

    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { force } = command {
        match scorecard::config::write_default_config(config_path, force) {
            Ok(path) => {
                println!("Config written to {}", path.display());
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    // Load config
    let config = match scorecard::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate grading config at startup
    if let Err(errors) = scoring::validate_grading(&config.grading) {
        eprintln!("Grading config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    let scale = GradeScale::from_config(&config.grading);

    let dataset = match load_data(&config, cli.scores, cli.metadata) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Data error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    let use_colors = scorecard::output::should_use_colors();

    let result = match command {
        Commands::Grades { category, chamber, json } => {
            run_grades(&dataset, &scale, category.as_deref(), chamber.map(Chamber::from), json, use_colors)
        }
        Commands::Member { id, json } => run_member(&dataset, &scale, &id, json, use_colors),
        Commands::Map {
            chamber,
            grouping,
            category,
            districts,
            json,
        } => {
            let districts = districts.or_else(|| config.data.as_ref().and_then(|d| d.districts.clone()));
            run_map(
                &dataset,
                &scale,
                chamber.into(),
                grouping.into(),
                category.as_deref(),
                districts,
                json,
                use_colors,
            )
        }
        Commands::Bill { column, chamber, json } => {
            run_bill(&dataset, &column, chamber.into(), json, use_colors)
        }
        Commands::Check => {
            run_check(&dataset);
            Ok(())
        }
        Commands::Init { .. } => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_DATA);
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Resolve input paths from flags, then config, and load both tables
fn load_data(config: &Config, scores: Option<PathBuf>, metadata: Option<PathBuf>) -> Result<Dataset> {
    let data = config.data.clone().unwrap_or_default();
    let scores = scores
        .or(data.scores)
        .context("No score table given. Pass --scores or set data.scores in the config")?;
    let metadata = metadata
        .or(data.metadata)
        .context("No column metadata given. Pass --metadata or set data.metadata in the config")?;
    scorecard::data::load_dataset(&scores, &metadata)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn run_grades(
    dataset: &Dataset,
    scale: &GradeScale,
    category: Option<&str>,
    chamber: Option<Chamber>,
    json: bool,
    use_colors: bool,
) -> Result<()> {
    if let Some(name) = category {
        if !scoring::categories(&dataset.columns).iter().any(|c| c == name) {
            anyhow::bail!("Unknown category '{}'", name);
        }
    }

    let mut cards: Vec<Scorecard> = scoring::score_all(&dataset.legislators, &dataset.columns, scale)
        .into_iter()
        .filter(|c| chamber.map_or(true, |ch| c.chamber == ch))
        .collect();

    // Best grade first, then by name
    cards.sort_by(|a, b| {
        let grade_a = a.grade_for(category).map(|g| g.grade.as_str()).unwrap_or_default();
        let grade_b = b.grade_for(category).map(|g| g.grade.as_str()).unwrap_or_default();
        scale
            .rank(grade_a)
            .cmp(&scale.rank(grade_b))
            .then_with(|| a.name.cmp(&b.name))
    });

    if json {
        return print_json(&cards);
    }
    println!("{}", scorecard::output::format_scorecard_table(&cards, category, use_colors));
    Ok(())
}

fn run_member(dataset: &Dataset, scale: &GradeScale, id: &str, json: bool, use_colors: bool) -> Result<()> {
    let legislator = dataset
        .legislator(id)
        .with_context(|| format!("No legislator with id '{}'", id))?;
    let pairs = PairIndex::build(&dataset.columns);
    let categories = scoring::categories(&dataset.columns);
    let card = scoring::calculate_scorecard(legislator, &dataset.columns, &pairs, &categories, scale);

    if json {
        return print_json(&card);
    }
    println!("{}", scorecard::output::format_member_detail(&card, &dataset.columns, use_colors));
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_map(
    dataset: &Dataset,
    scale: &GradeScale,
    chamber: Chamber,
    grouping: GroupingRequest,
    category: Option<&str>,
    districts: Option<PathBuf>,
    json: bool,
    use_colors: bool,
) -> Result<()> {
    let cards = scoring::score_all(&dataset.legislators, &dataset.columns, scale);
    let mut aggregation = match chamber {
        Chamber::House => geo::aggregate_house(&cards, category, grouping, scale),
        Chamber::Senate => geo::aggregate_senate(&cards, category, scale),
    };

    if let Some(path) = districts {
        let shapes = geo::load_shapes(&path)?;
        aggregation.attach_centroids(&geo::centroids(&shapes));
    }

    if json {
        return print_json(&aggregation);
    }
    println!("{}", scorecard::output::format_aggregation(&aggregation, use_colors));
    Ok(())
}

fn run_bill(dataset: &Dataset, column_id: &str, fallback: Chamber, json: bool, use_colors: bool) -> Result<()> {
    let column = dataset
        .column(column_id)
        .with_context(|| format!("No column '{}' in the metadata table", column_id))?;
    let pairs = PairIndex::build(&dataset.columns);
    let map = geo::bill_map(&dataset.legislators, column, &pairs, fallback);

    if json {
        return print_json(&map);
    }
    println!("{}", scorecard::output::format_bill_map(&map, column, use_colors));
    Ok(())
}

fn run_check(dataset: &Dataset) {
    println!(
        "{} columns, {} legislators, {} categories",
        dataset.columns.len(),
        dataset.legislators.len(),
        scoring::categories(&dataset.columns).len()
    );
    match scoring::validate_columns(&dataset.columns) {
        Ok(()) => println!("Column table OK"),
        Err(problems) => {
            println!("Column table warnings:");
            for problem in problems {
                println!("  - {}", problem);
            }
        }
    }
}
