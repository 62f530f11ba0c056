use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::utils::types::{Medal, MedalFilter};

/// Olympics Stats CLI - descriptive statistics over the historical Olympic Games dataset
#[derive(Parser, Debug)]
#[command(name = "olympics")]
#[command(about = "Descriptive statistics over the historical Olympic Games dataset")]
#[command(version = "0.1.0")]
pub struct CliArgs {
    /// Athlete events table (CSV)
    #[arg(long, global = true, value_name = "PATH")]
    pub events: Option<PathBuf>,

    /// NOC to region mapping table (CSV)
    #[arg(long, global = true, value_name = "PATH")]
    pub regions: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Total and per-kind medals of one athlete
    Athlete {
        /// Exact athlete name (defaults to the configured athlete)
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },

    /// Number of distinct nations that took part
    Nations,

    /// Youngest athletes on record
    Youngest,

    /// Oldest athletes on record
    Oldest,

    /// Lightest and heaviest recorded weight
    Weight,

    /// Athlete with the most event entries
    MostActive,

    /// Countries ranked by total medals
    Ranking {
        /// Number of countries to show
        #[arg(short, long)]
        top: Option<usize>,

        /// Draw a stacked medal chart instead of a table
        #[arg(long)]
        chart: Option<ChartStyle>,
    },

    /// How many countries lack each kind of medal
    MedalGaps,

    /// Countries that never won a medal
    NeverMedaled {
        /// Print a choropleth map figure instead of a list
        #[arg(long)]
        map: bool,
    },

    /// Countries that won medals
    Medaled {
        /// Medal kind to look for
        #[arg(short, long, default_value = "any")]
        medal: MedalArg,

        /// Print a choropleth map figure instead of a list
        #[arg(long)]
        map: bool,
    },

    /// Every statistic in one document (Markdown, or JSON with --format json)
    Report {
        /// Number of countries in the ranking section
        #[arg(short, long)]
        top: Option<usize>,
    },
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Formatted table output
    Table,
    /// JSON output
    Json,
    /// CSV output
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Medal chart rendering
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    /// Colored bars drawn in the terminal
    Terminal,
    /// ECharts option JSON
    Echarts,
}

/// Medal kind selector
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedalArg {
    Any,
    Gold,
    Silver,
    Bronze,
}

impl From<MedalArg> for MedalFilter {
    fn from(arg: MedalArg) -> Self {
        match arg {
            MedalArg::Any => MedalFilter::Any,
            MedalArg::Gold => MedalFilter::Only(Medal::Gold),
            MedalArg::Silver => MedalFilter::Only(Medal::Silver),
            MedalArg::Bronze => MedalFilter::Only(Medal::Bronze),
        }
    }
}
