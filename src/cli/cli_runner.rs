use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::cli::{ChartStyle, CliArgs, Commands, OutputFormat, OutputFormatter};
use crate::engine::{AgeExtreme, QueryEngine};
use crate::loader::{CsvLoader, DatasetLoader};
use crate::presentation::{ChoroplethMap, IsoCountryResolver, MedalBarChart};
use crate::utils::{
    config::StatsConfig,
    error::{ConfigError, StatsError, StatsResult},
    types::{ColumnMetadata, DataType, MedalFilter, ResultTable, Tabular, Value},
};

/// Main CLI runner that handles command execution
pub struct CliRunner {
    engine: QueryEngine,
    resolver: IsoCountryResolver,
    config: StatsConfig,
}

impl CliRunner {
    /// Load the configured tables and build a runner over them
    pub fn new(config: StatsConfig) -> StatsResult<Self> {
        // Only ASCII characters encode to a single byte in a UTF-8 file
        if !config.data.delimiter.is_ascii() {
            return Err(ConfigError::Invalid(format!(
                "delimiter '{}' is not an ASCII character",
                config.data.delimiter
            ))
            .into());
        }

        let loader = CsvLoader::new().with_delimiter(config.data.delimiter as u8);
        let dataset = loader.load(&config.data.events_path, &config.data.regions_path)?;

        Ok(Self::with_engine(QueryEngine::new(dataset), config))
    }

    /// Build a runner over an already loaded engine
    pub fn with_engine(engine: QueryEngine, config: StatsConfig) -> Self {
        let resolver =
            IsoCountryResolver::new().with_aliases(&config.presentation.country_aliases);

        Self {
            engine,
            resolver,
            config,
        }
    }

    /// Execute one command and return its formatted output
    pub fn execute(&self, command: &Commands, format: &OutputFormat, verbose: bool) -> StatsResult<String> {
        if verbose {
            eprintln!(
                "{}",
                OutputFormatter::format_info(&format!(
                    "Querying {} event entries",
                    self.engine.dataset().events().len()
                ))
            );
        }

        let output = match command {
            Commands::Athlete { name } => {
                let athlete = name.as_deref().unwrap_or(&self.config.report.athlete);
                let summary = self.engine.athlete_medal_summary(athlete);
                OutputFormatter::format_result(&summary.to_table(), format)
            }

            Commands::Nations => {
                let table = scalar_table("nations", self.engine.distinct_nation_count());
                OutputFormatter::format_result(&table, format)
            }

            Commands::Youngest => {
                let youngest = self.engine.extreme_age(AgeExtreme::Youngest);
                OutputFormatter::format_result(&youngest.to_table(), format)
            }

            Commands::Oldest => {
                let oldest = self.engine.extreme_age(AgeExtreme::Oldest);
                OutputFormatter::format_result(&oldest.to_table(), format)
            }

            Commands::Weight => {
                OutputFormatter::format_result(&self.engine.weight_range().to_table(), format)
            }

            Commands::MostActive => OutputFormatter::format_result(
                &self.engine.most_frequent_athlete().to_table(),
                format,
            ),

            Commands::Ranking { top, chart } => {
                let top_n = top.unwrap_or(self.config.report.top_n);
                let ranking = self.engine.country_medal_ranking();

                match chart {
                    Some(style) => {
                        let chart = MedalBarChart::from_ranking(&ranking, top_n)?;
                        match style {
                            ChartStyle::Terminal => {
                                chart.render_terminal(self.config.presentation.terminal_bar_width)
                            }
                            ChartStyle::Echarts => to_pretty_json(&chart.to_echarts())?,
                        }
                    }
                    None => {
                        let shown = &ranking[..top_n.min(ranking.len())];
                        OutputFormatter::format_result(&shown.to_table(), format)
                    }
                }
            }

            Commands::MedalGaps => {
                OutputFormatter::format_result(&self.engine.medal_gap_counts().to_table(), format)
            }

            Commands::NeverMedaled { map } => {
                let countries = self.engine.countries_never_medaled();
                if *map {
                    let map = ChoroplethMap::never_medaled(&countries, &self.resolver);
                    self.report_unresolved(&map, verbose);
                    to_pretty_json(&map.to_plotly())?
                } else {
                    OutputFormatter::format_result(&names_table(&countries), format)
                }
            }

            Commands::Medaled { medal, map } => {
                let countries = self.engine.countries_with_medals(MedalFilter::from(*medal));
                if *map {
                    let map = ChoroplethMap::medaled(&countries, &self.resolver);
                    self.report_unresolved(&map, verbose);
                    to_pretty_json(&map.to_plotly())?
                } else {
                    OutputFormatter::format_result(&names_table(&countries), format)
                }
            }

            Commands::Report { top } => {
                let top_n = top.unwrap_or(self.config.report.top_n);
                let athlete = &self.config.report.athlete;
                match format {
                    OutputFormat::Json => self.engine.generate_report_json(athlete, top_n)?,
                    _ => self.engine.generate_report_markdown(athlete, top_n),
                }
            }
        };

        Ok(output)
    }

    fn report_unresolved(&self, map: &ChoroplethMap, verbose: bool) {
        if verbose && !map.unresolved.is_empty() {
            eprintln!(
                "{}",
                OutputFormatter::format_info(&format!(
                    "{} countries left off the map: {}",
                    map.unresolved.len(),
                    map.unresolved.join(", ")
                ))
            );
        }
    }
}

fn scalar_table(column: &str, value: usize) -> ResultTable {
    let mut table = ResultTable::new(vec![ColumnMetadata::new(column, DataType::Integer)]);
    table.push_row(vec![Value::from(value)]);
    table
}

fn names_table(countries: &[String]) -> ResultTable {
    let mut table = ResultTable::new(vec![ColumnMetadata::new("country", DataType::Text)]);
    for country in countries {
        table.push_row(vec![Value::from(country.as_str())]);
    }
    table
}

fn to_pretty_json<T: Serialize>(value: &T) -> StatsResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| StatsError::Presentation(e.to_string()))
}

fn init_logging(verbose: bool) {
    let directive = if verbose { "olympics_stats=debug" } else { "olympics_stats=warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Resolve configuration from the optional config file and CLI overrides
fn resolve_config(args: &CliArgs) -> StatsResult<StatsConfig> {
    let mut config = match &args.config {
        Some(path) => StatsConfig::from_file(path)?,
        None => StatsConfig::default(),
    };

    if let Some(events) = &args.events {
        config.data.events_path = events.clone();
    }
    if let Some(regions) = &args.regions {
        config.data.regions_path = regions.clone();
    }

    Ok(config)
}

/// Main entry point for CLI execution
pub fn run_cli() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let runner = match resolve_config(&args).and_then(CliRunner::new) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("{}", OutputFormatter::format_error(&e));
            std::process::exit(1);
        }
    };

    match runner.execute(&args.command, &args.format, args.verbose) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", OutputFormatter::format_error(&e));
            std::process::exit(1);
        }
    }
}
