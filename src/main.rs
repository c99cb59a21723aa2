use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use statement_analytics::analysis::{
    category_ratio::{category_ratios, category_ratios_within, CategoryRatio},
    credibility::{speaker_frequency, SpeakerFrequency},
    daily_trend::{date_span_days, year_marks, DailyTrend, DailyTrendView},
    options::{available_years, default_speaker, speaker_options},
    ranking::{disinformation_ranking, grouped_flag_counts, FlagCount},
    speaker_trend::{speaker_yearly_trend, YearlyFakeShare},
};
use statement_analytics::{CategoryColumn, Config, DataLoader};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const DEFAULT_CONFIG: &str = "config/dashboard.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about = "Explore truthfulness statistics of political statements")]
struct Args {
    /// YAML settings file (defaults apply when omitted and config/dashboard.yaml is absent)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Statement CSV file
    #[arg(short, long, default_value = "data/liar_dataset.csv")]
    data: PathBuf,

    /// Print results as JSON instead of a text table
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Disinformation ratio per category
    Ratios {
        #[arg(long, default_value = "speaker")]
        by: CategoryColumn,
        /// Only consider the N categories with the most disinformation
        #[arg(long)]
        top: Option<usize>,
    },
    /// Disinformation vs truth counts for the top N categories
    Top {
        #[arg(long, default_value = "speaker")]
        by: CategoryColumn,
        #[arg(short)]
        n: Option<usize>,
    },
    /// Statement frequency and credibility of the busiest speakers of a year
    Year {
        #[arg(long)]
        year: i32,
    },
    /// Yearly share of false statements for one speaker
    Speaker {
        /// Defaults to the most frequent speaker
        #[arg(long)]
        name: Option<String>,
    },
    /// 30-day rolling truthfulness and volume, sliced by day offsets from the epoch
    Daily {
        #[arg(long, default_value_t = 0)]
        start: i64,
        #[arg(long)]
        end: Option<i64>,
    },
    /// Year tick labels for the date slider
    Marks,
    /// Values available to the filter controls
    Options,
}

#[derive(Debug, Serialize)]
struct FilterOptions {
    years: Vec<i32>,
    speakers: Vec<String>,
    default_speaker: Option<String>,
    date_span_days: i64,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load(DEFAULT_CONFIG)
            .with_context(|| format!("Failed to load config from {}", DEFAULT_CONFIG)),
        None => Ok(Config::default()),
    }
}

fn emit<T: Serialize>(json: bool, value: &T, print_table: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print_table(value);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let table = DataLoader::load(&args.data, &config.labels)
        .with_context(|| format!("Failed to load dataset {}", args.data.display()))?;

    let timeline = &config.timeline;

    match args.command {
        Command::Ratios { by, top } => {
            let ratios = match top {
                Some(n) => {
                    let ordering = disinformation_ranking(&table, by);
                    let n = ordering.clamp(n);
                    category_ratios_within(&table, by, ordering.top(n), config.ratios.min_support)
                }
                None => category_ratios(&table, by, config.ratios.min_support),
            };
            emit(args.json, &ratios, |rows| print_ratios(by, rows))?;
        }
        Command::Top { by, n } => {
            let ordering = disinformation_ranking(&table, by);
            let requested = n.unwrap_or(timeline.default_top_n);
            let n = ordering.clamp(requested);
            if n != requested {
                warn!("Requested {} categories, showing {}", requested, n);
            }
            let counts = grouped_flag_counts(&table, &ordering, n);
            emit(args.json, &counts, |rows| print_flag_counts(by, rows))?;
        }
        Command::Year { year } => {
            let speakers = speaker_frequency(&table, timeline, year);
            emit(args.json, &speakers, |rows| print_speaker_frequency(year, rows))?;
        }
        Command::Speaker { name } => {
            let speaker = match name.or_else(|| default_speaker(&table, timeline)) {
                Some(speaker) => speaker,
                None => {
                    warn!("No dated statements from {} onwards", timeline.min_year);
                    return Ok(());
                }
            };
            let trend = speaker_yearly_trend(&table, timeline, &speaker);
            emit(args.json, &trend, |rows| print_speaker_trend(&speaker, rows))?;
        }
        Command::Daily { start, end } => {
            let trend =
                DailyTrend::compute(&table, config.rolling.window, config.rolling.min_periods);
            let span = table
                .max_date()
                .map(|max_date| date_span_days(timeline.epoch, max_date))
                .unwrap_or_default();
            info!(
                points = trend.points().len(),
                dates = trend.distinct_dates(),
                "Computed rolling daily trend"
            );
            let view = trend.view(timeline.epoch, start, end.unwrap_or(span));
            emit(args.json, &view, print_daily_view)?;
        }
        Command::Marks => {
            let marks = table
                .max_date()
                .map(|max_date| year_marks(timeline.epoch, max_date))
                .unwrap_or_default();
            emit(args.json, &marks, print_marks)?;
        }
        Command::Options => {
            let options = FilterOptions {
                years: available_years(&table, timeline),
                speakers: speaker_options(&table, timeline),
                default_speaker: default_speaker(&table, timeline),
                date_span_days: table
                    .max_date()
                    .map(|max_date| date_span_days(timeline.epoch, max_date))
                    .unwrap_or_default(),
            };
            emit(args.json, &options, print_options)?;
        }
    }

    Ok(())
}

fn print_ratios(column: CategoryColumn, rows: &[CategoryRatio]) {
    println!("Disinformation ratio by {}", column);
    println!("\n{:<40} {:>8} {:>8} {:>8}", column.as_str(), "total", "disinfo", "ratio");
    println!("{:-<67}", "");
    for row in rows {
        println!(
            "{:<40} {:>8} {:>8} {:>8.2}",
            row.category, row.total, row.disinfo_count, row.disinfo_ratio
        );
    }
}

fn print_flag_counts(column: CategoryColumn, rows: &[FlagCount]) {
    println!("Statements by {}: disinformation vs truth", column);
    println!("\n{:<40} {:<15} {:>8}", column.as_str(), "type", "count");
    println!("{:-<65}", "");
    for row in rows {
        println!("{:<40} {:<15} {:>8}", row.category, row.flag, row.count);
    }
}

fn print_speaker_frequency(year: i32, rows: &[SpeakerFrequency]) {
    println!("Most frequent speakers ({})", year);
    println!("\n{:<40} {:>10} {:>12}", "speaker", "frequency", "credibility");
    println!("{:-<64}", "");
    for row in rows {
        println!(
            "{:<40} {:>10} {:>12.3}",
            row.speaker, row.frequency, row.credibility_score
        );
    }
}

fn print_speaker_trend(speaker: &str, rows: &[YearlyFakeShare]) {
    println!("False statements per year - {}", speaker);
    println!("\n{:<6} {:>8} {:>8} {:>8}", "year", "total", "false", "% false");
    println!("{:-<33}", "");
    for row in rows {
        println!(
            "{:<6} {:>8} {:>8} {:>8.2}",
            row.year, row.total_statements, row.fake_statements, row.percent_fake
        );
    }
}

fn print_daily_view(view: &DailyTrendView) {
    println!("{}", view.range_text);
    println!("\n{:<12} {:>14} {:>14}", "date", "mean label", "statements");
    println!("{:-<42}", "");
    for point in &view.points {
        println!(
            "{:<12} {:>14.3} {:>14.2}",
            point.date, point.rolling_mean_label, point.rolling_count
        );
    }
}

fn print_marks(marks: &BTreeMap<i64, String>) {
    for (offset, label) in marks {
        println!("{:>6}  {}", offset, label);
    }
}

fn print_options(options: &FilterOptions) {
    let years: Vec<String> = options.years.iter().map(i32::to_string).collect();
    println!("Years: {}", years.join(", "));
    println!("Speakers: {}", options.speakers.len());
    if let Some(speaker) = &options.default_speaker {
        println!("Default speaker: {}", speaker);
    }
    println!("Date range: 0..={} days", options.date_span_days);
}
