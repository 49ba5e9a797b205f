//! Command-line front end for the Litterly classification history.
//!
//! Every command prints pretty JSON on stdout; logs go to stderr.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use tokio::time::Duration;

use litterly_lib::{
    analytics::{self, AnalyticsConfig},
    classifier::{classify_and_record, ClassificationInput},
    history::{export_to_path, summarize, DateRange, HistoryQuery, SortKey},
    init_logging,
    watcher::HistoryWatcher,
    App,
};

#[derive(Parser)]
#[command(name = "litterly", about = "Waste classification history and analytics")]
struct Cli {
    /// Directory holding settings.json and the SQLite database
    #[arg(long, env = "LITTERLY_DATA_DIR", default_value = ".litterly", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a description or a photo and record the result
    Classify {
        #[arg(long, conflicts_with = "image", required_unless_present = "image")]
        text: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
        /// Use the keyword classifier instead of the prediction service
        #[arg(long)]
        mock: bool,
    },
    /// List recorded classifications
    History {
        #[arg(long)]
        search: Option<String>,
        #[arg(long = "type")]
        waste_type: Option<String>,
        /// all, today, yesterday, lastWeek, lastMonth
        #[arg(long, default_value = "all")]
        range: DateRange,
        /// date, confidence, type
        #[arg(long, default_value = "date")]
        sort: SortKey,
    },
    /// Remove one record by id
    Remove { id: i64 },
    /// Delete the whole history
    Clear,
    /// Dashboard statistics
    Stats,
    /// Time-bucketed series
    Analytics {
        #[arg(long, value_enum, default_value_t = Series::All)]
        range: Series,
    },
    /// Achievement progress
    Achievements,
    /// Write the history as CSV
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write the sample history if the store is empty
    Seed,
    /// Report whether the storage medium works
    Status,
    /// Print a fresh report whenever the history changes (Ctrl-C to stop)
    Watch {
        /// Seconds between refreshes; defaults to refreshIntervalSecs
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Series {
    Daily,
    Weekly,
    Monthly,
    All,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_input(text: Option<String>, image: Option<PathBuf>) -> Result<ClassificationInput> {
    match (text, image) {
        (Some(text), None) => Ok(ClassificationInput::Text(text)),
        (None, Some(path)) => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("failed to read image {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(ClassificationInput::Image { file_name, bytes })
        }
        _ => bail!("Please provide either an image or description"),
    }
}

fn default_export_path(data_dir: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y-%m-%d");
    data_dir.join(format!("waste-classification-history-{stamp}.csv"))
}

async fn watch(app: &App, interval: Option<u64>) -> Result<()> {
    let interval = interval.unwrap_or(app.current_settings().refresh_interval_secs);
    let mut watcher = HistoryWatcher::new(app.store.clone(), AnalyticsConfig::default());
    let mut reports = watcher.start(Duration::from_secs(interval))?;

    print_json(&*reports.borrow_and_update())?;
    loop {
        tokio::select! {
            changed = reports.changed() => {
                if changed.is_err() {
                    break;
                }
                print_json(&*reports.borrow_and_update())?;
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted; stopping watcher");
                break;
            }
        }
    }

    watcher.stop().await
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let app = App::open(&cli.data_dir)?;
    let config = AnalyticsConfig::default();

    match cli.command {
        Commands::Classify { text, image, mock } => {
            let input = read_input(text, image)?;
            let backend = app.classifier(mock)?;
            let outcome = classify_and_record(&app.store, &backend, input).await?;
            print_json(&outcome)?;
        }
        Commands::History {
            search,
            waste_type,
            range,
            sort,
        } => {
            let query = HistoryQuery {
                search,
                waste_type,
                range,
                sort,
            };
            let records = query.apply(app.store.get_all(), Local::now().naive_local());
            print_json(&json!({
                "summary": summarize(&records),
                "records": records,
            }))?;
        }
        Commands::Remove { id } => {
            let before = app.store.count();
            app.store.remove(id);
            print_json(&json!({ "removed": before != app.store.count(), "id": id }))?;
        }
        Commands::Clear => {
            app.store.clear();
            print_json(&json!({ "cleared": true }))?;
        }
        Commands::Stats => print_json(&app.store.statistics())?,
        Commands::Analytics { range } => {
            let records = app.store.get_all();
            match range {
                Series::Daily => {
                    print_json(&analytics::daily_buckets(&records, config.daily_buckets))?
                }
                Series::Weekly => {
                    print_json(&analytics::weekly_buckets(&records, config.weekly_buckets))?
                }
                Series::Monthly => {
                    print_json(&analytics::monthly_buckets(&records, config.monthly_buckets))?
                }
                Series::All => print_json(&analytics::build_report(
                    &records,
                    Local::now().naive_local(),
                    &config,
                ))?,
            }
        }
        Commands::Achievements => {
            let achievements = analytics::compute_achievements(&app.store.get_all());
            print_json(&achievements)?;
        }
        Commands::Export { output } => {
            let path = output.unwrap_or_else(|| default_export_path(app.data_dir()));
            let records = app.store.get_all();
            export_to_path(&records, &path)?;
            print_json(&json!({ "path": path, "records": records.len() }))?;
        }
        Commands::Seed => {
            let seeded = app.store.ensure_seeded();
            print_json(&json!({ "seeded": seeded, "total": app.store.count() }))?;
        }
        Commands::Status => {
            print_json(&json!({
                "available": app.store.is_available(),
                "database": app.db.path(),
                "settings": app.settings.path(),
                "total": app.store.count(),
                "maxItems": app.store.max_items(),
            }))?;
        }
        Commands::Watch { interval } => watch(&app, interval).await?,
    }

    Ok(())
}
