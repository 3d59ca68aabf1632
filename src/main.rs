//! CLI entry point for the bikeshare statistics tool.
//!
//! Provides subcommands for a one-shot analysis with filters given as flags,
//! an interactive prompt session, and listing the known sources.

use anyhow::Result;
use bikeshare_stats::catalog::Source;
use bikeshare_stats::config::Config;
use bikeshare_stats::output::{export_gender_series, print_pretty, render, to_json};
use bikeshare_stats::prompt::Prompter;
use bikeshare_stats::reader::CsvSourceReader;
use bikeshare_stats::stats::BandMode;
use bikeshare_stats::{FilterSpec, Session};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Descriptive statistics over US bikeshare trip data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Directory holding the source CSV files
    #[arg(short = 'd', long)]
    data_dir: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute every statistic family for the given filters
    Analyze {
        /// Source keys (c, n, w) or 'a' for all
        #[arg(long, num_args = 1.., default_value = "a")]
        cities: Vec<String>,

        /// Month numbers 1-6 or 'a' for all
        #[arg(long, num_args = 1.., default_value = "a")]
        months: Vec<String>,

        /// Weekday keys (m t w th f s su), 'wdays', 'wends' or 'a' for all
        #[arg(long, num_args = 1.., default_value = "a")]
        days: Vec<String>,

        #[command(flatten)]
        sources: SourceArgs,

        /// Print the report as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// CSV file to append the gender/month duration series to
        #[arg(short, long)]
        export: Option<String>,

        /// Use non-overlapping age bands
        #[arg(long, default_value_t = false)]
        disjoint_bands: bool,
    },
    /// Ask for filters interactively and show the statistics
    Interactive {
        #[command(flatten)]
        sources: SourceArgs,
    },
    /// List the known sources and the files they are read from
    Sources {
        #[command(flatten)]
        sources: SourceArgs,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", LevelFilter::INFO));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            cities,
            months,
            days,
            sources,
            json,
            export,
            disjoint_bands,
        } => {
            let config = load_config(&sources)?;
            let reader = CsvSourceReader::from_config(&config)?;
            let bands = if disjoint_bands {
                BandMode::Disjoint
            } else {
                config.age_bands
            };

            let spec = FilterSpec::from_tokens(&cities, &months, &days)?;
            info!(filters = %spec, "Analyzing");

            let session = Session::start(spec, &reader)?.with_band_mode(bands);
            let report = session.report();
            print_pretty(&report);

            if json {
                println!("{}", to_json(&report)?);
            } else {
                println!("{}", session.spec());
                println!("{}", render(&report));
            }

            if let Some(path) = export {
                let rows = export_gender_series(&path, &report.gender_duration)?;
                info!(path, rows, "Gender series exported");
            }
        }
        Commands::Interactive { sources } => {
            let config = load_config(&sources)?;
            let reader = CsvSourceReader::from_config(&config)?;

            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            let sessions = prompter.run(&reader, config.age_bands)?;
            info!(sessions, "Interactive run finished");
        }
        Commands::Sources { sources } => {
            let config = load_config(&sources)?;
            let reader = CsvSourceReader::from_config(&config)?;
            for source in Source::ALL {
                let path = reader.path_for(source);
                println!(
                    "({}) {:<14} {} [{}]",
                    source.key(),
                    source.name(),
                    path.display(),
                    if path.exists() { "found" } else { "missing" }
                );
            }
        }
    }

    Ok(())
}

/// Reads `var` as a filter directive list, with `default` as the fallback level.
fn env_filter(var: &str, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(var)
        .from_env_lossy()
}

/// Config file first, then environment, then command-line flags.
fn load_config(args: &SourceArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_env(|key| std::env::var(key).ok())?;
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    info!(data_dir = %config.data_dir.display(), bands = %config.age_bands, "Configuration loaded");
    Ok(config)
}
