//! CLI entry point for the school statistics tool.
//!
//! Reads the schools and students CSV tables, joins them, and prints or
//! exports the district, per-school, per-grade, and bucketed summaries.

use anyhow::Result;
use clap::{Parser, Subcommand};
use school_stats::join::join;
use school_stats::loader::{load_schools, load_students};
use school_stats::output::{print_report, write_json};
use school_stats::report::{Report, build_report};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "school_stats")]
#[command(about = "Summarize district and per-school test performance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print all summary tables for a pair of input tables
    Report {
        /// Path to the schools CSV
        #[arg(long, default_value = "data/schools.csv")]
        schools: PathBuf,

        /// Path to the students CSV
        #[arg(long, default_value = "data/students.csv")]
        students: PathBuf,
    },
    /// Write the full report as pretty-printed JSON
    Export {
        /// Path to the schools CSV
        #[arg(long, default_value = "data/schools.csv")]
        schools: PathBuf,

        /// Path to the students CSV
        #[arg(long, default_value = "data/students.csv")]
        students: PathBuf,

        /// Output JSON path
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/school_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("school_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { schools, students } => {
            let report = run(&schools, &students)?;
            print_report(&report);
        }
        Commands::Export {
            schools,
            students,
            output,
        } => {
            let report = run(&schools, &students)?;
            write_json(&output, &report)?;
            info!(path = %output.display(), "report written");
        }
    }

    Ok(())
}

/// Runs the full pipeline: load both tables, join, aggregate.
#[tracing::instrument(fields(schools = %schools_path.display(), students = %students_path.display()))]
fn run(schools_path: &Path, students_path: &Path) -> Result<Report> {
    let schools = load_schools(schools_path)?;
    let students = load_students(students_path)?;

    info!(
        schools = schools.len(),
        students = students.len(),
        "input tables loaded"
    );

    let joined = join(&schools, &students);
    Ok(build_report(&schools, &joined))
}
