mod logic;
mod util;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use logic::{CaseResult, PuzzleSweep, reports, resolve_dates, resolve_difficulties};
use util::split_csv;
use waypoint_game::{DirDataLoader, StaticDataLoader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "waypoint-tester", version = "0.1.0")]
#[command(about = "Automated QA sweeps for Waypoint puzzles - invariant and determinism checks")]
struct Args {
    /// Start dates to sweep (comma-separated ISO dates, or `today`)
    #[arg(long, default_value = "today")]
    dates: String,

    /// Consecutive days to sweep from each start date
    #[arg(long, default_value_t = 1)]
    days: u32,

    /// Difficulties to generate (comma-separated)
    #[arg(long, default_value = "easy,medium,hard")]
    difficulties: String,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Load cities.json, content.json and puzzle.json from this directory
    /// instead of the bundled data
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    announce_banner();

    let start_time = Instant::now();
    let dates = resolve_dates(&split_csv(&args.dates), args.days)?;
    let difficulties = resolve_difficulties(&split_csv(&args.difficulties))?;
    println!(
        "🗓️  {} date(s) × {} difficulty level(s)",
        dates.len(),
        difficulties.len()
    );

    let results = match &args.data_dir {
        Some(dir) => PuzzleSweep::new(DirDataLoader::new(dir), args.verbose)
            .run(&dates, &difficulties),
        None => PuzzleSweep::new(StaticDataLoader, args.verbose).run(&dates, &difficulties),
    };

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn announce_banner() {
    println!("{}", "🧭 Waypoint Puzzle Tester".bright_cyan().bold());
    println!("{}", "=========================".cyan());
}

fn write_reports(args: &Args, results: &[CaseResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => reports::generate_json_report(output_target.writer(), results)?,
        ReportFormat::Markdown => {
            reports::generate_markdown_report(output_target.writer(), results)?;
        }
        ReportFormat::Console => {
            let duration = start_time.elapsed();
            reports::generate_console_report(output_target.writer(), results, duration)?;
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            dates: "2025-06-01".to_string(),
            days: 1,
            difficulties: "easy".to_string(),
            report: ReportFormat::Json,
            data_dir: None,
            verbose: false,
            output: None,
        }
    }

    #[test]
    fn args_parse_report_and_lists() {
        let args = Args::parse_from([
            "waypoint-tester",
            "--dates",
            "2025-06-01,2025-12-25",
            "--days",
            "3",
            "--report",
            "markdown",
        ]);
        assert_eq!(args.report, ReportFormat::Markdown);
        assert_eq!(args.days, 3);
        assert_eq!(split_csv(&args.dates).len(), 2);
    }

    #[test]
    fn reports_write_to_file() {
        let path = std::env::temp_dir().join(format!(
            "waypoint-report-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        let args = Args {
            output: Some(path.clone()),
            ..base_args()
        };
        let dates = resolve_dates(&split_csv(&args.dates), args.days).unwrap();
        let difficulties = resolve_difficulties(&split_csv(&args.difficulties)).unwrap();
        let results = PuzzleSweep::new(StaticDataLoader, false).run(&dates, &difficulties);
        write_reports(&args, &results, Instant::now()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("\"passed\": true"));
    }
}
