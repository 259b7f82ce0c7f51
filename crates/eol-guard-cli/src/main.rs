//! `eol-guard` command line.
//!
//! Runs every file through the same save pipeline an editor would: the file is opened in a
//! [`DocumentTable`](eol_guard::DocumentTable) with a [`SaveInterceptor`](eol_guard::SaveInterceptor)
//! advised, saved, and written back only when its text changed.

mod run;

use anyhow::{Context, Result};
use clap::Parser;
use eol_guard::GuardConfig;
use run::{FileStatus, Mode, Session};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "eol-guard")]
#[command(version, about = "Normalize mixed line endings to the first one found in each file")]
struct Cli {
    /// Files to normalize
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Strip trailing spaces/tabs and make sure the last line is terminated
    #[arg(long, overrides_with = "no_trim_trailing_whitespace")]
    trim_trailing_whitespace: bool,

    /// Keep trailing whitespace even if the configuration trims it
    #[arg(long, overrides_with = "trim_trailing_whitespace")]
    no_trim_trailing_whitespace: bool,

    /// Report files that would change without writing them (exit code 1 if any)
    #[arg(long)]
    check: bool,

    /// Print per-file line ending statistics
    #[arg(long)]
    stats: bool,

    /// JSON configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Overall result of a run, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Every file was already normalized or has been rewritten.
    Clean,
    /// `--check` found files that would change.
    WouldChange,
    /// A file or the configuration could not be processed.
    Failed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Clean => ExitCode::SUCCESS,
            Outcome::WouldChange => ExitCode::from(1),
            Outcome::Failed => ExitCode::from(2),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    execute(&cli).into()
}

fn execute(cli: &Cli) -> Outcome {
    run(cli).unwrap_or_else(|err| {
        eprintln!("eol-guard: {err:#}");
        Outcome::Failed
    })
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

/// Load the configuration file, if any, and apply command line overrides on top.
fn resolve_config(cli: &Cli) -> Result<GuardConfig> {
    let mut config = match &cli.config {
        Some(path) => GuardConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GuardConfig::default(),
    };
    if cli.trim_trailing_whitespace {
        config.trim_trailing_whitespace = true;
    } else if cli.no_trim_trailing_whitespace {
        config.trim_trailing_whitespace = false;
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<Outcome> {
    let config = resolve_config(cli)?;

    let mode = if cli.check { Mode::Check } else { Mode::Write };
    let mut session = Session::new(config.normalize_options(), mode);

    let mut changed = 0usize;
    let mut failed = 0usize;
    for path in &cli.files {
        match session.process(path) {
            Ok(report) => {
                if cli.stats {
                    println!("{}", report.stats_line());
                }
                match report.status {
                    FileStatus::Unchanged => {}
                    FileStatus::Normalized => {
                        changed += 1;
                        println!("normalized {}", path.display());
                    }
                    FileStatus::WouldNormalize => {
                        changed += 1;
                        println!("would normalize {}", path.display());
                    }
                }
            }
            Err(err) => {
                failed += 1;
                eprintln!("eol-guard: {err:#}");
            }
        }
    }

    Ok(if failed > 0 {
        Outcome::Failed
    } else if mode == Mode::Check && changed > 0 {
        Outcome::WouldChange
    } else {
        Outcome::Clean
    })
}
