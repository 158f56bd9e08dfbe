//! s-Java verifier CLI
//!
//! Prints `0` for a legal file, `1` for an illegal one and `2` when the file
//! cannot be read, and exits with the same code. Diagnostics go to stderr.

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "the verdict and diagnostics are the program's output"
)]

use anyhow::Result;
use clap::Parser;
use colored::Colorize as _;
use sj_driver::{Config, ExitStatus};
use sj_parser::BraceScan;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod report;

use report::CheckReport;

#[derive(Parser)]
#[command(name = "sjavac")]
#[command(about = "Static verifier for s-Java source files", long_about = None)]
#[command(version)]
struct Cli {
    /// Source file to verify
    file: PathBuf,

    /// Configuration file (defaults to sjavac.toml next to the source)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Brace counting mode (literal-aware or raw), overrides the configuration
    #[arg(long, value_name = "MODE")]
    brace_scan: Option<BraceScan>,

    /// Log progress and print a summary on success
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let status = run(&cli).unwrap_or_else(|err| {
        eprintln!("{} {err:#}", "error:".red().bold());
        ExitStatus::IoError
    });

    println!("{}", status.code());
    ExitCode::from(status.code())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<ExitStatus> {
    let mut config = Config::discover(cli.config.as_deref(), &cli.file)?.check;
    if let Some(brace_scan) = cli.brace_scan {
        config.brace_scan = brace_scan;
    }

    let source = match sj_driver::load_source(&cli.file, &config) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            return Ok(err.exit_status());
        }
    };

    match sj_driver::check_source(&source, &config.options()) {
        Ok(program) => {
            if cli.verbose {
                print_summary(&cli.file, &program);
            }
            Ok(ExitStatus::Valid)
        }
        Err(err) => {
            log::debug!("{} error: {err}", err.category());
            let report = CheckReport::new(&cli.file, source, &err);
            eprintln!("{:?}", miette::Report::new(report));
            Ok(ExitStatus::Invalid)
        }
    }
}

fn print_summary(path: &Path, program: &sj_resolve::Program) {
    eprintln!(
        "{} {} ({} methods, {} scopes)",
        "Valid:".green().bold(),
        path.display(),
        program.registry.len(),
        program.tree.len()
    );
}
