mod assemble;
mod breakdown;
mod config;
mod error;
mod extract;
mod fields;
#[cfg(test)]
mod fixtures;
mod format;
mod lines;
mod record;

use assemble::Strictness;
use clap::Parser;
use error::ExtractError;
use extract::Summary;
use format::RowFormatter;
use lines::LineSource;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Extract one delimited row per run from concatenated load-test reports.
#[derive(Parser, Debug)]
#[command(name = "ab-extract", version, about)]
pub struct Cli {
    /// Log file holding one or more concatenated run reports ("-" for stdin)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Config file path
    #[arg(short, long, default_value = "ab-extract.toml")]
    config: PathBuf,

    /// Fail when a failure breakdown line cannot be decoded, instead of reporting zeros
    #[arg(long)]
    strict: bool,

    /// Do not print the header row
    #[arg(long)]
    no_header: bool,

    /// Log every record and defaulting decision to stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);
    tracing::debug!(?cli, "parsed CLI arguments");

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    match run(&cli, &mut out) {
        Ok(summary) => {
            tracing::info!(
                records = summary.records,
                warnings = summary.warnings,
                "extraction finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ab-extract: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .init();
}

/// Resolve config and CLI overrides, then stream rows for `cli.input` into `out`.
fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<Summary, ExtractError> {
    let cfg = config::load_config(&cli.config);
    let strictness = if cli.strict || cfg.extract.strict {
        Strictness::Strict
    } else {
        Strictness::Lenient
    };
    let formatter =
        RowFormatter::from_config(&cfg.output).with_header(cfg.output.header && !cli.no_header);

    let source = LineSource::open(&cli.input)?;
    extract::extract(source, &formatter, strictness, out)
}
