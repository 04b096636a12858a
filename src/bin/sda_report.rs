use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sda_pipeline::hash::HashFamily;
use sda_pipeline::{run, PipelineParamsBuilder, PipelineResult};

#[derive(Parser)]
#[command(
    name = "sda-report",
    about = "Hazard, water-filling and Merkle commitment demo report (not production)",
    version
)]
struct Cli {
    /// JSON parameter file; fields that are left out keep the demo defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the hash family used for leaves and nodes
    #[arg(long, value_parser = parse_hash)]
    hash: Option<HashFamily>,

    /// Print the report on a single line
    #[arg(long)]
    compact: bool,

    /// Enable verbose logging on stderr
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logging
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    quiet: bool,
}

fn parse_hash(value: &str) -> Result<HashFamily, String> {
    value.parse()
}

fn init_tracing(cli: &Cli) {
    // --quiet: off; --verbose: RUST_LOG or info; default: warnings only.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_builder(cli: &Cli) -> PipelineResult<PipelineParamsBuilder> {
    let mut builder = match &cli.config {
        Some(path) => PipelineParamsBuilder::from_json_file(path)?,
        None => PipelineParamsBuilder::new(),
    };
    if let Some(hash) = cli.hash {
        builder.hash = hash;
    }
    Ok(builder)
}

fn execute(cli: &Cli) -> PipelineResult<String> {
    let params = load_builder(cli)?.build()?;
    let report = run(&params)?;
    if cli.compact {
        report.to_json()
    } else {
        report.to_json_pretty()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match execute(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "report failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
