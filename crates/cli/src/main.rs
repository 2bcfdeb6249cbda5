//! relq - run a file of relational queries.
//!
//! Usage: relq [OPTIONS] <QUERIES>

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use relq_cli::{RelqConfig, Session};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// relq query runner
#[derive(Parser, Debug)]
#[command(name = "relq")]
#[command(version, about = "Run a file of relational queries over pipe-delimited tables")]
struct Args {
    /// Query file, one operation per line
    queries: PathBuf,

    /// Directory table files are read from
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory table files are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Operations log file
    #[arg(long, value_name = "FILE", conflicts_with = "no_log")]
    log: Option<PathBuf>,

    /// Disable the operations log
    #[arg(long)]
    no_log: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs the query file, returning whether every query succeeded.
fn run(args: Args) -> anyhow::Result<bool> {
    let config = load_config(&args)?;
    let mut session = Session::new(&config);
    let summary = session.run_file(&args.queries)?;

    info!(
        executed = summary.executed,
        failed = summary.failed,
        "finished {}",
        args.queries.display()
    );
    Ok(summary.failed == 0)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("relq=debug,relq_cli=debug,relq_query=debug,relq_storage=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("relq=info,relq_cli=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Layers the config file, then command-line flags, over the defaults.
fn load_config(args: &Args) -> anyhow::Result<RelqConfig> {
    let mut config = match &args.config {
        Some(path) => RelqConfig::from_file(path)?,
        None => RelqConfig::default(),
    };

    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(log) = &args.log {
        config.operations_log = Some(log.clone());
    }
    if args.no_log {
        config.operations_log = None;
    }

    Ok(config)
}
