//! CLI for running one of the built-in interaction filters.
//!
//! Usage:
//!   interaction-filter npinter5
//!   interaction-filter rnainter --project-root /path/to/project
//!
//! Input is read from `<root>/data/raw`, output goes to `<root>/data/processed`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use interaction_filter::observability::TracingObserver;
use interaction_filter::pipeline::{PipelineKind, ProjectLayout};
use interaction_filter::run::{RunOutcome, missing_column_diagnostic, run_pipeline};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

const EXIT_IO_FAILURE: u8 = 1;
const EXIT_MISSING_COLUMNS: u8 = 2;
const EXIT_NO_MATCHING_DATA: u8 = 3;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PipelineArg {
    /// NPInter v5: binding RNA-protein interactions
    Npinter5,
    /// RNAInter: symbol pairs with score
    Rnainter,
}

impl From<PipelineArg> for PipelineKind {
    fn from(arg: PipelineArg) -> Self {
        match arg {
            PipelineArg::Npinter5 => PipelineKind::NpInter5,
            PipelineArg::Rnainter => PipelineKind::RnaInter,
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Filter and project large TSV interaction dumps into CSV")]
struct Cli {
    /// Pipeline to run
    #[arg(value_enum)]
    pipeline: PipelineArg,

    /// Project root containing data/raw and data/processed
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Exit with 2 on missing columns and 3 on an empty result instead of 0
    #[arg(long)]
    strict_exit_codes: bool,
}

fn main() -> ExitCode {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = PipelineKind::from(cli.pipeline).config();
    let layout = ProjectLayout::new(&cli.project_root);

    match run_pipeline(&config, &layout, &TracingObserver) {
        Ok(RunOutcome::Written { .. }) => ExitCode::SUCCESS,
        Ok(RunOutcome::NoMatchingData { .. }) => strict_or_success(&cli, EXIT_NO_MATCHING_DATA),
        Err(e) => match missing_column_diagnostic(&config, &e) {
            Some(lines) => {
                for line in lines {
                    error!("{line}");
                }
                strict_or_success(&cli, EXIT_MISSING_COLUMNS)
            }
            None => {
                error!("{e}");
                ExitCode::from(EXIT_IO_FAILURE)
            }
        },
    }
}

fn strict_or_success(cli: &Cli, code: u8) -> ExitCode {
    if cli.strict_exit_codes {
        ExitCode::from(code)
    } else {
        ExitCode::SUCCESS
    }
}
