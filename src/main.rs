//! Command-line front-end: one input file in, one appended report out.

use std::path::PathBuf;
use std::process::ExitCode;

use aumsg::runner::{DEFAULT_INPUT, DEFAULT_OUTPUT};
use aumsg::{RunConfig, run};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aumsg")]
#[command(about = "Verify and mask hex-encoded message/mask pairs")]
struct Args {
    /// Input file, relative to the working directory
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output file, created if missing and appended to otherwise
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        Self {
            input: args.input,
            output: args.output,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RunConfig::from(Args::parse());
    match run(&config) {
        Ok(summary) => {
            info!(
                pairs = summary.pairs,
                output = %config.output.display(),
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "run failed");
            ExitCode::from(err.exit_code())
        }
    }
}
