//! File-level wrapper: resolves the input/output pair and runs one pass.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::pairing::{PairingCoordinator, RunSummary};
use crate::protocol::{Error, Result};
use crate::report::{Reporter, TextReporter};

/// Default input file name
pub const DEFAULT_INPUT: &str = "data_in.txt";

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "data_out.txt";

/// Input/output locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// File holding `mess=`/`mask=` records
    pub input: PathBuf,
    /// Report sink, appended to
    pub output: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Process `config.input` and append the report to `config.output`.
///
/// A terminating error is written to the output as well before it is
/// returned. Pairs completed before the error stay in the output.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let sink = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.output)?;
    let mut reporter = TextReporter::new(BufWriter::new(sink));

    let result = open_input(&config.input)
        .and_then(|input| PairingCoordinator::new(input).run(&mut reporter));

    match &result {
        Ok(summary) => info!(
            pairs = summary.pairs,
            mismatches = summary.checksum_mismatches,
            "run complete"
        ),
        Err(err) => {
            debug!(error = %err, "recording run error in output");
            reporter.report_error(err)?;
        }
    }
    reporter.flush()?;

    result
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => Error::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(err),
    })
}
