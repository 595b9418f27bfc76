// cargo watch -x 'fmt' -x 'run'  // 'run -- --some-arg'

pub mod cli;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

use output::OutputBatcher;
use processing::ProcessSummary;
use std::error::Error;
use std::fs::File;
use std::io;
use std::io::BufReader;

pub use processing::{expand_line, parse_token, process_input, FamilyFilter};

/// Run one full expansion over the input named by `args`, writing addresses
/// to stdout.
///
/// Reads the input file when one was given, stdin otherwise.
pub fn run(args: &cli::Args) -> Result<ProcessSummary, Box<dyn Error>> {
    let filter = args.family_filter();
    let stdout = io::stdout();
    let mut out = OutputBatcher::new(stdout.lock());

    let summary = match &args.file {
        Some(path) => {
            if !path.exists() {
                return Err(format!("Input file does not exist: {}", path.display()).into());
            }
            log::info!("Reading input file: {}", path.display());
            let reader = BufReader::new(File::open(path)?);
            process_input(reader, filter, &mut out)?
        }
        None => {
            log::info!("Reading from stdin");
            let stdin = io::stdin();
            process_input(stdin.lock(), filter, &mut out)?
        }
    };

    Ok(summary)
}
