use std::path::PathBuf;

use anyhow::{anyhow, Result};
use argh::FromArgs;

#[derive(FromArgs, Debug)]
/// Descriptive statistics over the numbers in a CSV file
pub struct Args {
    /// file name to load data from (required to compute statistics)
    #[argh(option, short = 'f')]
    filename: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
pub enum Invocation {
    Compute(PathBuf),
    Help(String),
}

/// Parses `args` (without the command name) the way `argh::from_env` would,
/// but hands early exits back to the caller instead of terminating.
pub fn parse(command_name: &str, args: &[&str]) -> Result<Invocation> {
    match Args::from_args(&[command_name], args) {
        Ok(Args {
            filename: Some(filename),
        }) => Ok(Invocation::Compute(filename)),
        Ok(Args { filename: None }) => Ok(Invocation::Help(usage(command_name))),
        Err(early_exit) => match early_exit.status {
            Ok(()) => Ok(Invocation::Help(early_exit.output)),
            Err(()) => Err(anyhow!(
                "Failed to parse command line arguments: {}",
                early_exit.output.trim_end()
            )),
        },
    }
}

pub fn usage(command_name: &str) -> String {
    Args::from_args(&[command_name], &["--help"])
        .err()
        .map(|early_exit| early_exit.output)
        .unwrap_or_default()
}
