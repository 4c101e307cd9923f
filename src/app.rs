use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use log::debug;

use crate::{
    cli::{self, Invocation},
    dataset::Dataset,
    stats::Statistics,
};

const DEFAULT_COMMAND_NAME: &str = "csv-stats";

/// Runs the whole program against the given sinks and returns the process exit code.
///
/// `args` is the complete argument vector, program path included.
pub fn run<S: AsRef<str>>(args: &[S], out: &mut impl Write, err: &mut impl Write) -> u8 {
    let command_name = args
        .first()
        .and_then(|program| Path::new(program.as_ref()).file_name())
        .and_then(|name| name.to_str())
        .unwrap_or(DEFAULT_COMMAND_NAME);
    let args = args
        .iter()
        .skip(1)
        .map(|arg| arg.as_ref())
        .collect::<Vec<&str>>();

    match try_run(command_name, &args, out) {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "Error: {:#}", e);
            1
        }
    }
}

fn try_run(command_name: &str, args: &[&str], out: &mut impl Write) -> Result<()> {
    let invocation = match cli::parse(command_name, args) {
        Ok(invocation) => invocation,
        Err(e) => {
            out.write_all(cli::usage(command_name).as_bytes())?;
            return Err(e);
        }
    };
    debug!("invocation: {:?}", invocation);

    match invocation {
        Invocation::Help(usage) => out.write_all(usage.as_bytes())?,
        Invocation::Compute(filename) => {
            writeln!(out, "{}", filename.display())?;
            let dataset = Dataset::load(&filename)?;
            let stats = Statistics::compute(dataset.values())
                .with_context(|| format!("{} contains no data values", filename.display()))?;
            write!(out, "{}", stats)?;
        }
    }
    out.flush().context("unable to write output")
}
